//! Axum route handlers for the optimization API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::optimizer::decision::{decide, Decision};
use crate::optimizer::headline::rewrite_headline;
use crate::optimizer::orchestrator::{
    optimize_profile, OptimizeProfileRequest, OptimizeProfileResponse,
};
use crate::optimizer::summary::rewrite_summary;
use crate::optimizer::RewriteResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct HeadlineRequest {
    #[serde(default)]
    pub current_headline: String,
    pub target_role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineResponse {
    pub improved_headline: String,
    pub explanation: String,
    pub generative_model_used: bool,
}

impl From<RewriteResult> for HeadlineResponse {
    fn from(result: RewriteResult) -> Self {
        Self {
            improved_headline: result.improved_text,
            explanation: result.explanation,
            generative_model_used: result.generative_model_used,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub current_summary: String,
    pub target_role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub improved_summary: String,
    pub explanation: String,
    pub generative_model_used: bool,
}

impl From<RewriteResult> for SummaryResponse {
    fn from(result: RewriteResult) -> Self {
        Self {
            improved_summary: result.improved_text,
            explanation: result.explanation,
            generative_model_used: result.generative_model_used,
        }
    }
}

/// Empty text is valid input; an empty target role is not.
pub fn validate_target_role(target_role: &str) -> Result<(), AppError> {
    if target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "target_role cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tools/optimize-headline
pub async fn handle_optimize_headline(
    State(state): State<AppState>,
    payload: Result<Json<HeadlineRequest>, JsonRejection>,
) -> Result<Json<HeadlineResponse>, AppError> {
    let Json(request) = payload?;
    validate_target_role(&request.target_role)?;

    let result = rewrite_headline(
        state.generator.as_ref(),
        &state.catalog,
        &request.current_headline,
        &request.target_role,
    )
    .await;

    Ok(Json(result.into()))
}

/// POST /api/v1/tools/rewrite-summary
pub async fn handle_rewrite_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let Json(request) = payload?;
    validate_target_role(&request.target_role)?;

    let result = rewrite_summary(
        state.generator.as_ref(),
        &state.catalog,
        &request.current_summary,
        &request.target_role,
    )
    .await;

    Ok(Json(result.into()))
}

/// POST /api/v1/profile/optimize
///
/// Decides which sections need work, rewrites only those, and returns the decision
/// trace alongside the result.
pub async fn handle_optimize_profile(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeProfileRequest>, JsonRejection>,
) -> Result<Json<OptimizeProfileResponse>, AppError> {
    let Json(request) = payload?;
    validate_target_role(&request.target_role)?;

    let response = optimize_profile(state.generator.as_ref(), &state.catalog, &request).await;

    Ok(Json(response))
}

/// POST /api/v1/profile/decide
///
/// Runs the decision step alone. Nothing is rewritten.
pub async fn handle_decide(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeProfileRequest>, JsonRejection>,
) -> Result<Json<Decision>, AppError> {
    let Json(request) = payload?;
    validate_target_role(&request.target_role)?;

    Ok(Json(decide(
        &state.catalog,
        &request.current_headline,
        &request.current_summary,
        &request.target_role,
    )))
}
