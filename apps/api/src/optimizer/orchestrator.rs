//! Profile Optimizer — runs the decision engine, then only the rewriters it flagged.
//!
//! Flow: decide → rewrite_headline (if flagged) → rewrite_summary (if flagged) → merge.
//! Unflagged sections pass through exactly as received.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::llm_client::GenerativeClient;
use crate::optimizer::decision::{decide, DecisionTrace, RewriteTool};
use crate::optimizer::headline::rewrite_headline;
use crate::optimizer::roles::RoleCatalog;
use crate::optimizer::summary::rewrite_summary;

/// Request body for full profile optimization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeProfileRequest {
    #[serde(default)]
    pub current_headline: String,
    #[serde(default)]
    pub current_summary: String,
    pub target_role: String,
}

/// Response from the optimization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeProfileResponse {
    pub optimized_headline: String,
    pub optimized_summary: String,
    /// Tools actually invoked, in invocation order.
    pub tools_used: Vec<RewriteTool>,
    pub decision_trace: DecisionTrace,
    /// True if either invoked rewriter took the generative path.
    pub generative_model_used: bool,
}

/// Runs the full optimization pipeline for one profile.
pub async fn optimize_profile(
    generator: &dyn GenerativeClient,
    catalog: &RoleCatalog,
    request: &OptimizeProfileRequest,
) -> OptimizeProfileResponse {
    let run_id = Uuid::new_v4();
    let span = info_span!("optimize_profile", %run_id, target_role = %request.target_role);

    async move {
        let decision = decide(
            catalog,
            &request.current_headline,
            &request.current_summary,
            &request.target_role,
        );

        let mut optimized_headline = request.current_headline.clone();
        let mut optimized_summary = request.current_summary.clone();
        let mut tools_used = Vec::with_capacity(decision.tools.len());
        let mut generative_model_used = false;

        if decision.wants(RewriteTool::RewriteHeadline) {
            let result = rewrite_headline(
                generator,
                catalog,
                &request.current_headline,
                &request.target_role,
            )
            .await;
            optimized_headline = result.improved_text;
            generative_model_used |= result.generative_model_used;
            tools_used.push(RewriteTool::RewriteHeadline);
        }

        if decision.wants(RewriteTool::RewriteSummary) {
            let result = rewrite_summary(
                generator,
                catalog,
                &request.current_summary,
                &request.target_role,
            )
            .await;
            optimized_summary = result.improved_text;
            generative_model_used |= result.generative_model_used;
            tools_used.push(RewriteTool::RewriteSummary);
        }

        info!(
            tools_used = ?tools_used,
            generative_model_used,
            "Profile optimization complete"
        );

        OptimizeProfileResponse {
            optimized_headline,
            optimized_summary,
            tools_used,
            decision_trace: decision.decision_trace,
            generative_model_used,
        }
    }
    .instrument(span)
    .await
}
