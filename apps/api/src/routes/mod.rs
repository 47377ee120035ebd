pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimizer::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Single-section tools
        .route(
            "/api/v1/tools/optimize-headline",
            post(handlers::handle_optimize_headline),
        )
        .route(
            "/api/v1/tools/rewrite-summary",
            post(handlers::handle_rewrite_summary),
        )
        // Whole-profile optimization
        .route(
            "/api/v1/profile/optimize",
            post(handlers::handle_optimize_profile),
        )
        .route("/api/v1/profile/decide", post(handlers::handle_decide))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::Unavailable;
    use crate::optimizer::roles::RoleCatalog;

    fn app() -> Router {
        build_router(AppState::new(
            Config::default(),
            RoleCatalog::builtin(),
            Arc::new(Unavailable),
        ))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(request).await
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_generative_availability() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["generative_model"], false);
    }

    #[tokio::test]
    async fn test_optimize_headline_endpoint() {
        let (status, body) = post_json(
            "/api/v1/tools/optimize-headline",
            json!({"current_headline": "engineer", "target_role": "Backend Developer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["improved_headline"],
            "Backend Developer | APIs & Server-Side Systems"
        );
        assert_eq!(body["generative_model_used"], false);
    }

    #[tokio::test]
    async fn test_rewrite_summary_endpoint_accepts_missing_text() {
        let (status, body) = post_json(
            "/api/v1/tools/rewrite-summary",
            json!({"target_role": "Astronaut"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["improved_summary"]
            .as_str()
            .unwrap()
            .contains("strong interest in Astronaut"));
    }

    #[tokio::test]
    async fn test_optimize_profile_endpoint_returns_trace() {
        let (status, body) = post_json(
            "/api/v1/profile/optimize",
            json!({
                "current_headline": "student",
                "current_summary": "",
                "target_role": "QA Engineer"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tools_used"], json!(["rewrite_headline", "rewrite_summary"]));
        assert_eq!(body["decision_trace"]["headline"]["score"], 5);
        assert_eq!(body["optimized_headline"], "QA Engineer | Testing & Quality Assurance");
    }

    #[tokio::test]
    async fn test_decide_endpoint_does_not_rewrite() {
        let (status, body) = post_json(
            "/api/v1/profile/decide",
            json!({"current_headline": "engineer", "target_role": "Backend Developer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tools"], json!(["rewrite_headline", "rewrite_summary"]));
        assert!(body.get("optimized_headline").is_none());
    }

    #[tokio::test]
    async fn test_blank_target_role_is_rejected() {
        let (status, body) = post_json(
            "/api/v1/profile/optimize",
            json!({"current_headline": "engineer", "target_role": "   "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_target_role_is_malformed() {
        let (status, body) = post_json(
            "/api/v1/tools/optimize-headline",
            json!({"current_headline": "engineer"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
    }
}
