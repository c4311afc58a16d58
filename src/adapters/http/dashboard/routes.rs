//! HTTP routes for dashboard endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    get_dashboard, get_projection, health, refresh_analysis, replace_context, set_context_field,
    DashboardAppState,
};

/// Creates the dashboard router with all routes.
pub fn dashboard_routes(state: DashboardAppState) -> Router {
    Router::new()
        // GET /api/dashboard
        .route("/api/dashboard", get(get_dashboard))
        // PUT|PATCH /api/context
        .route("/api/context", put(replace_context).patch(set_context_field))
        // POST /api/analysis/refresh
        .route("/api/analysis/refresh", post(refresh_analysis))
        // GET /api/projection
        .route("/api/projection", get(get_projection))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationProvider;
    use crate::adapters::validation::JsonSchemaValidator;
    use crate::application::handlers::GenerateActionPlanHandler;
    use crate::domain::dashboard::DashboardState;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn app() -> Router {
        let action_plan = GenerateActionPlanHandler::new(
            Arc::new(MockGenerationProvider::new()),
            Arc::new(JsonSchemaValidator::new()),
        );
        dashboard_routes(DashboardAppState::new(
            Arc::new(RwLock::new(DashboardState::default())),
            Arc::new(action_plan),
        ))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn malformed_patch_is_bad_request() {
        let response = app()
            .oneshot(
                Request::patch("/api/context")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"field": "stars", "value": 5}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn projection_follows_context() {
        let response = app()
            .oneshot(Request::get("/api/projection").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["points"].as_array().unwrap().len(), 19);
        assert_eq!(body["points"][0], json!({"month": "M0", "projected": 100000, "actual": 100000}));
    }
}
