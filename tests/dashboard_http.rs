//! Integration tests for the dashboard HTTP API.
//!
//! Exercises the full router (including tracing, CORS and timeout layers)
//! with `tower::ServiceExt::oneshot` against a mock generation provider.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

use lumina::adapters::ai::MockGenerationProvider;
use lumina::adapters::http::{build_router, DashboardAppState};
use lumina::adapters::validation::JsonSchemaValidator;
use lumina::application::handlers::{GenerateActionPlanHandler, SharedDashboard};
use lumina::config::ServerConfig;
use lumina::domain::dashboard::DashboardState;
use lumina::domain::market::SchemaVariant;
use lumina::ports::{AIError, GroundingChunk};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn core_payload() -> String {
    json!({
        "marketSentiment": "Buoyant",
        "competitorTrends": "Rates rising across the comp set",
        "recommendations": [{
            "category": "Revenue",
            "action": "Raise BAR by 5% on Fridays",
            "goal": "Capture weekend demand",
            "impact": "+2% RevPAR",
            "priority": "High"
        }]
    })
    .to_string()
}

fn app(provider: MockGenerationProvider) -> (Router, SharedDashboard) {
    let dashboard: SharedDashboard = Arc::new(RwLock::new(DashboardState::default()));
    let action_plan = GenerateActionPlanHandler::new(Arc::new(provider), Arc::new(JsonSchemaValidator::new()))
        .with_variant(SchemaVariant::Core);
    let state = DashboardAppState::new(dashboard.clone(), Arc::new(action_plan));
    (build_router(state, &ServerConfig::default()), dashboard)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn dashboard_starts_with_defaults_and_no_analysis() {
    let (app, _) = app(MockGenerationProvider::new());

    let (status, body) = send(&app, get("/api/dashboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["context"],
        json!({
            "city": "London",
            "targetProfitability": 15.0,
            "timeframe": 18,
            "currentRevPAR": 145.0,
            "currentADR": 180.0,
            "currentOccupancy": 82.0
        })
    );
    assert!(body["analysis"].is_null());
    assert!(body["error"].is_null());
    assert_eq!(body["loading"], false);
    assert_eq!(body["projection"].as_array().unwrap().len(), 19);
    assert_eq!(body["projection"][18]["projected"], 115000);
    assert!(body["projection"][18].get("actual").is_none());
}

#[tokio::test]
async fn put_context_replaces_and_reprojects() {
    let (app, dashboard) = app(MockGenerationProvider::new());

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/context",
            json!({
                "city": "Edinburgh",
                "targetProfitability": 10,
                "timeframe": 0,
                "currentRevPAR": 120,
                "currentADR": 150,
                "currentOccupancy": 80
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context"]["city"], "Edinburgh");
    assert_eq!(body["projection"], json!([{"month": "M0", "projected": 100000, "actual": 100000}]));
    assert_eq!(dashboard.read().await.context().city, "Edinburgh");
}

#[tokio::test]
async fn put_with_malformed_body_is_bad_request() {
    let (app, _) = app(MockGenerationProvider::new());

    let (status, body) = send(&app, json_request("PUT", "/api/context", json!({"city": 3}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn oversized_timeframe_is_rejected_on_put_and_patch() {
    let (app, dashboard) = app(MockGenerationProvider::new());

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/context",
            json!({
                "city": "Edinburgh",
                "targetProfitability": 10,
                "timeframe": 4294967295u64,
                "currentRevPAR": 120,
                "currentADR": 150,
                "currentOccupancy": 80
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "Field 'timeframe' must be at most 120");

    let (status, _) = send(
        &app,
        json_request("PATCH", "/api/context", json!({"field": "timeframe", "value": "4294967295"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/projection")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"].as_array().unwrap().len(), 19);
    assert_eq!(dashboard.read().await.context().city, "London");
}

#[tokio::test]
async fn patch_coerces_form_input() {
    let (app, _) = app(MockGenerationProvider::new());

    let (_, body) = send(
        &app,
        json_request("PATCH", "/api/context", json!({"field": "targetProfitability", "value": "20.9"})),
    )
    .await;
    assert_eq!(body["context"]["targetProfitability"], 20.0);

    let (_, body) = send(
        &app,
        json_request("PATCH", "/api/context", json!({"field": "currentOccupancy", "value": "n/a"})),
    )
    .await;
    assert_eq!(body["context"]["currentOccupancy"], 0.0);
}

#[tokio::test]
async fn refresh_uses_latest_context_and_commits_analysis() {
    let provider = MockGenerationProvider::new().with_grounded_response(
        core_payload(),
        vec![GroundingChunk::web("Hotel news", "https://news.example/hotels")],
    );
    let (app, _) = app(provider);

    send(
        &app,
        json_request("PATCH", "/api/context", json!({"field": "city", "value": "Manchester"})),
    )
    .await;
    let (status, body) = send(&app, Request::post("/api/analysis/refresh").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stale"], false);
    assert!(body.get("failureKind").is_none());
    assert_eq!(body["generation"], 1);
    assert_eq!(body["analysis"]["marketSentiment"], "Buoyant");
    assert_eq!(body["analysis"]["recommendations"][0]["priority"], "High");
    assert_eq!(
        body["analysis"]["groundingSources"],
        json!([{"title": "Hotel news", "uri": "https://news.example/hotels"}])
    );

    let (_, dashboard) = send(&app, get("/api/dashboard")).await;
    assert_eq!(dashboard["analysis"], body["analysis"]);
}

#[tokio::test]
async fn refresh_failure_is_reported_in_view() {
    let (app, _) = app(MockGenerationProvider::new().with_error(AIError::AuthenticationFailed));

    let (status, body) = send(&app, Request::post("/api/analysis/refresh").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failureKind"], "request");
    assert_eq!(body["error"], "The analysis service rejected the configured API key");
    assert!(body["analysis"].is_null());
    assert_eq!(body["loading"], false);
}

#[tokio::test]
async fn refresh_with_unparseable_payload_is_parse_failure() {
    let (app, _) = app(MockGenerationProvider::new().with_response("not json"));

    let (_, body) = send(&app, Request::post("/api/analysis/refresh").body(Body::empty()).unwrap()).await;

    assert_eq!(body["failureKind"], "parse");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn projection_endpoint_reports_growth() {
    let (app, _) = app(MockGenerationProvider::new());

    let (status, body) = send(&app, get("/api/projection")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], 18);
    assert_eq!(body["points"][3]["actual"], 102375);
    assert!(body["points"][4].get("actual").is_none());
}
