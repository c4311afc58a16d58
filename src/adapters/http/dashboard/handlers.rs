//! HTTP handlers for dashboard endpoints.
//!
//! These handlers connect Axum routes to the dashboard command and query
//! handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    GenerateActionPlanHandler, GetDashboardHandler, RefreshAnalysisHandler, SharedDashboard,
    UpdateContextCommand, UpdateContextHandler,
};
use crate::domain::dashboard::DashboardView;
use crate::domain::foundation::ValidationError;
use crate::domain::hotel::HotelContext;

use super::dto::{ErrorResponse, ProjectionResponse, RefreshResponse, SetFieldRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Dashboard API error that implements IntoResponse.
#[derive(Debug)]
pub enum DashboardApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for DashboardApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            DashboardApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            DashboardApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<JsonRejection> for DashboardApiError {
    fn from(rejection: JsonRejection) -> Self {
        DashboardApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationError> for DashboardApiError {
    fn from(err: ValidationError) -> Self {
        DashboardApiError::BadRequest(err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing dashboard dependencies.
#[derive(Clone)]
pub struct DashboardAppState {
    pub dashboard: SharedDashboard,
    pub action_plan: Arc<GenerateActionPlanHandler>,
}

impl DashboardAppState {
    pub fn new(dashboard: SharedDashboard, action_plan: Arc<GenerateActionPlanHandler>) -> Self {
        Self {
            dashboard,
            action_plan,
        }
    }

    pub fn get_dashboard_handler(&self) -> GetDashboardHandler {
        GetDashboardHandler::new(self.dashboard.clone())
    }

    pub fn update_context_handler(&self) -> UpdateContextHandler {
        UpdateContextHandler::new(self.dashboard.clone())
    }

    pub fn refresh_analysis_handler(&self) -> RefreshAnalysisHandler {
        RefreshAnalysisHandler::new(self.dashboard.clone(), self.action_plan.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/dashboard
///
/// Returns the context, derived metrics and projection, and the latest
/// analysis or error.
pub async fn get_dashboard(State(state): State<DashboardAppState>) -> Json<DashboardView> {
    Json(state.get_dashboard_handler().handle().await)
}

/// PUT /api/context
///
/// Replaces the whole context. Does not trigger an analysis.
pub async fn replace_context(
    State(state): State<DashboardAppState>,
    body: Result<Json<HotelContext>, JsonRejection>,
) -> Result<Json<DashboardView>, DashboardApiError> {
    let Json(context) = body?;
    let view = state
        .update_context_handler()
        .handle(UpdateContextCommand::Replace(context))
        .await?;
    Ok(Json(view))
}

/// PATCH /api/context
///
/// Applies raw form input to one field, with numeric coercion.
pub async fn set_context_field(
    State(state): State<DashboardAppState>,
    body: Result<Json<SetFieldRequest>, JsonRejection>,
) -> Result<Json<DashboardView>, DashboardApiError> {
    let Json(request) = body?;
    let view = state
        .update_context_handler()
        .handle(UpdateContextCommand::SetField {
            field: request.field,
            value: request.value.into_text(),
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/analysis/refresh
///
/// Runs one analysis for the current context and waits for it. Pipeline
/// failures are reported in the view's `error`, not as an HTTP error.
pub async fn refresh_analysis(State(state): State<DashboardAppState>) -> Json<RefreshResponse> {
    let result = state.refresh_analysis_handler().handle().await;
    Json(RefreshResponse::from(result))
}

/// GET /api/projection
pub async fn get_projection(State(state): State<DashboardAppState>) -> Json<ProjectionResponse> {
    let view = state.get_dashboard_handler().handle().await;
    Json(ProjectionResponse::for_context(&view.context))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
