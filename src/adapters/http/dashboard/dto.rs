//! Data Transfer Objects for dashboard HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{AnalysisError, RefreshAnalysisResult};
use crate::domain::dashboard::DashboardView;
use crate::domain::hotel::{ContextField, HotelContext};
use crate::domain::projection::{ProfitProjection, ProjectionCalculator};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// PATCH /api/context body: raw form input for one field.
#[derive(Debug, Clone, Deserialize)]
pub struct SetFieldRequest {
    pub field: ContextField,
    pub value: RawFieldValue,
}

/// Form input as typed by the user, or already numeric.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFieldValue {
    Text(String),
    Number(f64),
}

impl RawFieldValue {
    pub fn into_text(self) -> String {
        match self {
            RawFieldValue::Text(s) => s,
            RawFieldValue::Number(n) => n.to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/analysis/refresh response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    /// A newer refresh superseded this one; its result was dropped.
    pub stale: bool,
    /// `"request"` or `"parse"` when this refresh failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<&'static str>,
}

impl From<RefreshAnalysisResult> for RefreshResponse {
    fn from(result: RefreshAnalysisResult) -> Self {
        let stale = result.is_stale();
        let failure_kind = result.error.as_ref().map(|e| match e {
            AnalysisError::Request(_) => "request",
            AnalysisError::Parse(_) => "parse",
        });
        Self {
            view: result.view,
            stale,
            failure_kind,
        }
    }
}

/// GET /api/projection response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub target_profitability: f64,
    pub timeframe: u32,
    pub monthly_growth_percent: f64,
    pub points: Vec<ProfitProjection>,
}

impl ProjectionResponse {
    pub fn for_context(context: &HotelContext) -> Self {
        let target = context.target_profitability_percent;
        let months = context.timeframe_months;
        Self {
            target_profitability: target,
            timeframe: months,
            monthly_growth_percent: ProjectionCalculator::monthly_growth(target, months) * 100.0,
            points: ProjectionCalculator::project(target, months),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
