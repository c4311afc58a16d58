//! Analysis errors - the two ways an action-plan request can fail.

use thiserror::Error;

use crate::ports::{AIError, SchemaValidationError};

/// Failure of one action-plan request.
///
/// There is no partial success: either every required field arrived and
/// decoded, or the whole request is one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The remote call failed (transport, credentials, quota, timeout).
    #[error("analysis request failed: {0}")]
    Request(#[from] AIError),

    /// The call succeeded but the payload was unusable.
    #[error("analysis response unusable: {0}")]
    Parse(#[from] ParseFailure),
}

/// Why a response payload was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseFailure {
    #[error("response contained no text")]
    MissingText,

    #[error("response was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response did not match the output schema: {0}")]
    Schema(#[from] SchemaValidationError),

    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl AnalysisError {
    /// Message suitable for showing on the dashboard.
    ///
    /// Never echoes model output back.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Request(AIError::AuthenticationFailed) => {
                "The analysis service rejected the configured API key".to_string()
            }
            AnalysisError::Request(AIError::RateLimited { retry_after_secs }) => format!(
                "The analysis service is rate limiting requests; try again in {}s",
                retry_after_secs
            ),
            AnalysisError::Request(AIError::Timeout { timeout_secs }) => {
                format!("The analysis timed out after {}s", timeout_secs)
            }
            AnalysisError::Request(err) => format!("Failed to fetch market analysis: {}", err),
            AnalysisError::Parse(ParseFailure::Schema(err)) => format!(
                "Market analysis was incomplete: {}",
                err.to_client_message()
            ),
            AnalysisError::Parse(_) => "Market analysis response could not be read".to_string(),
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, AnalysisError::Request(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, AnalysisError::Parse(_))
    }
}
