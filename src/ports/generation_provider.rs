//! Generation Provider Port - Interface for the remote generation API.
//!
//! This port abstracts the single network boundary of the system: one call
//! that takes a prompt plus generation settings (search grounding, JSON
//! output, response schema) and returns the response text together with any
//! grounding citations the model's search tool produced.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl GenerationProvider for FixedProvider {
//!     async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
//!         Ok(GenerationResponse::text("{}"))
//!     }
//!     // ... provider_info
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::AnalysisRequestId;

/// Port for the remote generation endpoint.
///
/// Implementations perform exactly one remote round trip per call and never
/// cache responses.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate one response for the request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError>;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// Requested shape of the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

impl ResponseFormat {
    /// MIME type the provider is asked to respond with.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text/plain",
            ResponseFormat::Json => "application/json",
        }
    }
}

/// Request for one generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Prompt text sent as the single user turn.
    pub prompt: String,
    /// Requested response format.
    pub response_format: ResponseFormat,
    /// Schema the response must conform to, in the provider's dialect.
    pub response_schema: Option<Value>,
    /// Whether the model may ground its answer with live web search.
    pub search_grounding: bool,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl GenerationRequest {
    /// Creates a plain-text request for a prompt.
    pub fn new(prompt: impl Into<String>, metadata: RequestMetadata) -> Self {
        Self {
            prompt: prompt.into(),
            response_format: ResponseFormat::Text,
            response_schema: None,
            search_grounding: false,
            metadata,
        }
    }

    /// Requests JSON output conforming to `schema`.
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.response_format = ResponseFormat::Json;
        self.response_schema = Some(schema);
        self
    }

    /// Enables the search-grounding tool.
    pub fn with_search_grounding(mut self) -> Self {
        self.search_grounding = true;
        self
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Analysis request this generation belongs to.
    pub request_id: AnalysisRequestId,
    /// Trace ID for distributed tracing.
    pub trace_id: String,
}

impl RequestMetadata {
    /// Creates new request metadata.
    pub fn new(request_id: AnalysisRequestId, trace_id: impl Into<String>) -> Self {
        Self {
            request_id,
            trace_id: trace_id.into(),
        }
    }

    /// Metadata whose trace id is the request id.
    pub fn for_request(request_id: AnalysisRequestId) -> Self {
        Self::new(request_id, request_id.to_string())
    }
}

/// Response from one generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    /// Generated text; `None` when the provider returned no text part.
    pub text: Option<String>,
    /// Grounding chunks from the search tool, in provider order.
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Token usage.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl GenerationResponse {
    /// A response carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Adds grounding chunks.
    pub fn with_grounding_chunks(mut self, chunks: Vec<GroundingChunk>) -> Self {
        self.grounding_chunks = chunks;
        self
    }
}

/// One grounding chunk. Only chunks with a web reference become citations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebReference>,
}

impl GroundingChunk {
    /// A chunk pointing at a web page.
    pub fn web(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            web: Some(WebReference {
                title: Some(title.into()),
                uri: Some(uri.into()),
            }),
        }
    }

    /// A chunk from some other grounding source.
    pub fn other() -> Self {
        Self { web: None }
    }
}

/// Web page reference inside a grounding chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens as reported by the provider.
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    #[default]
    Stop,
    /// Hit the output token limit.
    MaxTokens,
    /// Blocked for safety.
    Safety,
    /// Blocked for reciting source material.
    Recitation,
    /// Anything else the provider reports.
    Other,
}

/// Provider information and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini").
    pub name: String,
    /// Model identifier.
    pub model: String,
    /// Whether the search-grounding tool is available.
    pub supports_search_grounding: bool,
    /// Whether responses can be constrained by a schema.
    pub supports_response_schema: bool,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            supports_search_grounding: false,
            supports_response_schema: false,
        }
    }

    /// Sets search-grounding support.
    pub fn with_search_grounding(mut self, supports: bool) -> Self {
        self.supports_search_grounding = supports;
        self
    }

    /// Sets response-schema support.
    pub fn with_response_schema(mut self, supports: bool) -> Self {
        self.supports_response_schema = supports;
        self
    }
}

/// Generation provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Prompt or response was blocked.
    #[error("content filtered: {reason}")]
    ContentFiltered {
        /// Reason for filtering.
        reason: String,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider's response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a content filtered error.
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
