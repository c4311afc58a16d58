//! Gemini Provider - Implementation of GenerationProvider for Google's Gemini API.
//!
//! Calls the `generateContent` REST endpoint once per request, with the
//! Google Search tool enabled for grounding and the response constrained to
//! JSON by an attached `responseSchema`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-3-flash-preview")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! # Grounding
//!
//! Citations come back in `candidates[0].groundingMetadata.groundingChunks`.
//! They are passed through untouched; turning them into citations is the
//! caller's concern.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::ports::{
    AIError, FinishReason, GenerationProvider, GenerationRequest, GenerationResponse,
    GroundingChunk, ProviderInfo, TokenUsage,
};

/// Default model identifier.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Default API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-3-flash-preview").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a new configuration from an already-wrapped API key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends the request, mapping transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, AIError> {
        let body = to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Passes successful responses through; maps error statuses.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), model = %self.config.model, "Gemini returned an error status");

        Err(map_error_status(status.as_u16(), &error_body))
    }

    /// Parses a successful response.
    async fn parse_response(&self, response: Response) -> Result<GenerationResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_generation_response(gemini_response, &self.config.model)
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
        debug!(
            request_id = %request.metadata.request_id,
            trace_id = %request.metadata.trace_id,
            model = %self.config.model,
            search_grounding = request.search_grounding,
            "Sending generateContent request"
        );

        let response = self.send_request(&request).await?;
        let generation = self.parse_response(response).await?;

        debug!(
            request_id = %request.metadata.request_id,
            prompt_tokens = generation.usage.prompt_tokens,
            completion_tokens = generation.usage.completion_tokens,
            grounding_chunks = generation.grounding_chunks.len(),
            "Received generateContent response"
        );

        Ok(generation)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
            .with_search_grounding(true)
            .with_response_schema(true)
    }
}

/// Converts our request to Gemini's format.
fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
    let tools = if request.search_grounding {
        vec![GeminiTool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(request.prompt.clone()),
            }],
        }],
        tools,
        generation_config: GenerationConfig {
            response_mime_type: request.response_format.mime_type().to_string(),
            response_schema: request.response_schema.clone(),
        },
    }
}

/// Maps an error status and body to a provider error.
fn map_error_status(status: u16, error_body: &str) -> AIError {
    let message = error_message(error_body);

    match status {
        401 | 403 => AIError::AuthenticationFailed,
        // Invalid keys come back as 400 INVALID_ARGUMENT
        400 if message.contains("API key not valid") => AIError::AuthenticationFailed,
        400 => AIError::InvalidRequest(message),
        429 => AIError::rate_limited(parse_retry_after(error_body)),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, message)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, message)),
    }
}

/// Extracts `error.message` from an error body, or returns the body itself.
fn error_message(error_body: &str) -> String {
    serde_json::from_str::<Value>(error_body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| error_body.to_string())
}

/// Parses the `RetryInfo.retryDelay` (e.g. `"17s"`) from a 429 body.
fn parse_retry_after(error_body: &str) -> u32 {
    let parsed = match serde_json::from_str::<Value>(error_body) {
        Ok(v) => v,
        Err(_) => return 30,
    };

    parsed
        .get("error")
        .and_then(|e| e.get("details"))
        .and_then(|d| d.as_array())
        .and_then(|details| {
            details
                .iter()
                .filter_map(|d| d.get("retryDelay").and_then(|r| r.as_str()))
                .find_map(|delay| {
                    let secs = delay.trim_end_matches('s');
                    secs.parse::<f64>().ok().map(|s| s.ceil() as u32)
                })
        })
        .unwrap_or(30)
}

/// Converts a decoded Gemini response into the port's response.
fn into_generation_response(
    response: GeminiResponse,
    configured_model: &str,
) -> Result<GenerationResponse, AIError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(AIError::content_filtered(reason));
    }

    let usage = response
        .usage_metadata
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        })
        .unwrap_or_default();

    let model = response
        .model_version
        .unwrap_or_else(|| configured_model.to_string());

    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            return Ok(GenerationResponse {
                usage,
                model,
                ..GenerationResponse::default()
            })
        }
    };

    let finish_reason = match candidate.finish_reason.as_deref() {
        None | Some("STOP") => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("SAFETY") => FinishReason::Safety,
        Some("RECITATION") => FinishReason::Recitation,
        Some(_) => FinishReason::Other,
    };

    let text = candidate.content.and_then(|content| {
        let joined: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!joined.is_empty()).then_some(joined)
    });

    if text.is_none() && finish_reason == FinishReason::Safety {
        return Err(AIError::content_filtered("SAFETY"));
    }

    let grounding_chunks = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default();

    Ok(GenerationResponse {
        text,
        grounding_chunks,
        usage,
        model,
        finish_reason,
    })
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
