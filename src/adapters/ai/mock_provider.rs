//! Mock Generation Provider for testing.
//!
//! Provides a configurable mock implementation of the GenerationProvider port,
//! allowing tests to run without calling the real generation API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in call order
//! - Grounding chunks attached to responses
//! - Simulated delays, globally or per response
//! - Error injection for failure-path testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockGenerationProvider::new()
//!     .with_response(r#"{"marketSentiment": "..."}"#)
//!     .with_delay(Duration::from_millis(100));
//!
//! let response = provider.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, FinishReason, GenerationProvider, GenerationRequest, GenerationResponse,
    GroundingChunk, ProviderInfo, TokenUsage,
};

/// Mock generation provider for testing.
#[derive(Debug, Clone)]
pub struct MockGenerationProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful generation.
    Success {
        text: Option<String>,
        grounding_chunks: Vec<GroundingChunk>,
        delay: Duration,
    },
    /// Return an error.
    Error(AIError),
}

impl Default for MockGenerationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1")
                .with_search_grounding(true)
                .with_response_schema(true),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful text response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            text: Some(text.into()),
            grounding_chunks: Vec::new(),
            delay: Duration::ZERO,
        })
    }

    /// Adds a successful response carrying grounding chunks.
    pub fn with_grounded_response(
        self,
        text: impl Into<String>,
        grounding_chunks: Vec<GroundingChunk>,
    ) -> Self {
        self.push(MockResponse::Success {
            text: Some(text.into()),
            grounding_chunks,
            delay: Duration::ZERO,
        })
    }

    /// Adds a successful response that arrives after `delay`.
    pub fn with_delayed_response(self, text: impl Into<String>, delay: Duration) -> Self {
        self.push(MockResponse::Success {
            text: Some(text.into()),
            grounding_chunks: Vec::new(),
            delay,
        })
    }

    /// Adds a response with no text part.
    pub fn with_empty_response(self) -> Self {
        self.push(MockResponse::Success {
            text: None,
            grounding_chunks: Vec::new(),
            delay: Duration::ZERO,
        })
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error))
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Gets the next response or a default empty JSON object.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                text: Some("{}".to_string()),
                grounding_chunks: Vec::new(),
                delay: Duration::ZERO,
            })
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
        self.calls.lock().unwrap().push(request);

        // Taken before sleeping so overlapping calls keep their queue order
        let response = self.next_response();

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match response {
            MockResponse::Success {
                text,
                grounding_chunks,
                delay,
            } => {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                Ok(GenerationResponse {
                    text,
                    grounding_chunks,
                    usage: TokenUsage::new(10, 20),
                    model: self.info.model.clone(),
                    finish_reason: FinishReason::Stop,
                })
            }
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AnalysisRequestId;
    use crate::ports::RequestMetadata;

    fn test_request() -> GenerationRequest {
        GenerationRequest::new("Hello", RequestMetadata::for_request(AnalysisRequestId::new()))
    }

    #[tokio::test]
    async fn mock_provider_returns_configured_response() {
        let provider = MockGenerationProvider::new().with_response("Hello from mock!");

        let response = provider.generate(test_request()).await.unwrap();

        assert_eq!(response.text.as_deref(), Some("Hello from mock!"));
        assert_eq!(response.model, "mock-model-1");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn mock_provider_returns_responses_in_order() {
        let provider = MockGenerationProvider::new()
            .with_response("First")
            .with_response("Second");

        let r1 = provider.generate(test_request()).await.unwrap();
        let r2 = provider.generate(test_request()).await.unwrap();

        assert_eq!(r1.text.as_deref(), Some("First"));
        assert_eq!(r2.text.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn mock_provider_returns_default_after_exhausted() {
        let provider = MockGenerationProvider::new().with_response("Only one");

        provider.generate(test_request()).await.unwrap();
        let r2 = provider.generate(test_request()).await.unwrap();

        assert_eq!(r2.text.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn mock_provider_returns_configured_error() {
        let provider = MockGenerationProvider::new().with_error(AIError::rate_limited(30));

        let err = provider.generate(test_request()).await.unwrap_err();

        assert_eq!(err, AIError::RateLimited { retry_after_secs: 30 });
    }

    #[tokio::test]
    async fn mock_provider_returns_grounding_chunks() {
        let provider = MockGenerationProvider::new().with_grounded_response(
            "{}",
            vec![GroundingChunk::web("A", "https://a.example"), GroundingChunk::other()],
        );

        let response = provider.generate(test_request()).await.unwrap();

        assert_eq!(response.grounding_chunks.len(), 2);
    }

    #[tokio::test]
    async fn mock_provider_can_omit_text() {
        let provider = MockGenerationProvider::new().with_empty_response();
        let response = provider.generate(test_request()).await.unwrap();
        assert!(response.text.is_none());
    }

    #[tokio::test]
    async fn mock_provider_tracks_calls() {
        let provider = MockGenerationProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.generate(test_request()).await.unwrap();
        provider.generate(test_request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].prompt, "Hello");
    }

    #[tokio::test]
    async fn mock_provider_respects_delay() {
        let provider = MockGenerationProvider::new()
            .with_response("Delayed response")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.generate(test_request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn mock_provider_returns_info() {
        let provider = MockGenerationProvider::new()
            .with_provider_info(ProviderInfo::new("custom", "custom-model"));

        let info = provider.provider_info();
        assert_eq!(info.name, "custom");
        assert_eq!(info.model, "custom-model");
        assert!(!info.supports_search_grounding);
    }
}
