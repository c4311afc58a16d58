//! GenerateActionPlanHandler - Turns a hotel context into a market analysis.
//!
//! One remote call per command: the prompt and output schema are built from
//! the context, the provider is asked for schema-conforming JSON with search
//! grounding enabled, and the payload is validated before decoding. Citations
//! are taken from the grounding metadata of the same response.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::foundation::AnalysisRequestId;
use crate::domain::hotel::HotelContext;
use crate::domain::market::{AnalysisBody, GroundingSource, MarketAnalysis, PromptBuilder, SchemaVariant};
use crate::ports::{
    AIError, GenerationProvider, GenerationRequest, GenerationResponse, GroundingChunk,
    OutputSchemaValidator, RequestMetadata,
};

use super::errors::{AnalysisError, ParseFailure};

/// Command to generate an action plan for a context snapshot.
#[derive(Debug, Clone)]
pub struct GenerateActionPlanCommand {
    pub context: HotelContext,
    pub request_id: AnalysisRequestId,
}

impl GenerateActionPlanCommand {
    pub fn new(context: HotelContext) -> Self {
        Self {
            context,
            request_id: AnalysisRequestId::new(),
        }
    }

    pub fn with_request_id(mut self, request_id: AnalysisRequestId) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Handler for generating action plans.
pub struct GenerateActionPlanHandler {
    provider: Arc<dyn GenerationProvider>,
    validator: Arc<dyn OutputSchemaValidator>,
    variant: SchemaVariant,
    timeout: Option<Duration>,
}

impl GenerateActionPlanHandler {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        validator: Arc<dyn OutputSchemaValidator>,
    ) -> Self {
        Self {
            provider,
            validator,
            variant: SchemaVariant::default(),
            timeout: None,
        }
    }

    /// Selects which substructures are requested.
    pub fn with_variant(mut self, variant: SchemaVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Fails the call with a timeout error once `timeout` elapses.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub async fn handle(
        &self,
        cmd: GenerateActionPlanCommand,
    ) -> Result<MarketAnalysis, AnalysisError> {
        let request_id = cmd.request_id;
        let schema = self.variant.output_schema();

        // 1. Build the request
        let prompt = PromptBuilder::new(self.variant).build(&cmd.context);
        let request = GenerationRequest::new(prompt, RequestMetadata::for_request(request_id))
            .with_json_schema(schema.to_response_schema())
            .with_search_grounding();

        info!(
            request_id = %request_id,
            city = %cmd.context.city,
            variant = ?self.variant,
            provider = %self.provider.provider_info().name,
            "Requesting market analysis"
        );

        // 2. Invoke the provider exactly once
        let response = self.generate(request).await.map_err(|e| {
            warn!(request_id = %request_id, error = %e, "Market analysis request failed");
            AnalysisError::Request(e)
        })?;

        debug!(
            request_id = %request_id,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "Market analysis response received"
        );

        // 3. Parse, validate and decode
        let body = self.parse_body(response.text.as_deref()).map_err(|e| {
            warn!(request_id = %request_id, error = %e, "Market analysis response rejected");
            AnalysisError::Parse(e)
        })?;

        // 4. Citations from the same response
        let sources = extract_grounding_sources(&response.grounding_chunks);

        info!(
            request_id = %request_id,
            recommendations = body.recommendations.len(),
            segments = body.segments.len(),
            sources = sources.len(),
            "Market analysis ready"
        );

        Ok(MarketAnalysis::assemble(request_id, body, sources))
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.generate(request))
                .await
                .map_err(|_| AIError::Timeout {
                    // Round up so a sub-second limit never reports 0s.
                    timeout_secs: limit.as_secs_f64().ceil() as u64,
                })?,
            None => self.provider.generate(request).await,
        }
    }

    fn parse_body(&self, text: Option<&str>) -> Result<AnalysisBody, ParseFailure> {
        let text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ParseFailure::MissingText)?;

        let value: Value =
            serde_json::from_str(text).map_err(|e| ParseFailure::InvalidJson(e.to_string()))?;

        self.validator.validate(self.variant.output_schema(), &value)?;

        serde_json::from_value(value).map_err(|e| ParseFailure::Decode(e.to_string()))
    }
}

/// Turns grounding chunks into citations.
///
/// Web chunks become `{title, uri}` in order; other chunks are skipped. A
/// missing title falls back to the uri, a missing uri to the empty string.
pub fn extract_grounding_sources(chunks: &[GroundingChunk]) -> Vec<GroundingSource> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| {
            let uri = web.uri.clone().unwrap_or_default();
            let title = web
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| uri.clone());
            GroundingSource { title, uri }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationProvider;
    use crate::adapters::validation::JsonSchemaValidator;
    use crate::domain::market::Priority;
    use crate::ports::WebReference;
    use serde_json::json;

    fn core_payload() -> String {
        json!({
            "marketSentiment": "Demand is firm ahead of the festival season",
            "competitorTrends": "Nearby hotels holding rate",
            "recommendations": [
                {"category": "Revenue", "action": "Open a premium room tier", "goal": "Lift ADR", "impact": "+3% ADR", "priority": "High"},
                {"category": "Tech", "action": "Automate upsell emails", "goal": "Ancillary revenue", "impact": "+1% RevPAR", "priority": "Low"}
            ]
        })
        .to_string()
    }

    fn handler(provider: MockGenerationProvider, variant: SchemaVariant) -> (GenerateActionPlanHandler, Arc<MockGenerationProvider>) {
        let provider = Arc::new(provider);
        let handler = GenerateActionPlanHandler::new(provider.clone(), Arc::new(JsonSchemaValidator::new()))
            .with_variant(variant);
        (handler, provider)
    }

    #[tokio::test]
    async fn core_round_trip() {
        let (handler, _) = handler(
            MockGenerationProvider::new().with_response(core_payload()),
            SchemaVariant::Core,
        );

        let analysis = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap();

        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(analysis.recommendations[0].priority, Priority::High);
        assert!(analysis.segments.is_empty());
        assert!(analysis.grounding_sources.is_empty());
    }

    #[tokio::test]
    async fn request_carries_schema_search_and_prompt() {
        let (handler, provider) = handler(
            MockGenerationProvider::new().with_response(core_payload()),
            SchemaVariant::Core,
        );
        let cmd = GenerateActionPlanCommand::new(HotelContext::default());
        let request_id = cmd.request_id;

        handler.handle(cmd).await.unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert!(request.search_grounding);
        assert!(request.prompt.contains("London"));
        assert_eq!(request.metadata.request_id, request_id);
        assert_eq!(
            request.response_schema.as_ref().unwrap()["required"],
            json!(["marketSentiment", "competitorTrends", "recommendations"])
        );
    }

    #[tokio::test]
    async fn returned_request_id_matches_command() {
        let (handler, _) = handler(
            MockGenerationProvider::new().with_response(core_payload()),
            SchemaVariant::Core,
        );
        let id = AnalysisRequestId::new();

        let analysis = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()).with_request_id(id))
            .await
            .unwrap();

        assert_eq!(analysis.request_id, id);
    }

    #[tokio::test]
    async fn extended_variant_requires_segments() {
        let (handler, _) = handler(
            MockGenerationProvider::new().with_response(core_payload()),
            SchemaVariant::Extended,
        );

        let err = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Parse(ParseFailure::Schema(_))));
    }

    #[tokio::test]
    async fn empty_text_is_parse_error() {
        let (handler, _) = handler(MockGenerationProvider::new().with_empty_response(), SchemaVariant::Core);

        let err = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::Parse(ParseFailure::MissingText));
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let (handler, _) = handler(
            MockGenerationProvider::new().with_response("Here is your plan: ..."),
            SchemaVariant::Core,
        );

        let err = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Parse(ParseFailure::InvalidJson(_))));
    }

    #[tokio::test]
    async fn provider_error_is_request_error() {
        let (handler, provider) = handler(
            MockGenerationProvider::new().with_error(AIError::AuthenticationFailed),
            SchemaVariant::Core,
        );

        let err = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::Request(AIError::AuthenticationFailed));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn timeout_is_request_error() {
        let (handler, _) = handler(
            MockGenerationProvider::new().with_delayed_response(core_payload(), Duration::from_millis(200)),
            SchemaVariant::Core,
        );
        let handler = handler.with_timeout(Duration::from_millis(20));

        let err = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::Request(AIError::Timeout { timeout_secs: 1 }));
        assert_eq!(err.user_message(), "The analysis timed out after 1s");
    }

    #[tokio::test]
    async fn fractional_timeout_rounds_up() {
        let (handler, _) = handler(
            MockGenerationProvider::new().with_delayed_response(core_payload(), Duration::from_secs(5)),
            SchemaVariant::Core,
        );
        let handler = handler.with_timeout(Duration::from_millis(1500));

        let err = handler
            .handle(GenerateActionPlanCommand::new(HotelContext::default()))
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::Request(AIError::Timeout { timeout_secs: 2 }));
    }

    #[test]
    fn grounding_sources_keep_order_and_skip_non_web() {
        let chunks = vec![
            GroundingChunk::web("STR weekly", "https://str.example/weekly"),
            GroundingChunk::other(),
            GroundingChunk::web("City events", "https://events.example"),
        ];

        let sources = extract_grounding_sources(&chunks);

        assert_eq!(
            sources,
            vec![
                GroundingSource { title: "STR weekly".into(), uri: "https://str.example/weekly".into() },
                GroundingSource { title: "City events".into(), uri: "https://events.example".into() },
            ]
        );
    }

    #[test]
    fn grounding_sources_keep_duplicates() {
        let chunk = GroundingChunk::web("Same", "https://same.example");
        assert_eq!(extract_grounding_sources(&[chunk.clone(), chunk]).len(), 2);
    }

    #[test]
    fn missing_title_falls_back_to_uri() {
        let chunks = vec![
            GroundingChunk {
                web: Some(WebReference { title: None, uri: Some("https://a.example".into()) }),
            },
            GroundingChunk {
                web: Some(WebReference { title: Some("No link".into()), uri: None }),
            },
        ];

        let sources = extract_grounding_sources(&chunks);

        assert_eq!(sources[0].title, "https://a.example");
        assert_eq!(sources[1].uri, "");
        assert_eq!(sources[1].title, "No link");
    }

    #[test]
    fn no_chunks_yield_no_sources() {
        assert!(extract_grounding_sources(&[]).is_empty());
    }
}
