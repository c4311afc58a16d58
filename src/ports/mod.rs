//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationProvider` - Search-grounded structured generation (LLM API)
//! - `OutputSchemaValidator` - Validation of model output against the declared schema

mod generation_provider;
mod schema_validator;

pub use generation_provider::{
    AIError, FinishReason, GenerationProvider, GenerationRequest, GenerationResponse,
    GroundingChunk, ProviderInfo, RequestMetadata, ResponseFormat, TokenUsage, WebReference,
};
pub use schema_validator::{OutputSchemaValidator, SchemaValidationError};
