//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generation providers (Gemini, mock)
//! - `validation` - Output schema validation
//! - `http` - REST API (axum)

pub mod ai;
pub mod http;
pub mod validation;

pub use ai::{GeminiConfig, GeminiProvider, MockGenerationProvider};
pub use http::{build_router, DashboardAppState};
pub use validation::JsonSchemaValidator;
