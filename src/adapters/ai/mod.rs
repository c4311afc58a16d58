//! Generation Provider Adapters.
//!
//! Implementations of the GenerationProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini `generateContent` with search grounding
//! - `MockGenerationProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use mock_provider::{MockGenerationProvider, MockResponse};
