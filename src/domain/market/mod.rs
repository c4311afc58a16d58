//! Market module - What the analysis asks for and what it returns.
//!
//! - `analysis` - Typed market-analysis result
//! - `schema` - Language-neutral output schema, one per [`SchemaVariant`]
//! - `prompt` - Natural-language instruction embedding the hotel context

mod analysis;
mod prompt;
mod schema;

pub use analysis::{
    AnalysisBody, GroundingSource, GuestSegment, MarketAnalysis, PersonalizedOffer, Priority,
    RateAdjustment, Recommendation,
};
pub use prompt::PromptBuilder;
pub use schema::{SchemaNode, SchemaProperty, SchemaVariant};
