//! Market analysis handlers.

mod errors;
mod generate_action_plan;

pub use errors::{AnalysisError, ParseFailure};
pub use generate_action_plan::{
    extract_grounding_sources, GenerateActionPlanCommand, GenerateActionPlanHandler,
};
