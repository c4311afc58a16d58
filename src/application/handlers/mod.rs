//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod dashboard;
pub mod market_analysis;

pub use dashboard::{
    GetDashboardHandler, RefreshAnalysisHandler, RefreshAnalysisResult, SharedDashboard,
    UpdateContextCommand, UpdateContextHandler,
};
pub use market_analysis::{
    extract_grounding_sources, AnalysisError, GenerateActionPlanCommand,
    GenerateActionPlanHandler, ParseFailure,
};
