//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalysisError, GenerateActionPlanCommand, GenerateActionPlanHandler, GetDashboardHandler,
    ParseFailure, RefreshAnalysisHandler, RefreshAnalysisResult, SharedDashboard,
    UpdateContextCommand, UpdateContextHandler,
};
