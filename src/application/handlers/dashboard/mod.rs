//! Dashboard command and query handlers.
//!
//! The dashboard is a single session held in memory behind a shared lock.

mod get_dashboard;
mod refresh_analysis;
mod update_context;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::dashboard::DashboardState;

/// Dashboard state shared between handlers and the HTTP layer.
pub type SharedDashboard = Arc<RwLock<DashboardState>>;

pub use get_dashboard::GetDashboardHandler;
pub use refresh_analysis::{RefreshAnalysisHandler, RefreshAnalysisResult};
pub use update_context::{UpdateContextCommand, UpdateContextHandler};
