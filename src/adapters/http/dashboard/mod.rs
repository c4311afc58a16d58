//! Dashboard HTTP adapter module.
//!
//! Provides REST API endpoints for the revenue dashboard.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{DashboardApiError, DashboardAppState};
pub use routes::dashboard_routes;
