//! Dashboard module - The single-session state behind the dashboard.

mod state;

pub use state::{CommitOutcome, DashboardState, DashboardView, RequestTicket, DEFAULT_ERROR_MESSAGE};
