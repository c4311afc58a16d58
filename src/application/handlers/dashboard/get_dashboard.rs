//! GetDashboardHandler - Query handler for the current dashboard view.

use crate::domain::dashboard::DashboardView;

use super::SharedDashboard;

/// Handler for reading the dashboard.
pub struct GetDashboardHandler {
    state: SharedDashboard,
}

impl GetDashboardHandler {
    pub fn new(state: SharedDashboard) -> Self {
        Self { state }
    }

    pub async fn handle(&self) -> DashboardView {
        self.state.read().await.view()
    }
}
