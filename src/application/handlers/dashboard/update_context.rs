//! UpdateContextHandler - Command handler for editing the hotel context.
//!
//! Editing the context never triggers an analysis; a refresh does.

use tracing::{debug, warn};

use crate::domain::dashboard::DashboardView;
use crate::domain::foundation::ValidationError;
use crate::domain::hotel::{ContextField, HotelContext};

use super::SharedDashboard;

/// Command to edit the context.
#[derive(Debug, Clone)]
pub enum UpdateContextCommand {
    /// Replace every field.
    Replace(HotelContext),
    /// Apply raw form input to one field, with numeric coercion.
    SetField { field: ContextField, value: String },
}

/// Handler for context edits.
pub struct UpdateContextHandler {
    state: SharedDashboard,
}

impl UpdateContextHandler {
    pub fn new(state: SharedDashboard) -> Self {
        Self { state }
    }

    pub async fn handle(&self, cmd: UpdateContextCommand) -> Result<DashboardView, ValidationError> {
        let mut state = self.state.write().await;

        let result = match cmd {
            UpdateContextCommand::Replace(context) => {
                debug!(city = %context.city, "Replacing hotel context");
                state.update_context(context)
            }
            UpdateContextCommand::SetField { field, value } => {
                debug!(field = %field, "Updating hotel context field");
                state.set_field(field, &value)
            }
        };

        if let Err(e) = &result {
            warn!(error = %e, "Rejected hotel context edit");
        }
        result?;

        Ok(state.view())
    }
}
