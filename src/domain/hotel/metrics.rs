//! Headline metrics shown above the projection chart.

use serde::{Deserialize, Serialize};

use super::HotelContext;

/// The four headline figures derived from a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    #[serde(rename = "currentRevPAR")]
    pub current_revpar: f64,
    #[serde(rename = "currentADR")]
    pub current_adr: f64,
    #[serde(rename = "currentOccupancy")]
    pub current_occupancy_percent: f64,
    /// Target profitability spread evenly over the timeframe, percent per month.
    pub profit_velocity_percent: f64,
}

impl KeyMetrics {
    /// Derives the metrics from a context.
    ///
    /// A zero timeframe yields a velocity of 0 instead of dividing by zero.
    pub fn from_context(context: &HotelContext) -> Self {
        let profit_velocity_percent = if context.timeframe_months == 0 {
            0.0
        } else {
            context.target_profitability_percent / f64::from(context.timeframe_months)
        };

        Self {
            current_revpar: context.current_revpar,
            current_adr: context.current_adr,
            current_occupancy_percent: context.current_occupancy_percent,
            profit_velocity_percent,
        }
    }

    /// Velocity formatted for display with its sign, e.g. `+0.8%/mo`.
    pub fn profit_velocity_label(&self) -> String {
        format!("{:+.1}%/mo", self.profit_velocity_percent)
    }
}
