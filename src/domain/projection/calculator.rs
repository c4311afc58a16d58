//! Profit Projection Calculator - Plan-vs-actual series for the chart.
//!
//! The projection is derived from the context alone; it never waits on the
//! remote analysis.

use serde::{Deserialize, Serialize};

use crate::domain::hotel::HotelContext;

/// Profit at month 0 that every projection grows from.
pub const BASE_PROFIT: f64 = 100_000.0;

/// Months (inclusive, from 0) that carry an illustrative actual value.
pub const ACTUAL_MONTHS: u32 = 3;

/// Growth factor applied to the plan to produce the illustrative actuals.
pub const ACTUAL_DAMPING: f64 = 0.95;

/// One month of the projection series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitProjection {
    /// Month label, `M0` .. `MN`.
    pub month: String,
    /// Planned profit for the month.
    pub projected: i64,
    /// Illustrative actual, present for the first months only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<i64>,
}

/// Calculator for the linear profit projection.
pub struct ProjectionCalculator;

impl ProjectionCalculator {
    /// Projects profit for months `0..=timeframe_months`.
    ///
    /// # Edge Cases
    /// - Zero timeframe: growth rate is treated as 0, yielding one point at base
    /// - Negative target: the series declines linearly
    pub fn project(target_profitability_percent: f64, timeframe_months: u32) -> Vec<ProfitProjection> {
        let monthly_growth = Self::monthly_growth(target_profitability_percent, timeframe_months);

        (0..=timeframe_months)
            .map(|month| {
                let i = f64::from(month);
                let projected = (BASE_PROFIT * (1.0 + monthly_growth * i)).round() as i64;
                let actual = (month <= ACTUAL_MONTHS).then(|| {
                    (BASE_PROFIT * (1.0 + monthly_growth * i * ACTUAL_DAMPING)).round() as i64
                });

                ProfitProjection {
                    month: format!("M{}", month),
                    projected,
                    actual,
                }
            })
            .collect()
    }

    /// Projects profit for a context.
    pub fn for_context(context: &HotelContext) -> Vec<ProfitProjection> {
        Self::project(context.target_profitability_percent, context.timeframe_months)
    }

    /// Fractional growth per month; 0 when there are no months.
    pub fn monthly_growth(target_profitability_percent: f64, timeframe_months: u32) -> f64 {
        if timeframe_months == 0 {
            return 0.0;
        }
        (target_profitability_percent / 100.0) / f64::from(timeframe_months)
    }
}
