//! Projection module - Local, deterministic profit projection.

mod calculator;

pub use calculator::{ProfitProjection, ProjectionCalculator, ACTUAL_DAMPING, ACTUAL_MONTHS, BASE_PROFIT};
