//! Hotel module - The user's market context and derived headline metrics.

mod context;
mod metrics;

pub use context::{ContextField, HotelContext, MAX_TIMEFRAME_MONTHS};
pub use metrics::KeyMetrics;
