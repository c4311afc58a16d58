//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `hotel` - The hotel's market context and its headline metrics
//! - `market` - Market analysis result types, output schema and prompt
//! - `projection` - Deterministic local profit projection
//! - `dashboard` - Single-session dashboard state with stale-result guarding

pub mod dashboard;
pub mod foundation;
pub mod hotel;
pub mod market;
pub mod projection;
