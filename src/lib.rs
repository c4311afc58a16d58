//! Lumina - Hotel revenue intelligence service
//!
//! Turns a hotel's market context into a search-grounded, schema-validated
//! market analysis and serves it alongside a local profit projection.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
