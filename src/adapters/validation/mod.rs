//! Validation Adapters - Schema validation implementations.
//!
//! Contains adapters for validating model output against the declared
//! output schema.

mod json_schema_validator;

pub use json_schema_validator::JsonSchemaValidator;
