//! Schema Validator Port - Model output validation interface.
//!
//! The generation API is asked to conform to a schema, but nothing guarantees
//! it did. This port checks a parsed response against the same
//! [`SchemaNode`] tree before any typed decoding happens.

use serde_json::Value;
use thiserror::Error;

use crate::domain::market::SchemaNode;

/// Port for validating model output against a declared schema.
///
/// # Contract
///
/// Implementations must:
/// - Reject any missing required property, at any depth
/// - Reject values whose JSON type differs from the declared type
/// - Reject strings outside a declared enum
/// - Accept optional properties that are absent or `null`
pub trait OutputSchemaValidator: Send + Sync {
    /// Validate output against a schema.
    ///
    /// Returns `Ok(())` if valid, `Err` with every violation found if not.
    fn validate(&self, schema: &SchemaNode, output: &Value) -> Result<(), SchemaValidationError>;
}

/// Errors that can occur during schema validation.
///
/// # Security
///
/// These errors contain detailed information for debugging. When returning
/// errors to clients, use `to_client_message()` to get sanitized versions
/// that don't echo model output back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid value for field {field}: expected one of {allowed:?}, got '{actual}'")]
    InvalidEnumValue {
        field: String,
        allowed: Vec<String>,
        actual: String,
    },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Convert to client-safe error message.
    pub fn to_client_message(&self) -> String {
        match self {
            SchemaValidationError::MissingRequired { field } => {
                format!("Missing required field: {}", field)
            }
            SchemaValidationError::InvalidType { field, expected, .. } => {
                format!("Invalid type for field '{}': expected {}", field, expected)
            }
            SchemaValidationError::InvalidEnumValue { field, allowed, .. } => {
                format!("Field '{}' must be one of: {}", field, allowed.join(", "))
            }
            SchemaValidationError::Multiple(errors) => {
                // First error only; the full list goes to the logs
                errors
                    .first()
                    .map(|e| e.to_client_message())
                    .unwrap_or_else(|| "Validation failed".to_string())
            }
        }
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }

    /// Flattens into individual errors.
    pub fn into_errors(self) -> Vec<SchemaValidationError> {
        match self {
            SchemaValidationError::Multiple(errors) => errors,
            other => vec![other],
        }
    }
}
