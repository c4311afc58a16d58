//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Field '{field}' must be at most {max}")]
    OutOfRange { field: String, max: u64 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown field validation error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        ValidationError::UnknownField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, max: u64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("city");
        assert_eq!(format!("{}", err), "Field 'city' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("timeframe", "not a number");
        assert_eq!(
            format!("{}", err),
            "Field 'timeframe' has invalid format: not a number"
        );
    }

    #[test]
    fn validation_error_unknown_field_displays_correctly() {
        let err = ValidationError::unknown_field("starRating");
        assert_eq!(format!("{}", err), "Unknown field 'starRating'");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("timeframe", 120);
        assert_eq!(format!("{}", err), "Field 'timeframe' must be at most 120");
    }
}
