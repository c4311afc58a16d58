//! JSON Schema Validator - Implementation of OutputSchemaValidator.
//!
//! Walks a parsed model response alongside a [`SchemaNode`] tree and collects
//! every violation rather than stopping at the first one.

use serde_json::{Map, Value};

use crate::domain::market::SchemaNode;
use crate::ports::{OutputSchemaValidator, SchemaValidationError};

/// Manual validator over [`SchemaNode`] trees.
///
/// # Thread Safety
///
/// This struct is `Send + Sync` and can be shared across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self
    }

    fn validate_node(
        &self,
        schema: &SchemaNode,
        value: &Value,
        path: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        match schema {
            SchemaNode::Object { properties } => {
                let obj = match self.require_object(value, path) {
                    Ok(obj) => obj,
                    Err(e) => return errors.push(e),
                };
                for prop in properties {
                    let field_path = Self::join(path, &prop.name);
                    match obj.get(&prop.name) {
                        None | Some(Value::Null) if prop.required => {
                            errors.push(SchemaValidationError::MissingRequired { field: field_path });
                        }
                        None | Some(Value::Null) => {}
                        Some(child) => self.validate_node(&prop.schema, child, &field_path, errors),
                    }
                }
            }
            SchemaNode::Array { items } => match value.as_array() {
                Some(arr) => {
                    for (i, item) in arr.iter().enumerate() {
                        self.validate_node(items, item, &format!("{}[{}]", path, i), errors);
                    }
                }
                None => errors.push(Self::invalid_type(path, "array", value)),
            },
            SchemaNode::String { allowed } => match value.as_str() {
                Some(s) if !allowed.is_empty() && !allowed.iter().any(|a| a == s) => {
                    errors.push(SchemaValidationError::InvalidEnumValue {
                        field: path.to_string(),
                        allowed: allowed.clone(),
                        actual: s.to_string(),
                    });
                }
                Some(_) => {}
                None => errors.push(Self::invalid_type(path, "string", value)),
            },
            SchemaNode::Number => {
                if !value.is_number() {
                    errors.push(Self::invalid_type(path, "number", value));
                }
            }
        }
    }

    fn require_object<'a>(
        &self,
        value: &'a Value,
        path: &str,
    ) -> Result<&'a Map<String, Value>, SchemaValidationError> {
        value
            .as_object()
            .ok_or_else(|| Self::invalid_type(path, "object", value))
    }

    fn invalid_type(path: &str, expected: &str, value: &Value) -> SchemaValidationError {
        SchemaValidationError::InvalidType {
            field: if path.is_empty() { "root".to_string() } else { path.to_string() },
            expected: expected.to_string(),
            actual: Self::type_name(value),
        }
    }

    fn join(parent: &str, field: &str) -> String {
        if parent.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", parent, field)
        }
    }

    fn type_name(value: &Value) -> String {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }

    fn collect_errors(mut errors: Vec<SchemaValidationError>) -> Result<(), SchemaValidationError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SchemaValidationError::Multiple(errors)),
        }
    }
}

impl OutputSchemaValidator for JsonSchemaValidator {
    fn validate(&self, schema: &SchemaNode, output: &Value) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();
        self.validate_node(schema, output, "", &mut errors);
        Self::collect_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::SchemaVariant;
    use serde_json::json;

    fn valid_extended() -> Value {
        json!({
            "marketSentiment": "Strong summer demand",
            "competitorTrends": "Competitors discounting weekdays",
            "recommendations": [{
                "category": "Revenue",
                "action": "Raise weekend ADR",
                "goal": "Capture compression",
                "impact": "+4% RevPAR",
                "priority": "High"
            }],
            "segments": [{
                "name": "Business",
                "percentage": 45,
                "characteristics": ["Midweek", "Short stay"],
                "personalizedOffers": [{
                    "title": "Late checkout",
                    "description": "Free until 2pm",
                    "deliveryChannel": "Email"
                }]
            }],
            "rateAdjustments": [{
                "segment": "Business",
                "currentRate": 180,
                "recommendedRate": 195.5,
                "reason": "Conference week"
            }]
        })
    }

    fn validate(variant: SchemaVariant, value: &Value) -> Result<(), SchemaValidationError> {
        JsonSchemaValidator::new().validate(variant.output_schema(), value)
    }

    #[test]
    fn valid_extended_output_passes() {
        assert!(validate(SchemaVariant::Extended, &valid_extended()).is_ok());
    }

    #[test]
    fn core_schema_ignores_segments() {
        let mut value = valid_extended();
        value.as_object_mut().unwrap().remove("segments");
        value.as_object_mut().unwrap().remove("rateAdjustments");
        assert!(validate(SchemaVariant::Core, &value).is_ok());
        assert!(validate(SchemaVariant::Extended, &value).is_err());
    }

    #[test]
    fn each_missing_top_level_field_is_rejected() {
        for field in ["marketSentiment", "competitorTrends", "recommendations", "segments", "rateAdjustments"] {
            let mut value = valid_extended();
            value.as_object_mut().unwrap().remove(field);

            let err = validate(SchemaVariant::Extended, &value).unwrap_err();
            assert_eq!(
                err,
                SchemaValidationError::MissingRequired { field: field.to_string() },
                "removing {}",
                field
            );
        }
    }

    #[test]
    fn null_required_field_is_missing() {
        let mut value = valid_extended();
        value["marketSentiment"] = Value::Null;
        assert!(matches!(
            validate(SchemaVariant::Extended, &value),
            Err(SchemaValidationError::MissingRequired { .. })
        ));
    }

    #[test]
    fn nested_missing_field_reports_path() {
        let mut value = valid_extended();
        value["segments"][0]["personalizedOffers"][0]
            .as_object_mut()
            .unwrap()
            .remove("deliveryChannel");

        let err = validate(SchemaVariant::Extended, &value).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::MissingRequired {
                field: "segments[0].personalizedOffers[0].deliveryChannel".to_string()
            }
        );
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let mut value = valid_extended();
        value["recommendations"][0]["priority"] = json!("Urgent");

        match validate(SchemaVariant::Extended, &value).unwrap_err() {
            SchemaValidationError::InvalidEnumValue { field, allowed, actual } => {
                assert_eq!(field, "recommendations[0].priority");
                assert_eq!(allowed, vec!["High", "Medium", "Low"]);
                assert_eq!(actual, "Urgent");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn string_where_number_expected_is_rejected() {
        let mut value = valid_extended();
        value["rateAdjustments"][0]["currentRate"] = json!("180");

        let err = validate(SchemaVariant::Extended, &value).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::InvalidType {
                field: "rateAdjustments[0].currentRate".to_string(),
                expected: "number".to_string(),
                actual: "string".to_string(),
            }
        );
    }

    #[test]
    fn out_of_range_percentage_passes() {
        let mut value = valid_extended();
        value["segments"][0]["percentage"] = json!(140);
        assert!(validate(SchemaVariant::Extended, &value).is_ok());
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = validate(SchemaVariant::Core, &json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::InvalidType {
                field: "root".to_string(),
                expected: "object".to_string(),
                actual: "array".to_string(),
            }
        );
    }

    #[test]
    fn multiple_violations_are_collected() {
        let value = json!({ "recommendations": "none" });
        let err = validate(SchemaVariant::Core, &value).unwrap_err();
        assert_eq!(err.error_count(), 3);
    }

    #[test]
    fn optional_property_may_be_absent_or_null() {
        let schema = SchemaNode::object()
            .required("a", SchemaNode::string())
            .optional("b", SchemaNode::number());
        let validator = JsonSchemaValidator::new();

        assert!(validator.validate(&schema, &json!({"a": "x"})).is_ok());
        assert!(validator.validate(&schema, &json!({"a": "x", "b": null})).is_ok());
        assert!(validator.validate(&schema, &json!({"a": "x", "b": "y"})).is_err());
    }
}
