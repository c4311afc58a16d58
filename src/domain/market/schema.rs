//! Output schema for the market analysis.
//!
//! The schema is plain data: the client attaches it to the generation request
//! so the model conforms its JSON, and validates the parsed response against
//! the same tree. Both variants are built by one function; segments and rate
//! adjustments are the only difference.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::Priority;

/// Which substructures the analysis requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Sentiment, competitor trends and the action plan.
    Core,
    /// Core plus guest segments and rate adjustments.
    #[default]
    Extended,
}

impl SchemaVariant {
    /// Whether segments and rate adjustments are requested.
    pub fn includes_segments(&self) -> bool {
        matches!(self, SchemaVariant::Extended)
    }

    /// The output schema for this variant.
    pub fn output_schema(&self) -> &'static SchemaNode {
        match self {
            SchemaVariant::Core => &CORE_SCHEMA,
            SchemaVariant::Extended => &EXTENDED_SCHEMA,
        }
    }
}

/// A node of the output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaNode {
    Object { properties: Vec<SchemaProperty> },
    Array { items: Box<SchemaNode> },
    String {
        #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "enum")]
        allowed: Vec<String>,
    },
    Number,
}

/// A named property of an object node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    pub name: String,
    pub required: bool,
    pub schema: SchemaNode,
}

impl SchemaNode {
    /// An object with no properties yet.
    pub fn object() -> Self {
        SchemaNode::Object { properties: Vec::new() }
    }

    /// An array of `items`.
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array { items: Box::new(items) }
    }

    /// An unconstrained string.
    pub fn string() -> Self {
        SchemaNode::String { allowed: Vec::new() }
    }

    /// A string restricted to the given literals.
    pub fn string_enum(allowed: &[&str]) -> Self {
        SchemaNode::String {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A number (integer or float).
    pub fn number() -> Self {
        SchemaNode::Number
    }

    /// Adds a required property. No-op on non-object nodes.
    pub fn required(self, name: &str, schema: SchemaNode) -> Self {
        self.with_property(name, schema, true)
    }

    /// Adds an optional property. No-op on non-object nodes.
    pub fn optional(self, name: &str, schema: SchemaNode) -> Self {
        self.with_property(name, schema, false)
    }

    fn with_property(mut self, name: &str, schema: SchemaNode, required: bool) -> Self {
        if let SchemaNode::Object { ref mut properties } = self {
            properties.push(SchemaProperty {
                name: name.to_string(),
                required,
                schema,
            });
        }
        self
    }

    /// Looks up a direct property of an object node.
    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        match self {
            SchemaNode::Object { properties } => properties.iter().find(|p| p.name == name),
            _ => None,
        }
    }

    /// Names of the required properties of an object node, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        match self {
            SchemaNode::Object { properties } => properties
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Short type name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::Object { .. } => "object",
            SchemaNode::Array { .. } => "array",
            SchemaNode::String { .. } => "string",
            SchemaNode::Number => "number",
        }
    }

    /// Renders the node in the generation API's `responseSchema` dialect.
    ///
    /// Types are upper-case (`OBJECT`, `STRING`, ...) and objects carry a
    /// `propertyOrdering` so the model emits fields in declaration order.
    pub fn to_response_schema(&self) -> Value {
        match self {
            SchemaNode::Object { properties } => {
                let mut props = Map::new();
                for p in properties {
                    props.insert(p.name.clone(), p.schema.to_response_schema());
                }
                let ordering: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
                let mut out = json!({
                    "type": "OBJECT",
                    "properties": props,
                    "propertyOrdering": ordering,
                });
                let required = self.required_names();
                if !required.is_empty() {
                    out["required"] = json!(required);
                }
                out
            }
            SchemaNode::Array { items } => json!({
                "type": "ARRAY",
                "items": items.to_response_schema(),
            }),
            SchemaNode::String { allowed } if allowed.is_empty() => json!({ "type": "STRING" }),
            SchemaNode::String { allowed } => json!({
                "type": "STRING",
                "enum": allowed,
            }),
            SchemaNode::Number => json!({ "type": "NUMBER" }),
        }
    }
}

static CORE_SCHEMA: Lazy<SchemaNode> = Lazy::new(|| build_schema(SchemaVariant::Core));
static EXTENDED_SCHEMA: Lazy<SchemaNode> = Lazy::new(|| build_schema(SchemaVariant::Extended));

fn recommendation_schema() -> SchemaNode {
    SchemaNode::object()
        .required("category", SchemaNode::string())
        .required("action", SchemaNode::string())
        .required("goal", SchemaNode::string())
        .required("impact", SchemaNode::string())
        .required("priority", SchemaNode::string_enum(Priority::LITERALS))
}

fn segment_schema() -> SchemaNode {
    let offer = SchemaNode::object()
        .required("title", SchemaNode::string())
        .required("description", SchemaNode::string())
        .required("deliveryChannel", SchemaNode::string());

    SchemaNode::object()
        .required("name", SchemaNode::string())
        .required("percentage", SchemaNode::number())
        .required("characteristics", SchemaNode::array(SchemaNode::string()))
        .required("personalizedOffers", SchemaNode::array(offer))
}

fn rate_adjustment_schema() -> SchemaNode {
    SchemaNode::object()
        .required("segment", SchemaNode::string())
        .required("currentRate", SchemaNode::number())
        .required("recommendedRate", SchemaNode::number())
        .required("reason", SchemaNode::string())
}

fn build_schema(variant: SchemaVariant) -> SchemaNode {
    let root = SchemaNode::object()
        .required("marketSentiment", SchemaNode::string())
        .required("competitorTrends", SchemaNode::string())
        .required("recommendations", SchemaNode::array(recommendation_schema()));

    if !variant.includes_segments() {
        return root;
    }

    root.required("segments", SchemaNode::array(segment_schema()))
        .required("rateAdjustments", SchemaNode::array(rate_adjustment_schema()))
}
