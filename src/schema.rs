//! Parameter schema model and derivation.
//!
//! Capabilities declare their parameter and result shapes as
//! [`ParameterSchema`] values. The schema is a protocol-neutral,
//! JSON-Schema-like document: rendering to the wire format goes through
//! [`ParameterSchema::to_value`], which is a pure function of the declared
//! shape. Properties live in a `BTreeMap`, so two schemas built with the same
//! fields in any insertion order compare equal and render identically.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::error::SchemaError;

/// The type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    String,
    Number,
    Boolean,
    Array,
}

impl SchemaType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recursive, protocol-neutral parameter schema.
///
/// Invariants (checked by [`validate`](Self::validate)):
/// - every name in `required` must exist in `properties`;
/// - `enum_values` is only meaningful on leaf (non-object, non-array) nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    /// Type of this node.
    pub schema_type: SchemaType,
    /// Human-readable description.
    pub description: Option<String>,
    /// Named child schemas (object nodes only).
    pub properties: BTreeMap<String, ParameterSchema>,
    /// Names of required properties; must be a subset of `properties` keys.
    pub required: Vec<String>,
    /// Allowed literal values (leaf nodes only).
    pub enum_values: Option<Vec<Value>>,
    /// Element schema (array nodes only).
    pub items: Option<Box<ParameterSchema>>,
}

impl ParameterSchema {
    fn leaf(schema_type: SchemaType, description: impl Into<String>) -> Self {
        Self {
            schema_type,
            description: Some(description.into()),
            properties: BTreeMap::new(),
            required: Vec::new(),
            enum_values: None,
            items: None,
        }
    }

    /// An object schema with no properties. A capability that takes no
    /// parameters declares exactly this.
    pub fn object() -> Self {
        Self {
            schema_type: SchemaType::Object,
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            enum_values: None,
            items: None,
        }
    }

    /// A string leaf.
    pub fn string(description: impl Into<String>) -> Self {
        Self::leaf(SchemaType::String, description)
    }

    /// A string leaf restricted to an ordered set of literal values.
    pub fn string_enum<I, S>(description: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self::leaf(SchemaType::String, description);
        schema.enum_values = Some(
            values
                .into_iter()
                .map(|v| Value::String(v.into()))
                .collect(),
        );
        schema
    }

    /// A number leaf.
    pub fn number(description: impl Into<String>) -> Self {
        Self::leaf(SchemaType::Number, description)
    }

    /// A boolean leaf.
    pub fn boolean(description: impl Into<String>) -> Self {
        Self::leaf(SchemaType::Boolean, description)
    }

    /// An array of `items`.
    pub fn array(description: impl Into<String>, items: ParameterSchema) -> Self {
        let mut schema = Self::leaf(SchemaType::Array, description);
        schema.items = Some(Box::new(items));
        schema
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to add a named property.
    pub fn with_property(mut self, name: impl Into<String>, schema: ParameterSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Builder method to mark properties as required.
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether this node is a leaf (carries no nested structure).
    pub fn is_leaf(&self) -> bool {
        !matches!(self.schema_type, SchemaType::Object | SchemaType::Array)
    }

    /// Check the structural invariants of this schema, recursively.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for field in &self.required {
            if !self.properties.contains_key(field) {
                return Err(SchemaError::UnknownRequired {
                    field: field.clone(),
                });
            }
        }
        if self.enum_values.is_some() && !self.is_leaf() {
            return Err(SchemaError::EnumOnNonLeaf {
                schema_type: self.schema_type.to_string(),
            });
        }
        for child in self.properties.values() {
            child.validate()?;
        }
        if let Some(items) = &self.items {
            items.validate()?;
        }
        Ok(())
    }

    /// Render the schema as a JSON-Schema-like document.
    ///
    /// Deterministic: structurally equal schemas render to the same value.
    /// Object nodes always carry `properties` and `required`, even when empty.
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".to_string(), json!(self.schema_type.as_str()));
        if let Some(description) = &self.description {
            doc.insert("description".to_string(), json!(description));
        }
        match self.schema_type {
            SchemaType::Object => {
                let mut properties = Map::new();
                for (name, child) in &self.properties {
                    properties.insert(name.clone(), child.to_value());
                }
                doc.insert("properties".to_string(), Value::Object(properties));
                doc.insert("required".to_string(), json!(self.required));
            }
            SchemaType::Array => {
                if let Some(items) = &self.items {
                    doc.insert("items".to_string(), items.to_value());
                }
            }
            _ => {
                if let Some(values) = &self.enum_values {
                    doc.insert("enum".to_string(), Value::Array(values.clone()));
                }
            }
        }
        Value::Object(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_schema() {
        let schema = ParameterSchema::object();
        assert!(schema.validate().is_ok());
        assert_eq!(
            schema.to_value(),
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn test_insertion_order_does_not_affect_equality() {
        let a = ParameterSchema::object()
            .with_property("objective", ParameterSchema::string("The objective"))
            .with_property("context", ParameterSchema::object())
            .with_required(["objective"]);
        let b = ParameterSchema::object()
            .with_property("context", ParameterSchema::object())
            .with_property("objective", ParameterSchema::string("The objective"))
            .with_required(["objective"]);

        assert_eq!(a, b);
        assert_eq!(a.to_value(), b.to_value());
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let schema = ParameterSchema::object()
            .with_property(
                "concept",
                ParameterSchema::string_enum("The concept", ["tool", "resource"]),
            )
            .with_required(["concept"]);

        assert_eq!(schema.to_value(), schema.to_value());
    }

    #[test]
    fn test_enum_leaf_renders_values_in_order() {
        let schema = ParameterSchema::string_enum("Build system", ["detect", "maven", "gradle"]);
        let value = schema.to_value();
        assert_eq!(value["enum"], json!(["detect", "maven", "gradle"]));
    }

    #[test]
    fn test_required_must_exist_in_properties() {
        let schema = ParameterSchema::object()
            .with_property("objective", ParameterSchema::string("The objective"))
            .with_required(["objective", "missing"]);
        assert_eq!(
            schema.validate(),
            Err(SchemaError::UnknownRequired {
                field: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_enum_rejected_on_object() {
        let mut schema = ParameterSchema::object();
        schema.enum_values = Some(vec![json!("a")]);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::EnumOnNonLeaf { .. })
        ));
    }

    #[test]
    fn test_nested_validation() {
        let inner = ParameterSchema::object().with_required(["nope"]);
        let outer = ParameterSchema::object().with_property("inner", inner);
        assert!(outer.validate().is_err());
    }
}
