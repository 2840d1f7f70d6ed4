//! Schema Declarator
//!
//! Declarative attribute trees describing the configuration each data source
//! accepts: attribute shapes, requiredness, and validators. A schema has no
//! side effects; hosts read it during negotiation and the read handler uses
//! it to check configuration before decoding.
//!
//! The `spec` subtree of every data source is derived from the JSON schema
//! of its typed spec (see [`convert`]); `metadata`, `id` and `yaml` are
//! declared once in [`metadata`] and shared by every kind.

pub mod convert;
pub mod metadata;
pub mod path;
pub mod validators;

pub use convert::spec_attribute;
pub use metadata::{id_attribute, metadata_attribute, yaml_attribute};
pub use path::{AttributePath, PathStep};
pub use validators::{Pattern, Validator};

use crate::diagnostics::Diagnostics;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

// =============================================================================
// Attribute Types
// =============================================================================

/// Whether a value must, may, or must not be configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Requiredness {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// Set by the provider, never by configuration
    Computed,
}

/// Shape of an attribute value
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AttributeType {
    String,
    Bool,
    Int64,
    Float64,
    List { element: Box<Attribute> },
    Map { element: Box<Attribute> },
    Object { attributes: IndexMap<String, Attribute> },
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::Int64 => write!(f, "number"),
            AttributeType::Float64 => write!(f, "number"),
            AttributeType::List { element } => write!(f, "list of {}", element.attribute_type),
            AttributeType::Map { element } => write!(f, "map of {}", element.attribute_type),
            AttributeType::Object { .. } => write!(f, "object"),
        }
    }
}

/// A single attribute declaration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub requiredness: Requiredness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn new(attribute_type: AttributeType, requiredness: Requiredness) -> Self {
        Self {
            attribute_type,
            requiredness,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required_string() -> Self {
        Self::new(AttributeType::String, Requiredness::Required)
    }

    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, Requiredness::Optional)
    }

    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, Requiredness::Computed)
    }

    /// Optional map with string values
    pub fn optional_string_map() -> Self {
        Self::new(
            AttributeType::Map {
                element: Box::new(Self::required_string()),
            },
            Requiredness::Optional,
        )
    }

    /// Object with the given nested attributes
    pub fn object(attributes: IndexMap<String, Attribute>, requiredness: Requiredness) -> Self {
        Self::new(AttributeType::Object { attributes }, requiredness)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn is_required(&self) -> bool {
        self.requiredness == Requiredness::Required
    }

    /// Nested attributes when this is an object
    pub fn attributes(&self) -> Option<&IndexMap<String, Attribute>> {
        match &self.attribute_type {
            AttributeType::Object { attributes } => Some(attributes),
            _ => None,
        }
    }

    /// Check a configured value, `null` meaning "not set"
    pub fn validate(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        if value.is_null() {
            if self.requiredness == Requiredness::Required {
                diagnostics.add_attribute_error(
                    path,
                    "Missing required argument",
                    format!("The argument \"{}\" is required, but no definition was found.", path),
                );
            }
            return;
        }

        if self.requiredness == Requiredness::Computed {
            diagnostics.add_attribute_error(
                path,
                "Invalid configuration",
                format!("The attribute \"{}\" is computed and cannot be set in configuration.", path),
            );
            return;
        }

        self.validate_value(value, path, diagnostics);
    }

    fn validate_element(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        if value.is_null() {
            diagnostics.add_attribute_error(
                path,
                "Invalid null element",
                "Collection elements must not be null.",
            );
            return;
        }
        self.validate_value(value, path, diagnostics);
    }

    fn validate_value(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let type_matches = match &self.attribute_type {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
            AttributeType::Int64 => value.is_i64(),
            AttributeType::Float64 => value.is_number(),
            AttributeType::List { element } => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        element.validate_element(item, &path.index(i), diagnostics);
                    }
                    true
                }
                None => false,
            },
            AttributeType::Map { element } => match value.as_object() {
                Some(entries) => {
                    for (key, item) in entries {
                        element.validate_element(item, &path.key(key), diagnostics);
                    }
                    true
                }
                None => false,
            },
            AttributeType::Object { attributes } => {
                if value.is_object() {
                    validate_object(attributes, value, path, diagnostics);
                    true
                } else {
                    false
                }
            }
        };

        if !type_matches {
            diagnostics.add_attribute_error(
                path,
                "Incorrect attribute value type",
                format!(
                    "Inappropriate value for attribute \"{}\": {} required, got {}.",
                    path,
                    self.attribute_type,
                    json_type_name(value)
                ),
            );
            return;
        }

        for validator in &self.validators {
            if let Err(detail) = validator.check(value) {
                diagnostics.add_attribute_error(path, validator.summary(), detail);
            }
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Top-level schema of a data source
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub description: String,
    pub attributes: IndexMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Check configuration against the schema, returning every problem found
    pub fn validate(&self, config: &Value) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        validate_object(&self.attributes, config, &AttributePath::root(), &mut diagnostics);
        diagnostics
    }
}

fn validate_object(
    attributes: &IndexMap<String, Attribute>,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    let Some(object) = value.as_object() else {
        diagnostics.add_attribute_error(
            path,
            "Incorrect attribute value type",
            format!("An object is required, got {}.", json_type_name(value)),
        );
        return;
    };

    for key in object.keys() {
        if !attributes.contains_key(key) {
            diagnostics.add_attribute_error(
                &path.attribute(key),
                "Unsupported argument",
                format!("An argument named \"{}\" is not expected here.", key),
            );
        }
    }

    for (name, attribute) in attributes {
        let value = object.get(name).unwrap_or(&Value::Null);
        attribute.validate(value, &path.attribute(name), diagnostics);
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
