//! Conversion of typed spec JSON schemas into attribute trees
//!
//! The JSON schema is generated with the OpenAPI 3 settings used for CRD
//! generation, with every subschema inlined, so each property maps onto
//! exactly one attribute:
//!
//! | JSON schema                          | Attribute                  |
//! |--------------------------------------|----------------------------|
//! | `string` (+ `enum`, length, pattern) | string (+ validators)      |
//! | `boolean`                            | bool                       |
//! | `integer` (+ bounds)                 | int64 (+ validators)       |
//! | `number`                             | float64                    |
//! | `array` with single `items`          | list                       |
//! | `object` with `properties`           | object                     |
//! | `object` with `additionalProperties` | map                        |

use super::{Attribute, AttributeType, Pattern, Requiredness, Validator};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use schemars::gen::SchemaSettings;
use schemars::schema::{InstanceType, RootSchema, Schema as JsonSchemaNode, SchemaObject, SingleOrVec};
use schemars::JsonSchema;
use serde_json::Value;

/// JSON schema of a typed spec, as used for the conversion
pub fn spec_json_schema<T: JsonSchema>() -> RootSchema {
    SchemaSettings::openapi3()
        .with(|settings| {
            settings.inline_subschemas = true;
        })
        .into_generator()
        .into_root_schema_for::<T>()
}

/// Build the `spec` attribute of a data source from its typed spec
///
/// `spec` is required as soon as any of its attributes is required.
pub fn spec_attribute<T: JsonSchema>() -> Result<Attribute> {
    let root = spec_json_schema::<T>();
    let mut attribute = convert(&root.schema, "spec", Requiredness::Optional)?;

    let attributes = attribute.attributes().ok_or_else(|| Error::SchemaConversion {
        path: "spec".into(),
        reason: "spec must be an object".into(),
    })?;
    if attributes.values().any(Attribute::is_required) {
        attribute.requiredness = Requiredness::Required;
    }

    Ok(attribute)
}

fn convert(schema: &SchemaObject, path: &str, requiredness: Requiredness) -> Result<Attribute> {
    if let Some(reference) = &schema.reference {
        return Err(unsupported(path, format!("unresolved reference {}", reference)));
    }

    let description = schema.metadata.as_ref().and_then(|m| m.description.clone());

    let Some(instance_type) = instance_type(schema) else {
        return convert_untyped(schema, path, requiredness, description);
    };

    let mut validators = Vec::new();
    let attribute_type = match instance_type {
        InstanceType::String => {
            if let Some(values) = &schema.enum_values {
                validators.push(Validator::OneOf {
                    values: values.iter().map(enum_value).collect(),
                });
            }
            if let Some(string) = &schema.string {
                if let Some(min) = string.min_length {
                    validators.push(Validator::LengthAtLeast { min: min as usize });
                }
                if let Some(max) = string.max_length {
                    validators.push(Validator::LengthAtMost { max: max as usize });
                }
                if let Some(pattern) = &string.pattern {
                    validators.push(Validator::RegexMatches {
                        pattern: Pattern::new(pattern)?,
                    });
                }
            }
            AttributeType::String
        }
        InstanceType::Boolean => AttributeType::Bool,
        InstanceType::Integer => {
            let number = schema.number.as_deref();
            let (format_min, format_max) = integer_format_bounds(schema.format.as_deref());

            let min = number.and_then(|n| n.minimum).map(|min| min.ceil() as i64);
            if let Some(min) = merge_bound(min, format_min, i64::max) {
                validators.push(Validator::IntAtLeast { min });
            }
            let max = number.and_then(|n| n.maximum).map(|max| max.floor() as i64);
            if let Some(max) = merge_bound(max, format_max, i64::min) {
                validators.push(Validator::IntAtMost { max });
            }
            AttributeType::Int64
        }
        InstanceType::Number => AttributeType::Float64,
        InstanceType::Array => {
            let array = schema
                .array
                .as_deref()
                .ok_or_else(|| unsupported(path, "array without items"))?;
            let element = match &array.items {
                Some(SingleOrVec::Single(item)) => {
                    convert(as_object(item, path)?, &format!("{}[*]", path), Requiredness::Required)?
                }
                _ => return Err(unsupported(path, "only homogeneous arrays are supported")),
            };
            if let Some(min) = array.min_items {
                validators.push(Validator::SizeAtLeast { min: min as usize });
            }
            if let Some(max) = array.max_items {
                validators.push(Validator::SizeAtMost { max: max as usize });
            }
            AttributeType::List {
                element: Box::new(element),
            }
        }
        InstanceType::Object => convert_object(schema, path)?,
        InstanceType::Null => return Err(unsupported(path, "null type")),
    };

    Ok(Attribute {
        attribute_type,
        requiredness,
        description,
        validators,
    })
}

fn convert_object(schema: &SchemaObject, path: &str) -> Result<AttributeType> {
    let Some(object) = schema.object.as_deref() else {
        return Ok(AttributeType::Object {
            attributes: IndexMap::new(),
        });
    };

    if object.properties.is_empty() {
        return match object.additional_properties.as_deref() {
            Some(JsonSchemaNode::Object(value)) => Ok(AttributeType::Map {
                element: Box::new(convert(value, &format!("{}[*]", path), Requiredness::Required)?),
            }),
            Some(JsonSchemaNode::Bool(true)) => Err(unsupported(path, "free-form objects")),
            Some(JsonSchemaNode::Bool(false)) | None => Ok(AttributeType::Object {
                attributes: IndexMap::new(),
            }),
        };
    }

    let mut attributes = IndexMap::new();
    for (name, property) in &object.properties {
        let requiredness = if object.required.contains(name) {
            Requiredness::Required
        } else {
            Requiredness::Optional
        };
        let property_path = format!("{}.{}", path, name);
        let attribute = convert(as_object(property, &property_path)?, &property_path, requiredness)?;
        attributes.insert(name.clone(), attribute);
    }

    Ok(AttributeType::Object { attributes })
}

/// Schemas without a `type`: wrappers and documented enumerations
fn convert_untyped(
    schema: &SchemaObject,
    path: &str,
    requiredness: Requiredness,
    description: Option<String>,
) -> Result<Attribute> {
    if let Some(values) = &schema.enum_values {
        return Ok(Attribute::new(AttributeType::String, requiredness)
            .with_validator(Validator::OneOf {
                values: values.iter().map(enum_value).collect(),
            })
            .with_optional_description(description));
    }

    let Some(subschemas) = schema.subschemas.as_deref() else {
        return Err(unsupported(path, "schema without a type"));
    };

    if let Some([inner]) = subschemas.all_of.as_deref() {
        let inner = convert(as_object(inner, path)?, path, requiredness)?;
        return Ok(match description {
            Some(description) => inner.with_description(description),
            None => inner,
        });
    }

    let variants = subschemas
        .one_of
        .as_deref()
        .or(subschemas.any_of.as_deref())
        .ok_or_else(|| unsupported(path, "schema without a type"))?;

    let mut values = Vec::new();
    for variant in variants {
        let variant = as_object(variant, path)?;
        match &variant.enum_values {
            Some(variant_values) => values.extend(variant_values.iter().map(enum_value)),
            None => return Err(unsupported(path, "only enumerations may be combined")),
        }
    }

    Ok(Attribute::new(AttributeType::String, requiredness)
        .with_validator(Validator::OneOf { values })
        .with_optional_description(description))
}

fn instance_type(schema: &SchemaObject) -> Option<InstanceType> {
    match &schema.instance_type {
        Some(SingleOrVec::Single(instance_type)) => Some(**instance_type),
        Some(SingleOrVec::Vec(types)) => types.iter().copied().find(|t| *t != InstanceType::Null),
        None => None,
    }
}

/// Range of the integer formats narrower than int64
fn integer_format_bounds(format: Option<&str>) -> (Option<i64>, Option<i64>) {
    match format {
        Some("int8") => (Some(i8::MIN.into()), Some(i8::MAX.into())),
        Some("int16") => (Some(i16::MIN.into()), Some(i16::MAX.into())),
        Some("int32") => (Some(i32::MIN.into()), Some(i32::MAX.into())),
        Some("uint8") => (Some(0), Some(u8::MAX.into())),
        Some("uint16") => (Some(0), Some(u16::MAX.into())),
        Some("uint32") => (Some(0), Some(u32::MAX.into())),
        Some("uint64") | Some("uint") => (Some(0), None),
        _ => (None, None),
    }
}

fn merge_bound(declared: Option<i64>, format: Option<i64>, tighter: fn(i64, i64) -> i64) -> Option<i64> {
    match (declared, format) {
        (Some(a), Some(b)) => Some(tighter(a, b)),
        (a, b) => a.or(b),
    }
}

fn as_object<'a>(schema: &'a JsonSchemaNode, path: &str) -> Result<&'a SchemaObject> {
    match schema {
        JsonSchemaNode::Object(object) => Ok(object),
        JsonSchemaNode::Bool(_) => Err(unsupported(path, "boolean schema")),
    }
}

fn enum_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn unsupported(path: &str, reason: impl Into<String>) -> Error {
    Error::SchemaConversion {
        path: path.to_string(),
        reason: reason.into(),
    }
}

impl Attribute {
    fn with_optional_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
