//! Attributes shared by every manifest data source

use super::{Attribute, Requiredness, Validator};
use indexmap::IndexMap;

/// `id` attribute, always `metadata.namespace/metadata.name`
pub fn id_attribute() -> Attribute {
    Attribute::computed_string()
        .with_description("Contains the value 'metadata.namespace/metadata.name'.")
}

/// `yaml` attribute holding the rendered manifest
pub fn yaml_attribute() -> Attribute {
    Attribute::computed_string().with_description("The generated manifest in YAML format.")
}

/// `metadata` block of a namespaced object
pub fn metadata_attribute() -> Attribute {
    let mut attributes = IndexMap::new();

    attributes.insert(
        "name".to_string(),
        Attribute::required_string()
            .with_description(
                "Unique identifier for this object. \
                 See https://kubernetes.io/docs/concepts/overview/working-with-objects/names/#names for more information.",
            )
            .with_validator(Validator::LengthAtLeast { min: 1 })
            .with_validator(Validator::Name),
    );

    attributes.insert(
        "namespace".to_string(),
        Attribute::required_string()
            .with_description(
                "Namespaces provides a mechanism for isolating groups of resources within a single cluster. \
                 See https://kubernetes.io/docs/concepts/overview/working-with-objects/namespaces/ for more information.",
            )
            .with_validator(Validator::LengthAtLeast { min: 1 })
            .with_validator(Validator::Namespace),
    );

    attributes.insert(
        "labels".to_string(),
        Attribute::optional_string_map()
            .with_description(
                "Map of string keys and values that can be used to organize and categorize objects. \
                 See https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/ for more information.",
            )
            .with_validator(Validator::Labels),
    );

    attributes.insert(
        "annotations".to_string(),
        Attribute::optional_string_map()
            .with_description(
                "Unstructured key value map stored with a resource that may be set by external tools. \
                 See https://kubernetes.io/docs/concepts/overview/working-with-objects/annotations/ for more information.",
            )
            .with_validator(Validator::Annotations),
    );

    Attribute::object(attributes, Requiredness::Required)
        .with_description("Data that helps uniquely identify the object.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributePath, AttributeType};
    use crate::diagnostics::Diagnostics;
    use serde_json::json;

    #[test]
    fn test_metadata_shape() {
        let metadata = metadata_attribute();
        let attributes = metadata.attributes().unwrap();
        assert_eq!(
            attributes.keys().collect::<Vec<_>>(),
            vec!["name", "namespace", "labels", "annotations"]
        );
        assert!(attributes["name"].is_required());
        assert!(!attributes["labels"].is_required());
        assert!(matches!(attributes["labels"].attribute_type, AttributeType::Map { .. }));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut diagnostics = Diagnostics::new();
        let path = AttributePath::root().attribute("metadata");
        metadata_attribute().validate(&json!({"name": "", "namespace": "default"}), &path, &mut diagnostics);

        assert!(diagnostics.has_error());
        assert!(diagnostics
            .iter()
            .all(|d| d.path.as_ref().map(|p| p.to_string()) == Some("metadata.name".to_string())));
    }

    #[test]
    fn test_computed_attributes() {
        assert_eq!(id_attribute().requiredness, Requiredness::Computed);
        assert_eq!(yaml_attribute().requiredness, Requiredness::Computed);
    }
}
