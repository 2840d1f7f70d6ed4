//! Attribute validators
//!
//! Generic validators (length, enumeration, pattern, bounds) come from the
//! OpenAPI schema of each CRD. The Kubernetes object validators (names,
//! namespaces, labels, annotations) follow the apimachinery rules.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;
const TOTAL_ANNOTATION_SIZE_LIMIT: usize = 256 * 1024;

static DNS1123_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

static DNS1123_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});

static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").unwrap());

// =============================================================================
// Pattern
// =============================================================================

/// Compiled regular expression that serializes as its source
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Constraint applied to a configured, non-null, correctly typed value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Validator {
    /// String has at least `min` characters
    LengthAtLeast { min: usize },
    /// String has at most `max` characters
    LengthAtMost { max: usize },
    /// String is one of the listed values
    OneOf { values: Vec<String> },
    /// String matches the pattern
    RegexMatches { pattern: Pattern },
    IntAtLeast { min: i64 },
    IntAtMost { max: i64 },
    /// List has at least `min` elements
    SizeAtLeast { min: usize },
    /// List has at most `max` elements
    SizeAtMost { max: usize },
    /// Kubernetes object name (DNS-1123 subdomain)
    Name,
    /// Kubernetes namespace (DNS-1123 label)
    Namespace,
    /// Kubernetes label map
    Labels,
    /// Kubernetes annotation map
    Annotations,
}

impl Validator {
    /// Diagnostic summary used when the check fails
    pub fn summary(&self) -> &'static str {
        match self {
            Validator::LengthAtLeast { .. } | Validator::LengthAtMost { .. } => {
                "Invalid Attribute Value Length"
            }
            Validator::OneOf { .. } | Validator::RegexMatches { .. } => "Invalid Attribute Value Match",
            Validator::SizeAtLeast { .. } | Validator::SizeAtMost { .. } => "Invalid Attribute Value",
            Validator::IntAtLeast { .. } | Validator::IntAtMost { .. } => "Invalid Attribute Value",
            Validator::Name | Validator::Namespace => "Invalid Attribute Value",
            Validator::Labels => "Invalid Label",
            Validator::Annotations => "Invalid Annotation",
        }
    }

    /// Check a value, returning the failure detail
    pub fn check(&self, value: &Value) -> std::result::Result<(), String> {
        match self {
            Validator::LengthAtLeast { min } => {
                let length = string_length(value)?;
                if length < *min {
                    return Err(format!("string length must be at least {}, got: {}", min, length));
                }
                Ok(())
            }
            Validator::LengthAtMost { max } => {
                let length = string_length(value)?;
                if length > *max {
                    return Err(format!("string length must be at most {}, got: {}", max, length));
                }
                Ok(())
            }
            Validator::OneOf { values } => {
                let s = as_str(value)?;
                if !values.iter().any(|v| v == s) {
                    return Err(format!(
                        "value must be one of: [{}], got: \"{}\"",
                        values
                            .iter()
                            .map(|v| format!("\"{}\"", v))
                            .collect::<Vec<_>>()
                            .join(" "),
                        s
                    ));
                }
                Ok(())
            }
            Validator::RegexMatches { pattern } => {
                let s = as_str(value)?;
                if !pattern.is_match(s) {
                    return Err(format!(
                        "value must match pattern {}, got: \"{}\"",
                        pattern.as_str(),
                        s
                    ));
                }
                Ok(())
            }
            Validator::IntAtLeast { min } => {
                let n = as_i64(value)?;
                if n < *min {
                    return Err(format!("value must be at least {}, got: {}", min, n));
                }
                Ok(())
            }
            Validator::IntAtMost { max } => {
                let n = as_i64(value)?;
                if n > *max {
                    return Err(format!("value must be at most {}, got: {}", max, n));
                }
                Ok(())
            }
            Validator::SizeAtLeast { min } => {
                let size = collection_size(value)?;
                if size < *min {
                    return Err(format!("list must contain at least {} elements, got: {}", min, size));
                }
                Ok(())
            }
            Validator::SizeAtMost { max } => {
                let size = collection_size(value)?;
                if size > *max {
                    return Err(format!("list must contain at most {} elements, got: {}", max, size));
                }
                Ok(())
            }
            Validator::Name => {
                let errors = validate_dns1123_subdomain(as_str(value)?);
                join_errors(errors)
            }
            Validator::Namespace => {
                let errors = validate_dns1123_label(as_str(value)?);
                join_errors(errors)
            }
            Validator::Labels => join_errors(validate_labels(string_map(value)?)),
            Validator::Annotations => join_errors(validate_annotations(string_map(value)?)),
        }
    }
}

// =============================================================================
// Kubernetes Object Rules
// =============================================================================

/// Errors for a DNS-1123 label such as a namespace
pub fn validate_dns1123_label(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        errors.push(format!("must be no more than {} characters", DNS1123_LABEL_MAX_LENGTH));
    }
    if !DNS1123_LABEL.is_match(value) {
        errors.push(
            "a lowercase RFC 1123 label must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

/// Errors for a DNS-1123 subdomain such as an object name
pub fn validate_dns1123_subdomain(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errors.push(format!("must be no more than {} characters", DNS1123_SUBDOMAIN_MAX_LENGTH));
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        errors.push(
            "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, \
             '-' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

/// Errors for a qualified name (`[prefix/]name`) used as label or annotation key
pub fn validate_qualified_name(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let parts: Vec<&str> = value.split('/').collect();

    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                errors.push("prefix part must be non-empty".to_string());
            } else {
                errors.extend(
                    validate_dns1123_subdomain(prefix)
                        .into_iter()
                        .map(|e| format!("prefix part {}", e)),
                );
            }
            *name
        }
        _ => {
            errors.push(
                "a qualified name must consist of alphanumeric characters, '-', '_' or '.', \
                 with an optional DNS subdomain prefix and '/'"
                    .to_string(),
            );
            return errors;
        }
    };

    if name.is_empty() {
        errors.push("name part must be non-empty".to_string());
    } else if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        errors.push(format!("name part must be no more than {} characters", QUALIFIED_NAME_MAX_LENGTH));
    }
    if !name.is_empty() && !QUALIFIED_NAME.is_match(name) {
        errors.push(
            "name part must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

/// Errors for a label value (empty is allowed)
pub fn validate_label_value(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        errors.push(format!("must be no more than {} characters", LABEL_VALUE_MAX_LENGTH));
    }
    if !value.is_empty() && !QUALIFIED_NAME.is_match(value) {
        errors.push(
            "a valid label must be an empty string or consist of alphanumeric characters, \
             '-', '_' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

/// Errors for a label map
pub fn validate_labels<'a>(labels: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<String> {
    let mut errors = Vec::new();
    for (key, value) in labels {
        errors.extend(
            validate_qualified_name(key)
                .into_iter()
                .map(|e| format!("key \"{}\": {}", key, e)),
        );
        errors.extend(
            validate_label_value(value)
                .into_iter()
                .map(|e| format!("value \"{}\": {}", value, e)),
        );
    }
    errors
}

/// Errors for an annotation map
pub fn validate_annotations<'a>(
    annotations: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<String> {
    let mut errors = Vec::new();
    let mut total_size = 0;
    for (key, value) in annotations {
        errors.extend(
            validate_qualified_name(&key.to_lowercase())
                .into_iter()
                .map(|e| format!("key \"{}\": {}", key, e)),
        );
        total_size += key.len() + value.len();
    }
    if total_size > TOTAL_ANNOTATION_SIZE_LIMIT {
        errors.push(format!(
            "annotations size {} is larger than limit {}",
            total_size, TOTAL_ANNOTATION_SIZE_LIMIT
        ));
    }
    errors
}

// =============================================================================
// Helpers
// =============================================================================

fn join_errors(errors: Vec<String>) -> std::result::Result<(), String> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

fn as_str(value: &Value) -> std::result::Result<&str, String> {
    value.as_str().ok_or_else(|| "value must be a string".to_string())
}

fn as_i64(value: &Value) -> std::result::Result<i64, String> {
    value.as_i64().ok_or_else(|| "value must be an integer".to_string())
}

fn string_length(value: &Value) -> std::result::Result<usize, String> {
    as_str(value).map(|s| s.chars().count())
}

fn collection_size(value: &Value) -> std::result::Result<usize, String> {
    match value {
        Value::Array(items) => Ok(items.len()),
        Value::Object(entries) => Ok(entries.len()),
        _ => Err("value must be a collection".to_string()),
    }
}

fn string_map(value: &Value) -> std::result::Result<Vec<(&str, &str)>, String> {
    let entries = value.as_object().ok_or_else(|| "value must be a map".to_string())?;
    entries
        .iter()
        .map(|(k, v)| Ok((k.as_str(), as_str(v)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_counts_characters() {
        let validator = Validator::LengthAtLeast { min: 1 };
        assert!(validator.check(&json!("a")).is_ok());
        assert!(validator.check(&json!("")).is_err());

        let validator = Validator::LengthAtMost { max: 3 };
        assert!(validator.check(&json!("äöü")).is_ok());
        assert!(validator.check(&json!("abcd")).is_err());
    }

    #[test]
    fn test_one_of() {
        let validator = Validator::OneOf {
            values: vec!["EKSConfigMap".into(), "CRD".into()],
        };
        assert!(validator.check(&json!("CRD")).is_ok());
        let err = validator.check(&json!("crd")).unwrap_err();
        assert_eq!(err, "value must be one of: [\"EKSConfigMap\" \"CRD\"], got: \"crd\"");
    }

    #[test]
    fn test_regex_and_bounds() {
        let validator = Validator::RegexMatches {
            pattern: Pattern::new(r"^\d+\.\d+\.\d+\.\d+$").unwrap(),
        };
        assert!(validator.check(&json!("10.0.0.1")).is_ok());
        assert!(validator.check(&json!("ten")).is_err());

        assert!(Validator::IntAtLeast { min: 0 }.check(&json!(-1)).is_err());
        assert!(Validator::IntAtMost { max: 10 }.check(&json!(10)).is_ok());
        assert!(Validator::SizeAtLeast { min: 1 }.check(&json!([])).is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Pattern::new("(unclosed"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_names_and_namespaces() {
        assert!(validate_dns1123_subdomain("my-cluster.example").is_empty());
        assert!(!validate_dns1123_subdomain("My_Cluster").is_empty());
        assert!(!validate_dns1123_subdomain(&"a".repeat(254)).is_empty());

        assert!(validate_dns1123_label("eksa-system").is_empty());
        assert!(!validate_dns1123_label("eksa.system").is_empty());
        assert!(!validate_dns1123_label(&"a".repeat(64)).is_empty());

        assert!(Validator::Name.check(&json!("demo")).is_ok());
        assert!(Validator::Namespace.check(&json!("-default")).is_err());
    }

    #[test]
    fn test_qualified_names() {
        assert!(validate_qualified_name("app").is_empty());
        assert!(validate_qualified_name("app.kubernetes.io/name").is_empty());
        assert!(!validate_qualified_name("/name").is_empty());
        assert!(!validate_qualified_name("a/b/c").is_empty());
        assert!(!validate_qualified_name("Example.com/name").is_empty());
        assert!(!validate_qualified_name("-name").is_empty());
        assert!(!validate_qualified_name(&"n".repeat(64)).is_empty());
    }

    #[test]
    fn test_labels() {
        assert!(Validator::Labels
            .check(&json!({"app.kubernetes.io/name": "eksa", "tier": ""}))
            .is_ok());
        assert!(Validator::Labels.check(&json!({"app": "has space"})).is_err());
        assert!(Validator::Labels.check(&json!({"app": "a".repeat(64)})).is_err());
    }

    #[test]
    fn test_annotations() {
        assert!(Validator::Annotations
            .check(&json!({"Example.com/Owner": "any value at all: !"}))
            .is_ok());
        assert!(Validator::Annotations.check(&json!({"bad key": "x"})).is_err());

        let big = "x".repeat(TOTAL_ANNOTATION_SIZE_LIMIT);
        assert!(Validator::Annotations.check(&json!({"k": big})).is_err());
    }
}
