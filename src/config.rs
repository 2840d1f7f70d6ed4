//! Configuration files for the `read` command
//!
//! Files hold the data source configuration (`metadata`, `spec`) as YAML or
//! JSON and are converted to the JSON value the provider reads.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a YAML or JSON configuration file
pub fn load_config(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Loaded configuration file");
    parse_config(&content)
}

/// Parse YAML or JSON configuration text
pub fn parse_config(content: &str) -> Result<Value> {
    let value: Value = serde_yaml::from_str(content)?;
    if !value.is_object() {
        return Err(Error::Configuration(
            "Configuration must be a mapping with metadata and spec".into(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "metadata:\n  name: demo\n  namespace: default\nspec:\n  awsRegion: us-west-2\n  backendMode:\n    - EKSConfigMap"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config["metadata"]["name"], "demo");
        assert_eq!(config["spec"]["backendMode"][0], "EKSConfigMap");
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"metadata": {{"name": "demo", "namespace": "default"}}, "spec": {{"port": 9440}}}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config["spec"]["port"], 9440);
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert_matches!(parse_config("- a\n- b\n"), Err(Error::Configuration(_)));
        assert_matches!(parse_config("metadata: [unclosed"), Err(Error::Yaml(_)));
        assert_matches!(load_config(Path::new("/nonexistent/config.yaml")), Err(Error::Io(_)));
    }
}
