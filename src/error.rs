//! Error types for the manifest provider
//!
//! Read-time problems with user configuration are reported as
//! [`Diagnostics`](crate::diagnostics::Diagnostics); this enum covers the
//! failures of the provider itself and of its hosting surfaces.

use crate::diagnostics::Diagnostics;
use thiserror::Error;

/// Unified error type for the provider
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("Schema conversion failed at {path}: {reason}")]
    SchemaConversion { path: String, reason: String },

    #[error("Invalid validator pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // =========================================================================
    // Data Source Errors
    // =========================================================================
    #[error("Data source not found: {type_name}")]
    DataSourceNotFound { type_name: String },

    #[error("Read of {type_name} failed: {diagnostics}")]
    ReadFailed {
        type_name: String,
        diagnostics: Diagnostics,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than the provider
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_)
                | Error::DataSourceNotFound { .. }
                | Error::ReadFailed { .. }
                | Error::Json(_)
                | Error::Yaml(_)
        )
    }

    /// Diagnostics attached to the error, if any
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::ReadFailed { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

/// Result type alias for the provider
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        let err = Error::DataSourceNotFound {
            type_name: "k8s_unknown".into(),
        };
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "Data source not found: k8s_unknown");

        let err = Error::SchemaConversion {
            path: "spec.users".into(),
            reason: "unsupported".into(),
        };
        assert!(!err.is_user_error());
        assert!(err.diagnostics().is_none());
    }

    #[test]
    fn test_read_failed_carries_diagnostics() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error("Missing required argument", "name is required");

        let err = Error::ReadFailed {
            type_name: "k8s_example".into(),
            diagnostics,
        };
        assert!(err.is_user_error());
        assert_eq!(err.diagnostics().map(|d| d.len()), Some(1));
        assert!(err.to_string().contains("Missing required argument"));
    }
}
