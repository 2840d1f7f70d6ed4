//! Data sources
//!
//! A data source pairs a [`Schema`] with a read handler. Every EKS Anywhere
//! kind is served by the same generic [`ManifestDataSource`]; kinds only
//! contribute their typed spec and their group/version/kind constants
//! through [`ManifestKind`].

pub mod manifest;

pub use manifest::{manifest_id, ManifestDataSource, ManifestMetadata, ManifestModel};

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use heck::ToSnakeCase;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::NamespaceResourceScope;
use kube::Resource;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every data source type name
pub const PROVIDER_PREFIX: &str = "k8s";

// =============================================================================
// Traits
// =============================================================================

/// A namespaced custom resource that can be rendered as a manifest
pub trait ManifestKind:
    Resource<DynamicType = (), Scope = NamespaceResourceScope> + Serialize + Send + Sync + 'static
{
    /// Typed spec; its JSON schema drives the `spec` attribute tree
    type Spec: JsonSchema + DeserializeOwned + Serialize + Default + Clone + Send + Sync;

    /// Assemble the resource from metadata and spec
    fn from_parts(metadata: ObjectMeta, spec: Self::Spec) -> Self;
}

/// Read-only data source as seen by a host
pub trait DataSource: Send + Sync {
    /// Unique type name, e.g. `k8s_anywhere_eks_amazonaws_com_aws_iam_config_v1alpha1_manifest`
    fn type_name(&self) -> &str;

    fn api_version(&self) -> &str;

    fn kind(&self) -> &str;

    /// Schema used for negotiation and configuration checks
    fn schema(&self) -> &Schema;

    /// Decode configuration and produce the resulting state
    fn read(&self, request: ReadRequest) -> ReadResponse;
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Configuration supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    pub config: Value,
}

impl ReadRequest {
    pub fn new(config: Value) -> Self {
        Self { config }
    }
}

/// Outcome of a read: state on success, diagnostics always
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn ok(state: Value) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Failed read; no partial state is ever returned
    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.state.is_some() && !self.diagnostics.has_error()
    }
}

/// Summary of a data source for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceInfo {
    pub type_name: String,
    pub api_version: String,
    pub kind: String,
}

impl DataSourceInfo {
    pub fn of(data_source: &dyn DataSource) -> Self {
        Self {
            type_name: data_source.type_name().to_string(),
            api_version: data_source.api_version().to_string(),
            kind: data_source.kind().to_string(),
        }
    }
}

/// Type name of the manifest data source for a group/kind/version
pub fn data_source_type_name(group: &str, kind: &str, version: &str) -> String {
    format!(
        "{}_{}_{}_{}_manifest",
        PROVIDER_PREFIX,
        group.replace(['.', '-'], "_"),
        kind.to_snake_case(),
        version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(
            data_source_type_name("anywhere.eks.amazonaws.com", "AWSIamConfig", "v1alpha1"),
            "k8s_anywhere_eks_amazonaws_com_aws_iam_config_v1alpha1_manifest"
        );
        assert_eq!(
            data_source_type_name("anywhere.eks.amazonaws.com", "CloudStackMachineConfig", "v1alpha1"),
            "k8s_anywhere_eks_amazonaws_com_cloud_stack_machine_config_v1alpha1_manifest"
        );
        assert_eq!(
            data_source_type_name("cert-manager.io", "Issuer", "v1"),
            "k8s_cert_manager_io_issuer_v1_manifest"
        );
    }

    #[test]
    fn test_failed_response_has_no_state() {
        let response = ReadResponse::failed(Diagnostics::new());
        assert!(response.state.is_none());
        assert!(!response.is_ok());

        let response = ReadResponse::ok(serde_json::json!({"id": "default/demo"}));
        assert!(response.is_ok());
    }
}
