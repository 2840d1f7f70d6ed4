//! GitOps kinds: FluxConfig and the older GitOpsConfig

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// FluxConfig CRD
// =============================================================================

/// FluxConfigSpec defines the desired state of FluxConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "FluxConfig",
    plural = "fluxconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct FluxConfigSpec {
    /// Git branch. Defaults to main.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// ClusterConfigPath relative to the repository root, when specified the cluster config will be stored at
    /// this location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_config_path: Option<String>,

    /// Used to specify Git provider that will be used to host the git files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitProviderConfig>,

    /// Used to specify Github provider to host the Git repo and host the git files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubProviderConfig>,

    /// SystemNamespace scope for this operation. Defaults to flux-system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_namespace: Option<String>,
}

/// Generic git provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitProviderConfig {
    /// Repository URL for the repository to be used with flux. Can be either an SSH or HTTPS url.
    pub repository_url: String,

    /// SSH public key algorithm for the private key specified (rsa, ecdsa, ed25519) (default ecdsa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_algorithm: Option<SshKeyAlgorithm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SshKeyAlgorithm {
    Rsa,
    Ecdsa,
    Ed25519,
}

/// Github hosted repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GithubProviderConfig {
    /// Owner is the user or organization name of the Git provider.
    pub owner: String,

    /// if true, the owner is assumed to be a Git user; otherwise an org.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<bool>,

    /// Repository name.
    pub repository: String,
}

// =============================================================================
// GitOpsConfig CRD
// =============================================================================

/// GitOpsConfigSpec defines the desired state of GitOpsConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "GitOpsConfig",
    plural = "gitopsconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct GitOpsConfigSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux: Option<Flux>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Flux {
    /// github is the only SCM provider supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<Github>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Github {
    /// branch is the branch to be used with flux. Defaults to main
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// ClusterConfigPath relative to the repository root, when specified the cluster config will be stored
    /// at this location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_config_path: Option<String>,

    /// FluxSystemNamespace scope for this operation. Defaults to flux-system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_system_namespace: Option<String>,

    /// Owner is the user or organization name of the Git provider.
    pub owner: String,

    /// if true, the owner is assumed to be a Git user; otherwise an org.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<bool>,

    /// Repository name.
    pub repository: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_key_algorithm_wire_values() {
        let git: GitProviderConfig = serde_json::from_value(serde_json::json!({
            "repositoryUrl": "ssh://git@github.com/example/clusters.git",
            "sshKeyAlgorithm": "ed25519"
        }))
        .unwrap();
        assert_eq!(git.ssh_key_algorithm, Some(SshKeyAlgorithm::Ed25519));
    }
}
