//! Sub-types shared by several EKS Anywhere kinds

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// References
// =============================================================================

/// Reference to another object by kind and name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ref {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// SSH user created on provisioned machines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserConfiguration {
    pub name: String,

    pub ssh_authorized_keys: Vec<String>,
}

// =============================================================================
// Host OS Configuration
// =============================================================================

/// Host OS level settings applied to every machine of a machine config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostOSConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntp_configuration: Option<NTPConfiguration>,

    /// Bottlerocket specific settings, only valid for osFamily bottlerocket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottlerocket_configuration: Option<BottlerocketConfiguration>,

    /// Trusted CA certificate bundles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_bundles: Option<Vec<CertBundle>>,
}

/// NTP servers for the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NTPConfiguration {
    /// Servers is a list of NTP servers to use for time synchronization
    pub servers: Vec<String>,
}

/// Bottlerocket host settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottlerocketConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<BottlerocketKubernetesSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<BottlerocketKernelSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<BottlerocketBootSettings>,
}

/// Kubelet settings for Bottlerocket hosts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottlerocketKubernetesSettings {
    /// Sysctl patterns pods may set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_unsafe_sysctls: Option<Vec<String>>,

    /// IP addresses of the DNS servers used by pods
    #[serde(rename = "clusterDNSIPs", skip_serializing_if = "Option::is_none")]
    pub cluster_dns_ips: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_pods: Option<i64>,
}

/// Kernel settings for Bottlerocket hosts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottlerocketKernelSettings {
    /// Kernel parameters applied through sysctl
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sysctl_settings: Option<BTreeMap<String, String>>,
}

/// Boot settings for Bottlerocket hosts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottlerocketBootSettings {
    /// Kernel command line parameters, each with one or more values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_kernel_parameters: Option<BTreeMap<String, Vec<String>>>,
}

/// Named PEM encoded certificate bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertBundle {
    pub name: String,

    /// PEM encoded certificates
    pub data: String,
}
