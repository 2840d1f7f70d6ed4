//! Tinkerbell kinds: TinkerbellDatacenterConfig and TinkerbellMachineConfig

use super::common::{HostOSConfiguration, Ref, UserConfiguration};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// TinkerbellDatacenterConfig CRD
// =============================================================================

/// TinkerbellDatacenterConfigSpec defines the desired state of TinkerbellDatacenterConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "TinkerbellDatacenterConfig",
    plural = "tinkerbelldatacenterconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct TinkerbellDatacenterConfigSpec {
    /// HookImagesURLPath can be used to override the default Hook images path to pull from a local server.
    #[serde(rename = "hookImagesURLPath", skip_serializing_if = "Option::is_none")]
    pub hook_images_url_path: Option<String>,

    /// OSImageURL can be used to override the default OS image path to pull from a local server.
    #[serde(rename = "osImageURL", skip_serializing_if = "Option::is_none")]
    pub os_image_url: Option<String>,

    /// SkipLoadBalancerDeployment when set to "true" can be used to skip deploying a load balancer to expose Tinkerbell stack.
    /// Users will have to deploy their own load balancer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_load_balancer_deployment: Option<bool>,

    /// TinkerbellIP is used to configure a VIP for hosting the Tinkerbell services.
    #[serde(rename = "tinkerbellIP", skip_serializing_if = "Option::is_none")]
    pub tinkerbell_ip: Option<String>,
}

// =============================================================================
// TinkerbellMachineConfig CRD
// =============================================================================

/// TinkerbellMachineConfigSpec defines the desired state of TinkerbellMachineConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "TinkerbellMachineConfig",
    plural = "tinkerbellmachineconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct TinkerbellMachineConfigSpec {
    /// HardwareSelector models a simple key-value selector used in Tinkerbell provisioning.
    pub hardware_selector: BTreeMap<String, String>,

    #[serde(rename = "hostOSConfiguration", skip_serializing_if = "Option::is_none")]
    pub host_os_configuration: Option<HostOSConfiguration>,

    #[serde(rename = "osFamily")]
    pub os_family: TinkerbellOSFamily,

    /// OSImageURL can be used to override the default OS image path to pull from a local server.
    /// OSImageURL is a URL to the OS image used during provisioning. It must include
    /// the Kubernetes version(s). For example, a URL used for Kubernetes 1.27 could
    /// be http://localhost:8080/ubuntu-2204-1.27.tgz
    #[serde(rename = "osImageURL", skip_serializing_if = "Option::is_none")]
    pub os_image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<Ref>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserConfiguration>>,
}

/// Operating system installed on bare metal machines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TinkerbellOSFamily {
    #[default]
    Bottlerocket,
    Ubuntu,
    Redhat,
}

impl std::fmt::Display for TinkerbellOSFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TinkerbellOSFamily::Bottlerocket => write!(f, "bottlerocket"),
            TinkerbellOSFamily::Ubuntu => write!(f, "ubuntu"),
            TinkerbellOSFamily::Redhat => write!(f, "redhat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_family_display() {
        assert_eq!(format!("{}", TinkerbellOSFamily::Ubuntu), "ubuntu");
        assert_eq!(
            serde_json::to_value(TinkerbellOSFamily::Redhat).unwrap(),
            "redhat"
        );
    }

    #[test]
    fn test_url_wire_names() {
        let spec = TinkerbellDatacenterConfigSpec {
            tinkerbell_ip: Some("10.0.0.10".into()),
            os_image_url: Some("http://10.0.0.2:8080/ubuntu.gz".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["tinkerbellIP"], "10.0.0.10");
        assert_eq!(json["osImageURL"], "http://10.0.0.2:8080/ubuntu.gz");
        assert!(json.get("hookImagesURLPath").is_none());
    }
}
