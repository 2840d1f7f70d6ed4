//! vSphere kinds: VSphereDatacenterConfig and VSphereMachineConfig

use super::common::{HostOSConfiguration, UserConfiguration};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// VSphereDatacenterConfig CRD
// =============================================================================

/// VSphereDatacenterConfigSpec defines the desired state of VSphereDatacenterConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "VSphereDatacenterConfig",
    plural = "vspheredatacenterconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct VSphereDatacenterConfigSpec {
    pub datacenter: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    pub network: String,

    pub server: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
}

// =============================================================================
// VSphereMachineConfig CRD
// =============================================================================

/// VSphereMachineConfigSpec defines the desired state of VSphereMachineConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "VSphereMachineConfig",
    plural = "vspheremachineconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct VSphereMachineConfigSpec {
    /// CloneMode describes the clone mode to be used when cloning vSphere VMs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_mode: Option<CloneMode>,

    pub datastore: String,

    #[serde(rename = "diskGiB", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub disk_gib: Option<i64>,

    pub folder: String,

    #[serde(rename = "hostOSConfiguration", skip_serializing_if = "Option::is_none")]
    pub host_os_configuration: Option<HostOSConfiguration>,

    #[serde(rename = "memoryMiB", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub memory_mib: Option<i64>,

    #[serde(rename = "numCPUs", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub num_cpus: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_family: Option<String>,

    pub resource_pool: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_policy_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserConfiguration>>,
}

/// How vSphere clones the template disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CloneMode {
    FullClone,
    LinkedClone,
}

impl std::fmt::Display for CloneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloneMode::FullClone => write!(f, "fullClone"),
            CloneMode::LinkedClone => write!(f, "linkedClone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_mode_wire_values() {
        assert_eq!(serde_json::to_value(CloneMode::LinkedClone).unwrap(), "linkedClone");
        assert_eq!(format!("{}", CloneMode::FullClone), "fullClone");
    }

    #[test]
    fn test_unit_suffixes() {
        let spec = VSphereMachineConfigSpec {
            datastore: "/SDDC-Datacenter/datastore/WorkloadDatastore".into(),
            folder: "/SDDC-Datacenter/vm".into(),
            resource_pool: "*/Resources".into(),
            disk_gib: Some(25),
            memory_mib: Some(8192),
            num_cpus: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["diskGiB"], 25);
        assert_eq!(json["memoryMiB"], 8192);
        assert_eq!(json["numCPUs"], 2);
        assert_eq!(json["resourcePool"], "*/Resources");
        assert!(json.get("cloneMode").is_none());
    }
}
