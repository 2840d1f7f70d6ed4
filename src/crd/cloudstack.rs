//! CloudStack kinds: CloudStackDatacenterConfig and CloudStackMachineConfig

use super::common::UserConfiguration;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CloudStackDatacenterConfig CRD
// =============================================================================

/// CloudStackDatacenterConfigSpec defines the desired state of CloudStackDatacenterConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "CloudStackDatacenterConfig",
    plural = "cloudstackdatacenterconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CloudStackDatacenterConfigSpec {
    /// Account typically represents a customer of the service provider or a department in a large organization.
    /// Deprecated: Please use AvailabilityZones instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// AvailabilityZones list of different partitions to distribute VMs across
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zones: Option<Vec<CloudStackAvailabilityZone>>,

    /// Domain contains a grouping of accounts.
    /// Deprecated: Please use AvailabilityZones instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// CloudStack Management API endpoint's IP.
    /// Deprecated: Please use AvailabilityZones instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_api_endpoint: Option<String>,

    /// Zones is a list of one or more zones that are managed by a single CloudStack management endpoint.
    /// Deprecated: Please use AvailabilityZones instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<CloudStackZone>>,
}

/// Partition of a CloudStack deployment with its own credentials and endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudStackAvailabilityZone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// CredentialRef is used to reference a secret in the eksa-system namespace
    pub credentials_ref: String,

    pub domain: String,

    pub management_api_endpoint: String,

    /// Name is used as a unique identifier for each availability zone
    pub name: String,

    pub zone: CloudStackZone,
}

/// Zone identified by name or id, with its network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudStackZone {
    /// Zone is the name or UUID of the CloudStack zone in which clusters should be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Network is the name or UUID of the CloudStack network in which clusters should be created.
    pub network: CloudStackResourceIdentifier,
}

/// Resource identified by id or by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudStackResourceIdentifier {
    /// Id of a resource in the CloudStack environment. Mutually exclusive with Name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name of a resource in the CloudStack environment. Mutually exclusive with Id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// =============================================================================
// CloudStackMachineConfig CRD
// =============================================================================

/// CloudStackMachineConfigSpec defines the desired state of CloudStackMachineConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "CloudStackMachineConfig",
    plural = "cloudstackmachineconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CloudStackMachineConfigSpec {
    /// Defaults to `no`. Can be `pro` or `anti`. If set to `pro` or `anti`, will create an affinity group per machine set
    /// of the corresponding type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<CloudStackAffinity>,

    /// AffinityGroupIds allows users to pass in a list of UUIDs for previously-created Affinity Groups.
    /// Any VM's created with this spec will be added to the affinity group, which will dictate which physical
    /// host(s) they can be placed on. Affinity groups can be type "affinity" or "anti-affinity" in CloudStack.
    /// If they are type "anti-affinity", all VM's in the group must be on separate physical hosts for high
    /// availability. If they are type "affinity", all VM's in the group must be on the same physical host for
    /// improved performance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_group_ids: Option<Vec<String>>,

    /// ComputeOffering refers to a compute offering which has been previously registered in CloudStack. It
    /// represents a VM’s instance size including number of CPU’s, memory, and CPU speed. It can either be
    /// specified as a UUID or name
    pub compute_offering: CloudStackResourceIdentifier,

    /// DiskOffering refers to a disk offering which has been previously registered in CloudStack. It
    /// represents a disk offering with pre-defined size or custom specified disk size. It can either be
    /// specified as a UUID or name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_offering: Option<CloudStackResourceDiskOffering>,

    /// Symlinks create soft symbolic links folders. One use case is to use data disk to store logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symlinks: Option<BTreeMap<String, String>>,

    /// Template refers to a VM image template which has been previously registered in CloudStack. It can
    /// either be specified as a UUID or name
    pub template: CloudStackResourceIdentifier,

    /// UserCustomDetails allows users to pass in non-standard key value inputs, outside those defined
    /// [here](https://github.com/shapeblue/cloudstack/blob/main/api/src/main/java/com/cloud/vm/VmDetailConstants.java)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_custom_details: Option<BTreeMap<String, String>>,

    /// Users consists of an array of objects containing the username, as well as a list of their public keys.
    /// These users will be authorized to ssh into the machines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserConfiguration>>,
}

/// Affinity group type created per machine set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CloudStackAffinity {
    Pro,
    Anti,
    No,
}

impl std::fmt::Display for CloudStackAffinity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudStackAffinity::Pro => write!(f, "pro"),
            CloudStackAffinity::Anti => write!(f, "anti"),
            CloudStackAffinity::No => write!(f, "no"),
        }
    }
}

/// Disk offering with optional custom size and mount settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudStackResourceDiskOffering {
    #[serde(rename = "customSizeInGB", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub custom_size_in_gb: Option<i64>,

    pub device: String,

    pub filesystem: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub label: String,

    pub mount_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinity_wire_values() {
        assert_eq!(serde_json::to_value(CloudStackAffinity::Anti).unwrap(), "anti");
        assert_eq!(format!("{}", CloudStackAffinity::No), "no");
    }

    #[test]
    fn test_disk_offering_wire_names() {
        let offering = CloudStackResourceDiskOffering {
            custom_size_in_gb: Some(20),
            device: "/dev/vdb".into(),
            filesystem: "ext4".into(),
            label: "data_disk".into(),
            mount_path: "/data-small".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&offering).unwrap();
        assert_eq!(json["customSizeInGB"], 20);
        assert_eq!(json["mountPath"], "/data-small");
        assert!(json.get("id").is_none());
    }
}
