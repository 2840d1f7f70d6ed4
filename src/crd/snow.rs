//! Snow kinds: SnowDatacenterConfig, SnowMachineConfig and SnowIPPool

use super::common::{HostOSConfiguration, Ref};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// SnowDatacenterConfig CRD
// =============================================================================

/// SnowDatacenterConfigSpec defines the desired state of SnowDatacenterConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "SnowDatacenterConfig",
    plural = "snowdatacenterconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SnowDatacenterConfigSpec {
    /// SnowCredentialsRef is the reference to the secret that contains snowball credentials and certs information.
    pub identity_ref: Ref,
}

// =============================================================================
// SnowMachineConfig CRD
// =============================================================================

/// SnowMachineConfigSpec defines the desired state of SnowMachineConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "SnowMachineConfig",
    plural = "snowmachineconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SnowMachineConfigSpec {
    /// The AMI ID from which to create the machine instance.
    #[serde(rename = "amiID", skip_serializing_if = "Option::is_none")]
    pub ami_id: Option<String>,

    /// ContainersVolume provides the configuration options for the containers data storage volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers_volume: Option<Volume>,

    /// Devices contains a device ip list assigned by the user to provision machines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,

    #[serde(rename = "hostOSConfiguration", skip_serializing_if = "Option::is_none")]
    pub host_os_configuration: Option<HostOSConfiguration>,

    /// InstanceType is the type of instance to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    /// Network provides the custom network setting for the machine.
    pub network: SnowNetwork,

    /// NonRootVolumes provides the configuration options for the non root storage volumes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_root_volumes: Option<Vec<Volume>>,

    /// OSFamily is the node instance OS.
    /// Valid values: "bottlerocket" and "ubuntu".
    #[serde(rename = "osFamily", skip_serializing_if = "Option::is_none")]
    pub os_family: Option<String>,

    /// PhysicalNetworkConnector is the physical network connector type to use for creating direct network interfaces (DNI).
    /// Valid values: "SFP_PLUS" (default) and "QSFP".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_network_connector: Option<String>,

    /// SSHKeyName is the name of the ssh key defined in the aws snow key pairs, to attach to the instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_name: Option<String>,
}

/// Block device volume attached to a Snow instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Device name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// Size specifies size (in Gi) of the storage device.
    /// Must be greater than the image snapshot size or 8 (whichever is greater).
    #[schemars(range(min = 8))]
    pub size: i64,

    /// Type is the type of the volume (e.g. sbp1 for capacity-optimized HDD, sbg1 performance-optimized SSD, default is sbp1)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
}

/// Direct network interfaces of a Snow instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnowNetwork {
    /// DirectNetworkInterfaces contains a list of direct network interface (DNI) configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1, max = 8))]
    pub direct_network_interfaces: Option<Vec<SnowDirectNetworkInterface>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnowDirectNetworkInterface {
    /// DHCP defines whether DHCP is used to assign ip for the DNI.
    #[serde(rename = "dhcp", skip_serializing_if = "Option::is_none")]
    pub dhcp: Option<bool>,

    /// Index is the index number of DNI used to clarify the position in the list. Usually starts with 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 8))]
    pub index: Option<i64>,

    /// IPPool contains a reference to a snow ip pool which provides a range of ip addresses.
    /// When specified, an ip address selected from the pool is allocated to this DNI.
    #[serde(rename = "ipPoolRef", skip_serializing_if = "Option::is_none")]
    pub ip_pool_ref: Option<Ref>,

    /// Primary indicates whether the DNI is primary or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,

    /// VlanID is the vlan id assigned by the user for the DNI.
    #[serde(rename = "vlanID", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 4095))]
    pub vlan_id: Option<i32>,
}

// =============================================================================
// SnowIPPool CRD
// =============================================================================

/// SnowIPPoolSpec defines the desired state of SnowIPPool.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "SnowIPPool",
    plural = "snowippools",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SnowIPPoolSpec {
    /// IPPools defines a list of ip pool for the DNI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pools: Option<Vec<IPPool>>,
}

/// Contiguous range of addresses in one subnet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IPPool {
    /// Gateway is the gateway of the subnet for routing purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// IPEnd is the end address of an ip range.
    #[serde(rename = "ipEnd", skip_serializing_if = "Option::is_none")]
    pub ip_end: Option<String>,

    /// IPStart is the start address of an ip range.
    #[serde(rename = "ipStart", skip_serializing_if = "Option::is_none")]
    pub ip_start: Option<String>,

    /// Subnet is used to determine whether an ip is within subnet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
}
