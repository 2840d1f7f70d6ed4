//! Nutanix kinds: NutanixDatacenterConfig and NutanixMachineConfig

use super::common::{Ref, UserConfiguration};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// NutanixDatacenterConfig CRD
// =============================================================================

/// NutanixDatacenterConfigSpec defines the desired state of NutanixDatacenterConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "NutanixDatacenterConfig",
    plural = "nutanixdatacenterconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct NutanixDatacenterConfigSpec {
    /// AdditionalTrustBundle is the optional PEM-encoded certificate bundle for users that use
    /// non-publicly-signed certificates for their Prism Central
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_trust_bundle: Option<String>,

    /// CredentialRef is the reference to the secret name that contains the credentials
    /// for the Nutanix Prism Central. The namespace for the secret is assumed to be a constant i.e. eksa-system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_ref: Option<Ref>,

    /// Endpoint is the Endpoint of Nutanix Prism Central
    pub endpoint: String,

    /// Insecure is the optional flag to skip TLS verification. Nutanix Prism Central installation by default
    /// ships with a self-signed certificate that will fail TLS verification because the certificate is not
    /// issued by a public CA and does not have the IP SANs with the Prism Central endpoint. To accommodate
    /// the scenario where the user has not changed the default Certificate that ships with Prism Central,
    /// we allow the user to skip TLS verification. This is not recommended for production use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Port is the Port of Nutanix Prism Central
    #[schemars(range(min = 1, max = 65535))]
    pub port: i64,
}

// =============================================================================
// NutanixMachineConfig CRD
// =============================================================================

/// NutanixMachineConfigSpec defines the desired state of NutanixMachineConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "NutanixMachineConfig",
    plural = "nutanixmachineconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct NutanixMachineConfigSpec {
    /// additionalCategories is a list of optional categories to be added to the VM.
    /// Categories must be created in Prism Central before they can be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_categories: Option<Vec<NutanixCategoryIdentifier>>,

    /// cluster is to identify the cluster (the Prism Element under management of the Prism Central),
    /// in which the Machine's VM will be created. The cluster identifier (uuid or name) can be obtained
    /// from the Prism Central console or using the prism_central API.
    pub cluster: NutanixResourceIdentifier,

    /// image is to identify the OS image uploaded to the Prism Central (PC)
    /// The image identifier (uuid or name) can be obtained from the Prism Central console
    /// or using the prism_central API.
    pub image: NutanixResourceIdentifier,

    /// memorySize is the memory size (in Quantity format) of the VM
    /// The minimum memorySize is 2Gi bytes
    pub memory_size: String,

    pub os_family: String,

    /// Project is an optional property that specifies the Prism Central project so that machine resources
    /// can be linked to it. The project identifier (uuid or name) can be obtained from the Prism Central console
    /// or using the prism_central API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<NutanixResourceIdentifier>,

    /// subnet is to identify the cluster's network subnet to use for the Machine's VM
    /// The cluster identifier (uuid or name) can be obtained from the Prism Central console
    /// or using the prism_central API.
    pub subnet: NutanixResourceIdentifier,

    /// systemDiskSize is size (in Quantity format) of the system disk of the VM
    /// The minimum systemDiskSize is 20Gi bytes
    pub system_disk_size: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserConfiguration>>,

    /// vcpuSockets is the number of vCPU sockets of the VM
    #[schemars(range(min = 1))]
    pub vcpu_sockets: i32,

    /// vcpusPerSocket is the number of vCPUs per socket of the VM
    #[schemars(range(min = 1))]
    pub vcpus_per_socket: i32,
}

/// Nutanix entity identified either by name or by uuid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutanixResourceIdentifier {
    /// name is the resource name in the PC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Type is the identifier type to use for this resource.
    #[serde(rename = "type")]
    pub identifier_type: NutanixIdentifierType,

    /// uuid is the UUID of the resource in the PC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NutanixIdentifierType {
    #[default]
    Name,
    Uuid,
}

impl std::fmt::Display for NutanixIdentifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutanixIdentifierType::Name => write!(f, "name"),
            NutanixIdentifierType::Uuid => write!(f, "uuid"),
        }
    }
}

/// Category key/value pair in Prism Central
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutanixCategoryIdentifier {
    /// key is the Key of the category in the Prism Central.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// value is the category value linked to the key in the Prism Central.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_wire_names() {
        let identifier: NutanixResourceIdentifier =
            serde_json::from_value(serde_json::json!({"type": "name", "name": "vlan-0"})).unwrap();
        assert_eq!(identifier.identifier_type, NutanixIdentifierType::Name);
        assert_eq!(identifier.name.as_deref(), Some("vlan-0"));

        let json = serde_json::to_value(&identifier).unwrap();
        assert_eq!(json, serde_json::json!({"type": "name", "name": "vlan-0"}));
    }
}
