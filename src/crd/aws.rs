//! AWS kinds: AWSIamConfig and AWSDatacenterConfig

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// AWSIamConfig CRD
// =============================================================================

/// AWSIamConfigSpec defines the desired state of AWSIamConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "AWSIamConfig",
    plural = "awsiamconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct AWSIamConfigSpec {
    /// AWSRegion defines a region in an AWS partition
    pub aws_region: String,

    /// BackendMode defines multiple backends for aws-iam-authenticator server.
    /// The server searches for mappings in order.
    pub backend_mode: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_roles: Option<Vec<MapRoles>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_users: Option<Vec<MapUsers>>,

    /// Partition defines the AWS partition on which the IAM roles exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
}

/// MapRoles defines IAM role to a username and set of groups mapping using EKSConfigMap BackendMode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapRoles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,

    #[serde(rename = "roleARN")]
    pub role_arn: String,

    pub username: String,
}

/// MapUsers defines IAM role to a username and set of groups mapping using EKSConfigMap BackendMode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapUsers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,

    #[serde(rename = "userARN")]
    pub user_arn: String,

    pub username: String,
}

// =============================================================================
// AWSDatacenterConfig CRD
// =============================================================================

/// AWSDatacenterConfigSpec defines the desired state of AWSDatacenterConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "AWSDatacenterConfig",
    plural = "awsdatacenterconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct AWSDatacenterConfigSpec {
    #[serde(rename = "amiID", skip_serializing_if = "Option::is_none")]
    pub ami_id: Option<String>,

    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_constants() {
        assert_eq!(AWSIamConfig::api_version(&()), "anywhere.eks.amazonaws.com/v1alpha1");
        assert_eq!(AWSIamConfig::kind(&()), "AWSIamConfig");
        assert_eq!(AWSDatacenterConfig::kind(&()), "AWSDatacenterConfig");
    }

    #[test]
    fn test_spec_wire_names() {
        let spec = AWSIamConfigSpec {
            aws_region: "us-west-2".into(),
            backend_mode: vec!["EKSConfigMap".into()],
            map_roles: Some(vec![MapRoles {
                groups: None,
                role_arn: "arn:aws:iam::000000000000:role/KubernetesAdmin".into(),
                username: "admin".into(),
            }]),
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["awsRegion"], "us-west-2");
        assert_eq!(json["mapRoles"][0]["roleARN"], "arn:aws:iam::000000000000:role/KubernetesAdmin");
        assert!(json["mapRoles"][0].get("groups").is_none());
        assert!(json.get("mapUsers").is_none());
        assert!(json.get("partition").is_none());
    }
}
