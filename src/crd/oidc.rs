//! OIDCConfig kind

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// OIDCConfigSpec defines the desired state of OIDCConfig.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "OIDCConfig",
    plural = "oidcconfigs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct OIDCConfigSpec {
    /// ClientId defines the client ID for the OpenID Connect client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// GroupsClaim defines the name of a custom OpenID Connect claim for specifying user groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_claim: Option<String>,

    /// GroupsPrefix defines a string to be prefixed to all groups to prevent conflicts with other authentication strategies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_prefix: Option<String>,

    /// IssuerUrl defines the URL of the OpenID issuer, only HTTPS scheme will be accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_url: Option<String>,

    /// RequiredClaims list of key=value pairs that describe a required claim in the ID Token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_claims: Option<Vec<OIDCConfigRequiredClaim>>,

    /// UsernameClaim defines the OpenID claim to use as the user name.
    /// Note that claims other than the default ('sub') is not guaranteed to be unique and immutable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_claim: Option<String>,

    /// UsernamePrefix defines a string to prefixed to all usernames.
    /// If not provided, username claims other than 'email' are prefixed by the issuer URL to avoid clashes.
    /// To skip any prefixing, provide the value '-'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OIDCConfigRequiredClaim {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_claims_wire_names() {
        let spec: OIDCConfigSpec = serde_json::from_value(serde_json::json!({
            "issuerUrl": "https://oidc.example.com",
            "clientId": "eksa",
            "requiredClaims": [{"claim": "hd", "value": "example.com"}]
        }))
        .unwrap();
        assert_eq!(spec.client_id.as_deref(), Some("eksa"));
        assert_eq!(
            spec.required_claims.as_deref(),
            Some(
                &[OIDCConfigRequiredClaim {
                    claim: Some("hd".into()),
                    value: Some("example.com".into()),
                }][..]
            )
        );

        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("usernamePrefix").is_none());
        assert_eq!(json["issuerUrl"], "https://oidc.example.com");
    }
}
