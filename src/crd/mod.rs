//! Custom Resource Definitions of the EKS Anywhere v1alpha1 API
//!
//! Each kind is a `CustomResource` spec struct. Optional fields are `Option`
//! and skipped when unset, so rendered manifests only carry what was
//! configured:
//! - AWS: AWSIamConfig, AWSDatacenterConfig
//! - CloudStack: CloudStackDatacenterConfig, CloudStackMachineConfig
//! - Docker: DockerDatacenterConfig
//! - GitOps: FluxConfig, GitOpsConfig
//! - Nutanix: NutanixDatacenterConfig, NutanixMachineConfig
//! - OIDC: OIDCConfig
//! - Snow: SnowDatacenterConfig, SnowMachineConfig, SnowIPPool
//! - Tinkerbell: TinkerbellDatacenterConfig, TinkerbellMachineConfig
//! - vSphere: VSphereDatacenterConfig, VSphereMachineConfig

pub mod aws;
pub mod cloudstack;
pub mod common;
pub mod docker;
pub mod gitops;
pub mod nutanix;
pub mod oidc;
pub mod snow;
pub mod tinkerbell;
pub mod vsphere;

pub use aws::*;
pub use cloudstack::*;
pub use common::*;
pub use docker::*;
pub use gitops::*;
pub use nutanix::*;
pub use oidc::*;
pub use snow::*;
pub use tinkerbell::*;
pub use vsphere::*;

use crate::datasource::ManifestKind;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// API group of every kind in this module
pub const GROUP: &str = "anywhere.eks.amazonaws.com";

/// API version of every kind in this module
pub const VERSION: &str = "v1alpha1";

macro_rules! manifest_kinds {
    ($($kind:ident => $spec:ident),+ $(,)?) => {
        $(
            impl ManifestKind for $kind {
                type Spec = $spec;

                fn from_parts(metadata: ObjectMeta, spec: $spec) -> Self {
                    $kind { metadata, spec }
                }
            }
        )+
    };
}

manifest_kinds! {
    AWSDatacenterConfig => AWSDatacenterConfigSpec,
    AWSIamConfig => AWSIamConfigSpec,
    CloudStackDatacenterConfig => CloudStackDatacenterConfigSpec,
    CloudStackMachineConfig => CloudStackMachineConfigSpec,
    DockerDatacenterConfig => DockerDatacenterConfigSpec,
    FluxConfig => FluxConfigSpec,
    GitOpsConfig => GitOpsConfigSpec,
    NutanixDatacenterConfig => NutanixDatacenterConfigSpec,
    NutanixMachineConfig => NutanixMachineConfigSpec,
    OIDCConfig => OIDCConfigSpec,
    SnowDatacenterConfig => SnowDatacenterConfigSpec,
    SnowIPPool => SnowIPPoolSpec,
    SnowMachineConfig => SnowMachineConfigSpec,
    TinkerbellDatacenterConfig => TinkerbellDatacenterConfigSpec,
    TinkerbellMachineConfig => TinkerbellMachineConfigSpec,
    VSphereDatacenterConfig => VSphereDatacenterConfigSpec,
    VSphereMachineConfig => VSphereMachineConfigSpec,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_group_and_version_constants() {
        assert_eq!(SnowIPPool::group(&()), GROUP);
        assert_eq!(SnowIPPool::version(&()), VERSION);
        assert_eq!(
            VSphereMachineConfig::api_version(&()),
            format!("{}/{}", GROUP, VERSION)
        );
    }

    #[test]
    fn test_from_parts_keeps_metadata() {
        let metadata = ObjectMeta {
            name: Some("demo".into()),
            namespace: Some("default".into()),
            ..Default::default()
        };
        let resource = OIDCConfig::from_parts(metadata, OIDCConfigSpec::default());
        assert_eq!(resource.meta().name.as_deref(), Some("demo"));
        assert_eq!(resource.meta().namespace.as_deref(), Some("default"));
    }
}
