//! Docker kind: DockerDatacenterConfig

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// DockerDatacenterConfigSpec defines the desired state of DockerDatacenterConfig.
/// The Docker provider has no datacenter settings.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "anywhere.eks.amazonaws.com",
    version = "v1alpha1",
    kind = "DockerDatacenterConfig",
    plural = "dockerdatacenterconfigs",
    namespaced
)]
pub struct DockerDatacenterConfigSpec {}
