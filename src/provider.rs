//! Provider
//!
//! Registry of every manifest data source, keyed by type name. Hosts
//! negotiate through [`Provider::data_sources`] and [`Provider::schema`],
//! then call [`Provider::read`] with configuration.

use crate::crd::*;
use crate::datasource::{DataSource, DataSourceInfo, ManifestDataSource, ManifestKind, ReadRequest, ReadResponse};
use crate::error::{Error, Result};
use crate::schema::Schema;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Name the provider registers under
pub const PROVIDER_NAME: &str = "eksa-manifests";

/// All manifest data sources of the EKS Anywhere API
pub struct Provider {
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl Provider {
    /// Build every data source and its schema
    pub fn new() -> Result<Self> {
        let mut provider = Self {
            data_sources: BTreeMap::new(),
        };

        provider.register::<AWSDatacenterConfig>()?;
        provider.register::<AWSIamConfig>()?;
        provider.register::<CloudStackDatacenterConfig>()?;
        provider.register::<CloudStackMachineConfig>()?;
        provider.register::<DockerDatacenterConfig>()?;
        provider.register::<FluxConfig>()?;
        provider.register::<GitOpsConfig>()?;
        provider.register::<NutanixDatacenterConfig>()?;
        provider.register::<NutanixMachineConfig>()?;
        provider.register::<OIDCConfig>()?;
        provider.register::<SnowDatacenterConfig>()?;
        provider.register::<SnowIPPool>()?;
        provider.register::<SnowMachineConfig>()?;
        provider.register::<TinkerbellDatacenterConfig>()?;
        provider.register::<TinkerbellMachineConfig>()?;
        provider.register::<VSphereDatacenterConfig>()?;
        provider.register::<VSphereMachineConfig>()?;

        info!(count = provider.data_sources.len(), "Registered manifest data sources");
        Ok(provider)
    }

    fn register<K: ManifestKind>(&mut self) -> Result<()> {
        let data_source = ManifestDataSource::<K>::new()?;
        let type_name = data_source.type_name().to_string();
        if self.data_sources.contains_key(&type_name) {
            return Err(Error::Internal(format!("Duplicate data source type name: {}", type_name)));
        }
        self.data_sources.insert(type_name, Box::new(data_source));
        Ok(())
    }

    /// Data sources sorted by type name
    pub fn data_sources(&self) -> Vec<DataSourceInfo> {
        self.data_sources
            .values()
            .map(|data_source| DataSourceInfo::of(data_source.as_ref()))
            .collect()
    }

    pub fn get(&self, type_name: &str) -> Result<&dyn DataSource> {
        self.data_sources
            .get(type_name)
            .map(|data_source| data_source.as_ref())
            .ok_or_else(|| Error::DataSourceNotFound {
                type_name: type_name.to_string(),
            })
    }

    pub fn schema(&self, type_name: &str) -> Result<&Schema> {
        Ok(self.get(type_name)?.schema())
    }

    /// Read a data source; configuration problems come back as diagnostics
    pub fn read(&self, type_name: &str, config: Value) -> Result<ReadResponse> {
        let data_source = self.get(type_name)?;
        let response = data_source.read(ReadRequest::new(config));
        if response.diagnostics.has_error() {
            warn!(
                data_source = %type_name,
                errors = response.diagnostics.errors().count(),
                "Read returned errors"
            );
        } else {
            debug!(data_source = %type_name, "Read complete");
        }
        Ok(response)
    }

    /// Read a data source and return its state, failing on any error diagnostic
    pub fn read_state(&self, type_name: &str, config: Value) -> Result<Value> {
        let response = self.read(type_name, config)?;
        match response.state {
            Some(state) if !response.diagnostics.has_error() => Ok(state),
            _ => Err(Error::ReadFailed {
                type_name: type_name.to_string(),
                diagnostics: response.diagnostics,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_registers_every_kind() {
        let provider = Provider::new().unwrap();
        let infos = provider.data_sources();
        assert_eq!(infos.len(), 17);

        let names: Vec<&str> = infos.iter().map(|info| info.type_name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        assert!(infos
            .iter()
            .all(|info| info.api_version == "anywhere.eks.amazonaws.com/v1alpha1"));
        assert!(names.contains(&"k8s_anywhere_eks_amazonaws_com_snow_ip_pool_v1alpha1_manifest"));
        assert!(names.contains(&"k8s_anywhere_eks_amazonaws_com_oidc_config_v1alpha1_manifest"));
        assert!(names.contains(&"k8s_anywhere_eks_amazonaws_com_v_sphere_machine_config_v1alpha1_manifest"));
    }

    #[test]
    fn test_every_schema_has_shared_attributes() {
        let provider = Provider::new().unwrap();
        for info in provider.data_sources() {
            let schema = provider.schema(&info.type_name).unwrap();
            let names: Vec<&str> = schema.attributes.keys().map(String::as_str).collect();
            assert_eq!(names, vec!["id", "yaml", "metadata", "spec"], "{}", info.type_name);
            assert!(schema.attribute("metadata").unwrap().is_required());
        }
    }

    #[test]
    fn test_unknown_type_name() {
        let provider = Provider::new().unwrap();
        assert_matches!(
            provider.read("k8s_unknown_manifest", json!({})),
            Err(Error::DataSourceNotFound { type_name }) if type_name == "k8s_unknown_manifest"
        );
        assert!(provider.schema("k8s_unknown_manifest").is_err());
    }

    #[test]
    fn test_read_state() {
        let provider = Provider::new().unwrap();
        let type_name = "k8s_anywhere_eks_amazonaws_com_snow_datacenter_config_v1alpha1_manifest";
        let config = json!({
            "metadata": {"name": "snow", "namespace": "eksa-system"},
            "spec": {"identityRef": {"kind": "Secret", "name": "snow-credentials"}}
        });

        let state = provider.read_state(type_name, config).unwrap();
        assert_eq!(state["id"], "eksa-system/snow");
        assert!(state["yaml"].as_str().unwrap().contains("kind: SnowDatacenterConfig"));

        let error = provider
            .read_state(type_name, json!({"metadata": {"name": "snow", "namespace": "eksa-system"}}))
            .unwrap_err();
        assert!(error.is_user_error());
        assert_eq!(error.diagnostics().unwrap().len(), 1);
    }
}
