//! Generic manifest data source
//!
//! One read handler for every kind:
//! 1. check the configuration against the schema and decode it
//! 2. set `id` to `namespace/name`
//! 3. assemble the resource, which carries the fixed `apiVersion`/`kind`
//! 4. serialize it to YAML into the `yaml` attribute
//! 5. write the model back as state

use super::{data_source_type_name, DataSource, ManifestKind, ReadRequest, ReadResponse};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::schema::{id_attribute, metadata_attribute, spec_attribute, yaml_attribute, Schema};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::{debug, trace};

// =============================================================================
// Data Model
// =============================================================================

/// Identifier of a manifest
pub fn manifest_id(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

/// `metadata` block of the configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl ManifestMetadata {
    /// Kubernetes object metadata; empty maps are left out
    pub fn to_object_meta(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.name.clone()),
            namespace: Some(self.namespace.clone()),
            labels: self.labels.clone().filter(|labels| !labels.is_empty()),
            annotations: self.annotations.clone().filter(|annotations| !annotations.is_empty()),
            ..Default::default()
        }
    }
}

/// Configuration and state of a manifest data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestModel<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,

    pub metadata: ManifestMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

// =============================================================================
// Manifest Data Source
// =============================================================================

/// Data source rendering manifests of kind `K`
pub struct ManifestDataSource<K> {
    type_name: String,
    api_version: String,
    kind: String,
    schema: Schema,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ManifestKind> ManifestDataSource<K> {
    /// Build the data source and its schema
    pub fn new() -> Result<Self> {
        let api_version = K::api_version(&()).into_owned();
        let kind = K::kind(&()).into_owned();
        let type_name = data_source_type_name(&K::group(&()), &kind, &K::version(&()));

        let spec = spec_attribute::<K::Spec>()?;
        let schema = Schema::new(format!(
            "Creates a {} manifest of API version {} from configuration.",
            kind, api_version
        ))
        .with_attribute("id", id_attribute())
        .with_attribute("yaml", yaml_attribute())
        .with_attribute("metadata", metadata_attribute())
        .with_attribute("spec", spec);

        debug!(data_source = %type_name, "Built data source schema");

        Ok(Self {
            type_name,
            api_version,
            kind,
            schema,
            _kind: PhantomData,
        })
    }

    /// Check and decode configuration into the model
    pub fn decode(&self, config: &Value) -> std::result::Result<ManifestModel<K::Spec>, Diagnostics> {
        let diagnostics = self.schema.validate(config);
        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        serde_json::from_value(config.clone()).map_err(|e| {
            Diagnostics::from(Diagnostic::error("Unable to decode configuration", e.to_string()))
        })
    }

    /// Derive `id` and `yaml` on a decoded model
    pub fn render(&self, model: &mut ManifestModel<K::Spec>) -> std::result::Result<(), Diagnostic> {
        model.id = Some(manifest_id(&model.metadata.namespace, &model.metadata.name));

        let id = model.id.as_deref().unwrap_or_default();
        let marshal_error = |e: &dyn std::fmt::Display| {
            Diagnostic::error(
                "Unable to marshal YAML",
                format!("Failed to render {} {}: {}", self.kind, id, e),
            )
        };

        let metadata = model.metadata.to_object_meta();
        let yaml = match &model.spec {
            Some(spec) => serde_yaml::to_string(&K::from_parts(metadata, spec.clone()))
                .map_err(|e| marshal_error(&e))?,
            None => {
                // The derived resource always serializes `spec`
                let mut resource = serde_json::to_value(K::from_parts(metadata, K::Spec::default()))
                    .map_err(|e| marshal_error(&e))?;
                if let Some(object) = resource.as_object_mut() {
                    object.remove("spec");
                }
                serde_yaml::to_string(&resource).map_err(|e| marshal_error(&e))?
            }
        };

        model.yaml = Some(yaml);
        Ok(())
    }
}

impl<K: ManifestKind> DataSource for ManifestDataSource<K> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn read(&self, request: ReadRequest) -> ReadResponse {
        debug!(data_source = %self.type_name, "Read data source");

        let mut model = match self.decode(&request.config) {
            Ok(model) => model,
            Err(diagnostics) => {
                debug!(
                    data_source = %self.type_name,
                    errors = diagnostics.errors().count(),
                    "Configuration rejected"
                );
                return ReadResponse::failed(diagnostics);
            }
        };

        if let Err(diagnostic) = self.render(&mut model) {
            return ReadResponse::failed(diagnostic.into());
        }

        match serde_json::to_value(&model) {
            Ok(state) => {
                trace!(data_source = %self.type_name, id = ?model.id, "Rendered manifest");
                ReadResponse::ok(state)
            }
            Err(e) => ReadResponse::failed(Diagnostic::error("Unable to write state", e.to_string()).into()),
        }
    }
}
