//! EKS Anywhere Manifests
//!
//! Read-only data sources that render EKS Anywhere custom resources
//! (`anywhere.eks.amazonaws.com/v1alpha1`) as Kubernetes manifests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Hosts: CLI  ·  HTTP API (axum)                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                          Provider                                │
//! │        type name ──► ManifestDataSource<K>  (17 kinds)           │
//! ├───────────────────────────────┬─────────────────────────────────┤
//! │   Schema (attribute tree)     │   Read handler                  │
//! │   derived from typed specs    │   validate ─► decode ─► id ─►   │
//! │   via schemars                │   resource ─► YAML ─► state     │
//! ├───────────────────────────────┴─────────────────────────────────┤
//! │                CRDs (kube CustomResource derive)                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`provider`]: Registry of every data source
//! - [`datasource`]: Data source trait and the generic manifest handler
//! - [`schema`]: Attribute trees, validators and schema derivation
//! - [`crd`]: Custom Resource Definitions
//! - [`diagnostics`]: Read-time problem reports
//! - [`api`]: HTTP API server
//! - [`config`]: Configuration files
//! - [`error`]: Error types and handling

pub mod api;
pub mod config;
pub mod crd;
pub mod datasource;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod schema;

// Re-export commonly used types
pub use api::{ApiMetrics, ApiServer, ApiServerConfig, RestRouter};

pub use datasource::{
    DataSource, DataSourceInfo, ManifestDataSource, ManifestKind, ManifestModel, ReadRequest,
    ReadResponse,
};

pub use diagnostics::{Diagnostic, Diagnostics, Severity};

pub use error::{Error, Result};

pub use provider::Provider;

pub use schema::{Attribute, AttributePath, AttributeType, Requiredness, Schema};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
