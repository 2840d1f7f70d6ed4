//! API Module
//!
//! HTTP JSON API over the provider: data source listing, schema
//! negotiation, reads, health and Prometheus metrics.

pub mod metrics;
pub mod rest;
pub mod server;

pub use metrics::ApiMetrics;
pub use rest::*;
pub use server::*;
