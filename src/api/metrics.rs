//! Read metrics exposed on `/metrics`

use crate::error::{Error, Result};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Outcome label of a read
pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERROR: &str = "error";

/// Prometheus metrics of the manifest API
#[derive(Clone)]
pub struct ApiMetrics {
    registry: Registry,
    reads: IntCounterVec,
    read_duration: HistogramVec,
}

impl ApiMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let reads = IntCounterVec::new(
            Opts::new("eksa_manifests_reads_total", "Data source reads by kind and outcome"),
            &["kind", "outcome"],
        )
        .map_err(metrics_error)?;

        let read_duration = HistogramVec::new(
            HistogramOpts::new(
                "eksa_manifests_read_duration_seconds",
                "Duration of data source reads",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
            &["kind"],
        )
        .map_err(metrics_error)?;

        registry.register(Box::new(reads.clone())).map_err(metrics_error)?;
        registry
            .register(Box::new(read_duration.clone()))
            .map_err(metrics_error)?;

        Ok(Self {
            registry,
            reads,
            read_duration,
        })
    }

    pub fn observe_read(&self, kind: &str, ok: bool, seconds: f64) {
        let outcome = if ok { OUTCOME_OK } else { OUTCOME_ERROR };
        self.reads.with_label_values(&[kind, outcome]).inc();
        self.read_duration.with_label_values(&[kind]).observe(seconds);
    }

    pub fn read_count(&self, kind: &str, outcome: &str) -> u64 {
        self.reads.with_label_values(&[kind, outcome]).get()
    }

    /// Text exposition format
    pub fn render(&self) -> Result<(String, String)> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metrics_error)?;
        let body = String::from_utf8(buffer).map_err(|e| Error::Internal(e.to_string()))?;
        Ok((encoder.format_type().to_string(), body))
    }
}

fn metrics_error(e: prometheus::Error) -> Error {
    Error::Internal(format!("Metrics error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_read() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.observe_read("AWSIamConfig", true, 0.001);
        metrics.observe_read("AWSIamConfig", false, 0.002);
        metrics.observe_read("AWSIamConfig", true, 0.001);

        assert_eq!(metrics.read_count("AWSIamConfig", OUTCOME_OK), 2);
        assert_eq!(metrics.read_count("AWSIamConfig", OUTCOME_ERROR), 1);

        let (content_type, body) = metrics.render().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert!(body.contains("eksa_manifests_reads_total{kind=\"AWSIamConfig\",outcome=\"ok\"} 2"));
        assert!(body.contains("eksa_manifests_read_duration_seconds_count{kind=\"AWSIamConfig\"} 3"));
    }
}
