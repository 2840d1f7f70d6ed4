//! Benchmark for the manifest read path
//!
//! Covers schema validation, decoding and YAML rendering per read.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use eksa_manifests::Provider;
use serde_json::json;
use std::sync::Arc;

const IAM: &str = "k8s_anywhere_eks_amazonaws_com_aws_iam_config_v1alpha1_manifest";
const SNOW_MACHINE: &str = "k8s_anywhere_eks_amazonaws_com_snow_machine_config_v1alpha1_manifest";

fn bench_small_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_manifest");
    group.throughput(Throughput::Elements(1));

    let provider = Provider::new().unwrap();
    let config = json!({
        "metadata": {"name": "demo", "namespace": "default"},
        "spec": {"awsRegion": "us-west-2", "backendMode": ["EKSConfigMap"]}
    });

    group.bench_function("aws_iam_config", |b| {
        b.iter(|| {
            let response = provider.read(IAM, black_box(config.clone())).unwrap();
            assert!(response.is_ok());
        });
    });

    group.finish();
}

fn bench_nested_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_manifest");
    group.throughput(Throughput::Elements(1));

    let provider = Provider::new().unwrap();
    let config = json!({
        "metadata": {
            "name": "snow-cp",
            "namespace": "eksa-system",
            "labels": {"app.kubernetes.io/part-of": "eks-anywhere"}
        },
        "spec": {
            "amiID": "ami-0123456789",
            "instanceType": "sbe-c.xlarge",
            "devices": ["10.0.0.1", "10.0.0.2"],
            "containersVolume": {"size": 25},
            "nonRootVolumes": [{"deviceName": "/dev/sdc", "size": 32}],
            "network": {
                "directNetworkInterfaces": [
                    {"index": 1, "primary": true, "ipPoolRef": {"kind": "SnowIPPool", "name": "pool-1"}},
                    {"index": 2, "vlanID": 100, "dhcp": true}
                ]
            },
            "hostOSConfiguration": {
                "ntpConfiguration": {"servers": ["time.example.com"]},
                "bottlerocketConfiguration": {
                    "kubernetes": {"maxPods": 100, "allowedUnsafeSysctls": ["net.core.somaxconn"]}
                }
            }
        }
    });

    group.bench_function("snow_machine_config", |b| {
        b.iter(|| {
            let response = provider.read(SNOW_MACHINE, black_box(config.clone())).unwrap();
            assert!(response.is_ok());
        });
    });

    group.finish();
}

fn bench_concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_manifest");
    group.throughput(Throughput::Elements(400));

    let provider = Arc::new(Provider::new().unwrap());
    let config = json!({
        "metadata": {"name": "demo", "namespace": "default"},
        "spec": {"awsRegion": "us-west-2", "backendMode": ["CRD"]}
    });

    group.bench_function("concurrent_4x100", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let provider = provider.clone();
                    let config = config.clone();
                    std::thread::spawn(move || {
                        for _ in 0..100 {
                            let _ = provider.read(IAM, black_box(config.clone()));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_small_read, bench_nested_read, bench_concurrent_reads);
criterion_main!(benches);
