//! Benchmarks for the routing hot path: selection and outcome recording.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;

use meridian::config::{BackendConfig, RoutingConfig, TrackerConfig};
use meridian::registry::{BackendRole, Registry};
use meridian::routing::RoutingPolicy;
use meridian::tracker::{CallResult, PerformanceTracker};

fn setup() -> (RoutingPolicy, Arc<PerformanceTracker>) {
    let registry = Arc::new(
        Registry::from_config(&[
            BackendConfig {
                name: "deepseek-r1".to_string(),
                url: "http://localhost:8001".to_string(),
                role: BackendRole::Precision,
                timeout_secs: 180,
                priority: 1,
                api_key_env: None,
            },
            BackendConfig {
                name: "qwen-turbo".to_string(),
                url: "http://localhost:8002".to_string(),
                role: BackendRole::Fast,
                timeout_secs: 60,
                priority: 1,
                api_key_env: None,
            },
        ])
        .unwrap(),
    );
    let tracker = Arc::new(PerformanceTracker::for_registry(
        &registry,
        TrackerConfig::default(),
    ));
    let policy = RoutingPolicy::new(
        registry,
        Arc::clone(&tracker),
        RoutingConfig::default(),
    );
    (policy, tracker)
}

/// Selection against a warm window: the per-request decision cost.
fn bench_select(c: &mut Criterion) {
    let (policy, tracker) = setup();
    for _ in 0..20 {
        tracker.record("deepseek-r1", Duration::from_millis(900), CallResult::Success);
        tracker.record("qwen-turbo", Duration::from_millis(150), CallResult::Success);
    }

    c.bench_function("select_backend", |b| {
        b.iter(|| black_box(policy.select().unwrap().name.as_str()))
    });
}

/// Record plus tier re-evaluation: runs once per backend call.
fn bench_record(c: &mut Criterion) {
    let (_policy, tracker) = setup();

    c.bench_function("record_outcome", |b| {
        b.iter(|| {
            tracker.record(
                black_box("qwen-turbo"),
                Duration::from_millis(150),
                CallResult::Success,
            )
        })
    });
}

criterion_group!(benches, bench_select, bench_record);
criterion_main!(benches);
