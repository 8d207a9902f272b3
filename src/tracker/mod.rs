//! Performance Tracker.
//!
//! Per-backend rolling window of call outcomes plus the derived health tier.
//! Window and tier for one backend live under a single sharded-map entry, so
//! a `record` is atomic relative to `snapshot`/`tier` reads from other
//! requests: selection never acts on a torn snapshot. Operations on one
//! backend never block progress on another.

pub mod tier;
pub mod window;

pub use tier::{evaluate, Tier};
pub use window::{CallResult, Outcome, PerformanceWindow, WindowSnapshot};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::time::Duration;

use crate::config::TrackerConfig;
use crate::registry::Registry;

/// Window plus tier for one backend. Tier is recomputed from the window on
/// every record, under the same entry lock.
#[derive(Debug)]
struct BackendState {
    window: PerformanceWindow,
    tier: Tier,
}

/// Consistent view of one backend's window metrics and tier.
#[derive(Debug, Clone, Copy)]
pub struct BackendStatus {
    pub snapshot: WindowSnapshot,
    pub tier: Tier,
}

/// Tracks live performance for every registered backend.
pub struct PerformanceTracker {
    config: TrackerConfig,
    backends: DashMap<String, BackendState>,
}

impl PerformanceTracker {
    /// Create a tracker with one empty window per registered backend.
    pub fn for_registry(registry: &Registry, config: TrackerConfig) -> Self {
        let backends = DashMap::new();
        for descriptor in registry.list() {
            backends.insert(
                descriptor.name.clone(),
                BackendState {
                    window: PerformanceWindow::new(config.window_size),
                    tier: Tier::Healthy,
                },
            );
        }
        Self { config, backends }
    }

    /// Record a call outcome and re-evaluate the backend's tier.
    ///
    /// The window update and tier re-evaluation happen under one entry lock;
    /// readers observe either the old window with the old tier or the new
    /// window with the new tier, never a mix.
    pub fn record(&self, backend: &str, latency: Duration, result: CallResult) {
        let mut state = self
            .backends
            .entry(backend.to_string())
            .or_insert_with(|| BackendState {
                window: PerformanceWindow::new(self.config.window_size),
                tier: Tier::Healthy,
            });

        state.window.push(Outcome { latency, result });
        let next = evaluate(&state.window.snapshot(), &self.config);

        if next != state.tier {
            tracing::info!(
                backend = %backend,
                from = %state.tier,
                to = %next,
                "backend tier changed"
            );
        }
        state.tier = next;
        metrics::gauge!("meridian_backend_tier", "backend" => backend.to_string())
            .set(tier_code(next));
    }

    /// Metrics over a backend's current window.
    ///
    /// Neutral metrics, not an error, for a backend with no samples yet.
    pub fn snapshot(&self, backend: &str) -> WindowSnapshot {
        self.backends
            .get(backend)
            .map(|state| state.window.snapshot())
            .unwrap_or_else(WindowSnapshot::neutral)
    }

    /// Current tier for a backend. Unknown backends are Healthy (optimistic start).
    pub fn tier(&self, backend: &str) -> Tier {
        self.backends
            .get(backend)
            .map(|state| state.tier)
            .unwrap_or(Tier::Healthy)
    }

    /// Window metrics and tier read under a single lock.
    pub fn status(&self, backend: &str) -> BackendStatus {
        self.backends
            .get(backend)
            .map(|state| BackendStatus {
                snapshot: state.window.snapshot(),
                tier: state.tier,
            })
            .unwrap_or(BackendStatus {
                snapshot: WindowSnapshot::neutral(),
                tier: Tier::Healthy,
            })
    }

    /// Serializable per-backend report for the performance endpoint.
    pub fn report(&self) -> PerformanceReport {
        let mut backends: Vec<BackendReport> = self
            .backends
            .iter()
            .map(|entry| {
                let snapshot = entry.value().window.snapshot();
                BackendReport {
                    name: entry.key().clone(),
                    tier: entry.value().tier,
                    sample_count: snapshot.sample_count,
                    avg_latency_ms: snapshot.avg_latency.as_millis() as u64,
                    timeout_rate: snapshot.timeout_rate,
                    error_rate: snapshot.error_rate,
                }
            })
            .collect();
        backends.sort_by(|a, b| a.name.cmp(&b.name));

        PerformanceReport {
            generated_at: Utc::now(),
            window_size: self.config.window_size,
            min_samples: self.config.min_samples,
            backends,
        }
    }
}

fn tier_code(tier: Tier) -> f64 {
    match tier {
        Tier::Healthy => 0.0,
        Tier::Degraded => 1.0,
        Tier::Unavailable => 2.0,
    }
}

/// One backend's row in the performance report.
#[derive(Debug, Clone, Serialize)]
pub struct BackendReport {
    pub name: String,
    pub tier: Tier,
    pub sample_count: usize,
    pub avg_latency_ms: u64,
    pub timeout_rate: f64,
    pub error_rate: f64,
}

/// Snapshot of tracker state across all backends.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub generated_at: DateTime<Utc>,
    pub window_size: usize,
    pub min_samples: usize,
    pub backends: Vec<BackendReport>,
}
