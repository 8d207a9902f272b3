//! Performance tracker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds driving the Healthy/Degraded/Unavailable state machine.
///
/// Tier classification is a pure function of the current performance window
/// under these thresholds; there is no cooldown timer, so a backend whose
/// metrics recover is used again on the very next evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Number of outcomes retained per backend (ring buffer size)
    pub window_size: usize,
    /// Minimum samples before degrade thresholds apply
    pub min_samples: usize,
    /// Timeout rate above which a backend is Degraded (0..1)
    pub degrade_timeout_rate: f64,
    /// Average latency above which a backend is Degraded, in milliseconds
    pub degrade_latency_ms: u64,
    /// Timeout rate above which a backend is Unavailable, sustained across
    /// the full window (0..1)
    pub unavailable_timeout_rate: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            min_samples: 5,
            degrade_timeout_rate: 0.3,
            degrade_latency_ms: 120_000,
            unavailable_timeout_rate: 0.6,
        }
    }
}

impl TrackerConfig {
    /// Degrade latency threshold as a `Duration`.
    pub fn degrade_latency(&self) -> Duration {
        Duration::from_millis(self.degrade_latency_ms)
    }
}
