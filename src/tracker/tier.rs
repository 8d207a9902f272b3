//! Backend health tier classification.

use serde::{Deserialize, Serialize};

use super::window::WindowSnapshot;
use crate::config::TrackerConfig;

/// Current health classification of a backend.
///
/// Determines whether the routing policy will offer the backend for new
/// requests. Degraded backends remain usable as a last resort; only
/// Unavailable backends are skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Metrics within thresholds, or not enough samples to judge
    Healthy,
    /// Timeout rate or average latency over the degrade threshold
    Degraded,
    /// Timeout rate over the unavailable threshold across the full window
    Unavailable,
}

impl Tier {
    /// Whether the routing policy may still send requests to this backend.
    pub fn is_usable(self) -> bool {
        !matches!(self, Tier::Unavailable)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Healthy => write!(f, "healthy"),
            Tier::Degraded => write!(f, "degraded"),
            Tier::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Classify a backend from its current window metrics.
///
/// Pure function of the snapshot and thresholds. Below `min_samples` the
/// backend is Healthy regardless of metrics (optimistic start, avoids
/// flapping on sparse data). Recovery is immediate: once metrics fall back
/// under the thresholds the next evaluation returns Healthy, with no
/// cooldown timer.
pub fn evaluate(snapshot: &WindowSnapshot, config: &TrackerConfig) -> Tier {
    if snapshot.sample_count < config.min_samples {
        return Tier::Healthy;
    }

    // Unavailable requires the stricter rate sustained across the full window
    if snapshot.sample_count >= config.window_size
        && snapshot.timeout_rate > config.unavailable_timeout_rate
    {
        return Tier::Unavailable;
    }

    if snapshot.timeout_rate > config.degrade_timeout_rate
        || snapshot.avg_latency > config.degrade_latency()
    {
        return Tier::Degraded;
    }

    Tier::Healthy
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot(sample_count: usize, timeout_rate: f64, avg_ms: u64) -> WindowSnapshot {
        WindowSnapshot {
            avg_latency: Duration::from_millis(avg_ms),
            timeout_rate,
            error_rate: 0.0,
            sample_count,
        }
    }

    fn config() -> TrackerConfig {
        TrackerConfig {
            window_size: 10,
            min_samples: 5,
            degrade_timeout_rate: 0.3,
            degrade_latency_ms: 120_000,
            unavailable_timeout_rate: 0.6,
        }
    }

    #[test]
    fn empty_window_is_healthy() {
        assert_eq!(evaluate(&WindowSnapshot::neutral(), &config()), Tier::Healthy);
    }

    #[test]
    fn sparse_data_stays_healthy() {
        // Bad metrics but below min_samples
        assert_eq!(evaluate(&snapshot(4, 1.0, 500_000), &config()), Tier::Healthy);
    }

    #[test]
    fn degrades_on_timeout_rate() {
        assert_eq!(evaluate(&snapshot(10, 0.4, 1_000), &config()), Tier::Degraded);
    }

    #[test]
    fn degrades_on_latency() {
        assert_eq!(evaluate(&snapshot(10, 0.0, 150_000), &config()), Tier::Degraded);
    }

    #[test]
    fn threshold_is_strict_inequality() {
        // Exactly at the threshold is still healthy
        assert_eq!(evaluate(&snapshot(10, 0.3, 120_000), &config()), Tier::Healthy);
    }

    #[test]
    fn unavailable_requires_full_window() {
        // Rate over the unavailable threshold but window not yet full
        assert_eq!(evaluate(&snapshot(7, 0.7, 1_000), &config()), Tier::Degraded);
        // Full window
        assert_eq!(
            evaluate(&snapshot(10, 0.7, 1_000), &config()),
            Tier::Unavailable
        );
    }

    #[test]
    fn recovers_immediately() {
        // No state is carried between evaluations
        assert_eq!(evaluate(&snapshot(10, 0.4, 1_000), &config()), Tier::Degraded);
        assert_eq!(evaluate(&snapshot(10, 0.2, 1_000), &config()), Tier::Healthy);
    }

    #[test]
    fn unavailable_is_not_usable() {
        assert!(Tier::Healthy.is_usable());
        assert!(Tier::Degraded.is_usable());
        assert!(!Tier::Unavailable.is_usable());
    }
}
