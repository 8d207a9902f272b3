//! Routing policy for tiered backend selection.
//!
//! Decides which backend a request tries first, consulting the performance
//! tracker's live tiers. Degraded backends remain selectable as a last
//! resort (graceful degradation, not hard exclusion); only Unavailable
//! backends are skipped entirely.

pub mod error;

pub use error::RoutingError;

use std::sync::Arc;

use crate::config::RoutingConfig;
use crate::registry::{BackendDescriptor, BackendRole, Registry};
use crate::tracker::{PerformanceTracker, Tier};

/// Selects the backend each request should try first.
pub struct RoutingPolicy {
    registry: Arc<Registry>,
    tracker: Arc<PerformanceTracker>,
    config: RoutingConfig,
}

impl RoutingPolicy {
    pub fn new(
        registry: Arc<Registry>,
        tracker: Arc<PerformanceTracker>,
        config: RoutingConfig,
    ) -> Self {
        Self {
            registry,
            tracker,
            config,
        }
    }

    /// Roles in preference order under the configured weighting.
    fn preference(&self) -> (BackendRole, BackendRole) {
        if self.config.precision_first {
            (BackendRole::Precision, BackendRole::Fast)
        } else {
            (BackendRole::Fast, BackendRole::Precision)
        }
    }

    /// Pick the primary backend for a request.
    ///
    /// The preferred backend wins while Healthy; otherwise the other backend
    /// takes the request while Healthy or Degraded; a Degraded preferred
    /// backend is still used as a last resort when the other is Unavailable.
    ///
    /// # Errors
    ///
    /// `RoutingError::AllBackendsUnavailable` when every backend is
    /// Unavailable, `RoutingError::NotConfigured` when a role has no backend.
    pub fn select(&self) -> Result<&BackendDescriptor, RoutingError> {
        let (preferred_role, secondary_role) = self.preference();
        let preferred = self.registry.get(preferred_role)?;
        let secondary = self.registry.get(secondary_role)?;

        let preferred_tier = self.tracker.tier(&preferred.name);
        if preferred_tier == Tier::Healthy {
            return Ok(preferred);
        }

        let secondary_tier = self.tracker.tier(&secondary.name);
        if secondary_tier.is_usable() {
            tracing::debug!(
                preferred = %preferred.name,
                preferred_tier = %preferred_tier,
                selected = %secondary.name,
                "preferred backend not healthy, routing to alternate"
            );
            return Ok(secondary);
        }

        if preferred_tier.is_usable() {
            return Ok(preferred);
        }

        Err(RoutingError::AllBackendsUnavailable)
    }

    /// The retry target after a failed attempt against `attempted`.
    ///
    /// Returns the other role's backend unless it is Unavailable or
    /// unregistered.
    pub fn alternate(&self, attempted: BackendRole) -> Option<&BackendDescriptor> {
        let descriptor = self.registry.get(attempted.alternate()).ok()?;
        self.tracker
            .tier(&descriptor.name)
            .is_usable()
            .then_some(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendConfig, TrackerConfig};
    use crate::tracker::CallResult;
    use std::time::Duration;

    fn test_registry() -> Arc<Registry> {
        Arc::new(
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
        )
    }

    fn tracker_config() -> TrackerConfig {
        TrackerConfig {
            window_size: 10,
            min_samples: 5,
            degrade_timeout_rate: 0.3,
            degrade_latency_ms: 120_000,
            unavailable_timeout_rate: 0.6,
        }
    }

    fn make_policy(precision_first: bool) -> (RoutingPolicy, Arc<PerformanceTracker>) {
        let registry = test_registry();
        let tracker = Arc::new(PerformanceTracker::for_registry(&registry, tracker_config()));
        let policy = RoutingPolicy::new(
            registry,
            tracker.clone(),
            RoutingConfig { precision_first },
        );
        (policy, tracker)
    }

    fn drive_to_unavailable(tracker: &PerformanceTracker, backend: &str) {
        for _ in 0..10 {
            tracker.record(backend, Duration::from_secs(60), CallResult::Timeout);
        }
    }

    fn drive_to_degraded(tracker: &PerformanceTracker, backend: &str) {
        for _ in 0..6 {
            tracker.record(backend, Duration::from_secs(2), CallResult::Success);
        }
        for _ in 0..4 {
            tracker.record(backend, Duration::from_secs(60), CallResult::Timeout);
        }
    }

    #[test]
    fn both_healthy_selects_precision_when_precision_first() {
        let (policy, _tracker) = make_policy(true);
        assert_eq!(policy.select().unwrap().name, "deepseek-r1");
    }

    #[test]
    fn both_healthy_selects_fast_when_fast_first() {
        let (policy, _tracker) = make_policy(false);
        assert_eq!(policy.select().unwrap().name, "qwen-turbo");
    }

    #[test]
    fn degraded_precision_routes_to_fast() {
        let (policy, tracker) = make_policy(true);
        drive_to_degraded(&tracker, "deepseek-r1");

        assert_eq!(policy.select().unwrap().name, "qwen-turbo");
    }

    #[test]
    fn degraded_precision_is_last_resort_when_fast_unavailable() {
        let (policy, tracker) = make_policy(true);
        drive_to_degraded(&tracker, "deepseek-r1");
        drive_to_unavailable(&tracker, "qwen-turbo");

        assert_eq!(policy.select().unwrap().name, "deepseek-r1");
    }

    #[test]
    fn unavailable_precision_routes_to_degraded_fast() {
        let (policy, tracker) = make_policy(true);
        drive_to_unavailable(&tracker, "deepseek-r1");
        drive_to_degraded(&tracker, "qwen-turbo");

        assert_eq!(policy.select().unwrap().name, "qwen-turbo");
    }

    #[test]
    fn all_unavailable_is_an_error() {
        let (policy, tracker) = make_policy(true);
        drive_to_unavailable(&tracker, "deepseek-r1");
        drive_to_unavailable(&tracker, "qwen-turbo");

        assert!(matches!(
            policy.select(),
            Err(RoutingError::AllBackendsUnavailable)
        ));
    }

    #[test]
    fn alternate_is_other_role() {
        let (policy, _tracker) = make_policy(true);
        let alternate = policy.alternate(BackendRole::Precision).unwrap();
        assert_eq!(alternate.name, "qwen-turbo");
    }

    #[test]
    fn alternate_skips_unavailable() {
        let (policy, tracker) = make_policy(true);
        drive_to_unavailable(&tracker, "qwen-turbo");

        assert!(policy.alternate(BackendRole::Precision).is_none());
    }

    #[test]
    fn alternate_allows_degraded() {
        let (policy, tracker) = make_policy(true);
        drive_to_degraded(&tracker, "qwen-turbo");

        assert!(policy.alternate(BackendRole::Precision).is_some());
    }
}
