//! Routing configuration

use serde::{Deserialize, Serialize};

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Prefer the precision backend when both tiers allow it.
    /// Set to false for a fast-first deployment.
    pub precision_first: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            precision_first: true,
        }
    }
}
