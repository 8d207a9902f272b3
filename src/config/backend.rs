//! Backend configuration

use serde::{Deserialize, Serialize};

use crate::registry::BackendRole;

/// Static definition of a model backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Model identifier sent to the transport (e.g., "deepseek-r1")
    pub name: String,
    /// Base URL of the serving endpoint
    pub url: String,
    /// Role this backend plays in tiered routing
    pub role: BackendRole,
    /// Deadline for a single call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Routing priority within a role (lower = prefer)
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Environment variable holding the API key, if the endpoint needs one
    #[serde(default)]
    pub api_key_env: Option<String>,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_priority() -> i32 {
    50
}
