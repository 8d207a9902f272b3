//! Backend Descriptor Registry.
//!
//! Static catalog of the model backends available to the router. Built once
//! from configuration at process start and read-only afterwards, so lookups
//! need no synchronization.

mod error;

pub use error::RegistryError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::BackendConfig;

/// Role a backend plays in tiered routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendRole {
    /// High-precision, high-latency model
    Precision,
    /// Fast, lower-precision model
    Fast,
}

impl BackendRole {
    /// The other role, used when falling back after a failed attempt.
    pub fn alternate(self) -> Self {
        match self {
            BackendRole::Precision => BackendRole::Fast,
            BackendRole::Fast => BackendRole::Precision,
        }
    }
}

impl fmt::Display for BackendRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendRole::Precision => write!(f, "precision"),
            BackendRole::Fast => write!(f, "fast"),
        }
    }
}

/// A selectable model backend.
///
/// Immutable after registration; runtime state (windows, tiers) lives in the
/// performance tracker, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Model identifier sent to the transport (e.g., "deepseek-r1")
    pub name: String,
    /// Base URL of the serving endpoint
    pub url: String,
    /// Tiered-routing role
    pub role: BackendRole,
    /// Deadline for a single call against this backend
    pub timeout: Duration,
    /// Priority within a role (lower = prefer)
    pub priority: i32,
    /// Environment variable holding the API key, if any
    pub api_key_env: Option<String>,
}

impl From<&BackendConfig> for BackendDescriptor {
    fn from(config: &BackendConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            role: config.role,
            timeout: Duration::from_secs(config.timeout_secs),
            priority: config.priority,
            api_key_env: config.api_key_env.clone(),
        }
    }
}

/// The Backend Descriptor Registry holds every configured backend.
///
/// Exactly one backend is default-first per role: the one with the lowest
/// priority number. Construction fails when a role has no backend at all,
/// which is fatal at startup.
///
/// # Examples
///
/// ```
/// use meridian::config::BackendConfig;
/// use meridian::registry::{BackendRole, Registry};
///
/// let registry = Registry::from_config(&[
///     BackendConfig {
///         name: "deepseek-r1".to_string(),
///         url: "http://localhost:8001".to_string(),
///         role: BackendRole::Precision,
///         timeout_secs: 180,
///         priority: 1,
///         api_key_env: None,
///     },
///     BackendConfig {
///         name: "qwen-turbo".to_string(),
///         url: "http://localhost:8002".to_string(),
///         role: BackendRole::Fast,
///         timeout_secs: 60,
///         priority: 1,
///         api_key_env: None,
///     },
/// ])
/// .unwrap();
///
/// assert_eq!(registry.get(BackendRole::Precision).unwrap().name, "deepseek-r1");
/// ```
#[derive(Debug)]
pub struct Registry {
    backends: Vec<BackendDescriptor>,
}

impl Registry {
    /// Build the registry from static configuration.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateBackend` when two entries share a
    /// name, and `RegistryError::NotConfigured` when either role has no
    /// backend registered.
    pub fn from_config(configs: &[BackendConfig]) -> Result<Self, RegistryError> {
        let mut backends: Vec<BackendDescriptor> = Vec::with_capacity(configs.len());

        for config in configs {
            if backends.iter().any(|b| b.name == config.name) {
                return Err(RegistryError::DuplicateBackend(config.name.clone()));
            }
            backends.push(config.into());
        }

        // Priority order within the catalog; get() then takes the first match
        backends.sort_by_key(|b| b.priority);

        let registry = Self { backends };
        for role in [BackendRole::Precision, BackendRole::Fast] {
            registry.get(role)?;
        }

        Ok(registry)
    }

    /// All backends, in priority order.
    pub fn list(&self) -> &[BackendDescriptor] {
        &self.backends
    }

    /// The default-first backend for a role.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotConfigured` when no backend holds the role.
    pub fn get(&self, role: BackendRole) -> Result<&BackendDescriptor, RegistryError> {
        self.backends
            .iter()
            .find(|b| b.role == role)
            .ok_or(RegistryError::NotConfigured(role))
    }

    /// Number of registered backends.
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }
}
