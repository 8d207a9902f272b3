//! Configuration module for Meridian
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`MERIDIAN_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use meridian::config::MeridianConfig;
//!
//! // Load defaults
//! let config = MeridianConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: MeridianConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod backend;
pub mod context;
pub mod error;
pub mod logging;
pub mod routing;
pub mod server;
pub mod tracker;

pub use backend::BackendConfig;
pub use context::ContextConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use routing::RoutingConfig;
pub use server::ServerConfig;
pub use tracker::TrackerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Meridian router.
///
/// Aggregates all configuration sections: server settings, performance
/// tracking thresholds, routing preference, conversation context bounds,
/// backend definitions, and logging.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MeridianConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Performance window and tier thresholds
    pub tracker: TrackerConfig,
    /// Backend selection preference
    pub routing: RoutingConfig,
    /// Conversation history bounds
    pub context: ContextConfig,
    /// Static backend definitions
    pub backends: Vec<BackendConfig>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl MeridianConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports MERIDIAN_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Server settings
        if let Ok(port) = std::env::var("MERIDIAN_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("MERIDIAN_HOST") {
            self.server.host = host;
        }

        // Logging settings
        if let Ok(level) = std::env::var("MERIDIAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MERIDIAN_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        // Routing preference
        if let Ok(precision_first) = std::env::var("MERIDIAN_PRECISION_FIRST") {
            self.routing.precision_first = precision_first.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        for (i, backend) in self.backends.iter().enumerate() {
            if backend.url.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("backends[{}].url", i),
                    message: "URL cannot be empty".to_string(),
                });
            }
            if backend.name.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("backends[{}].name", i),
                    message: "name cannot be empty".to_string(),
                });
            }
            if backend.timeout_secs == 0 {
                return Err(ConfigError::Validation {
                    field: format!("backends[{}].timeout_secs", i),
                    message: "timeout must be non-zero".to_string(),
                });
            }
        }

        if self.tracker.window_size == 0 {
            return Err(ConfigError::Validation {
                field: "tracker.window_size".to_string(),
                message: "window size must be non-zero".to_string(),
            });
        }
        if self.tracker.min_samples > self.tracker.window_size {
            return Err(ConfigError::Validation {
                field: "tracker.min_samples".to_string(),
                message: "min_samples cannot exceed window_size".to_string(),
            });
        }
        for (field, rate) in [
            ("tracker.degrade_timeout_rate", self.tracker.degrade_timeout_rate),
            (
                "tracker.unavailable_timeout_rate",
                self.tracker.unavailable_timeout_rate,
            ),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "rate must be within [0, 1]".to_string(),
                });
            }
        }

        if self.context.max_turns == 0 {
            return Err(ConfigError::Validation {
                field: "context.max_turns".to_string(),
                message: "max_turns must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
