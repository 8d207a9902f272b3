//! Conversation context configuration

use serde::{Deserialize, Serialize};

/// Conversation context store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum turns retained per conversation; oldest turns are evicted first
    pub max_turns: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_turns: 10 }
    }
}
