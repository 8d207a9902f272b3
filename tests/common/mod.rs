//! Shared test utilities for Meridian integration tests.
//!
//! Provides reusable helpers for building configs, registries, and mock
//! transport clients to reduce duplication across test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use meridian::client::{ClientError, ModelClient};
use meridian::config::{BackendConfig, MeridianConfig, TrackerConfig};
use meridian::context::Turn;
use meridian::registry::{BackendDescriptor, BackendRole, Registry};

/// Two-backend config matching the canonical precision/fast deployment.
pub fn two_backend_config() -> MeridianConfig {
    let mut config = MeridianConfig::default();
    config.tracker = TrackerConfig {
        window_size: 10,
        min_samples: 5,
        degrade_timeout_rate: 0.3,
        degrade_latency_ms: 120_000,
        unavailable_timeout_rate: 0.6,
    };
    config.backends = vec![
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
    ];
    config
}

pub fn make_registry() -> Arc<Registry> {
    Arc::new(Registry::from_config(&two_backend_config().backends).unwrap())
}

/// One scripted transport behavior.
pub enum Behavior {
    /// Return this text immediately
    Reply(String),
    /// Sleep past any deadline so the engine's timer fires
    Hang,
    /// Return an upstream 500 with this message
    Fail(String),
}

/// Scripted transport client: pops one behavior per invocation and records
/// which backend each call went to. Runs out of script -> replies "ok".
pub struct ScriptedClient {
    script: Mutex<VecDeque<Behavior>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Behavior>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn invoke(
        &self,
        backend: &BackendDescriptor,
        _messages: &[Turn],
        _deadline: Duration,
    ) -> Result<String, ClientError> {
        self.calls.lock().unwrap().push(backend.name.clone());
        let behavior = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Behavior::Reply("ok".to_string()));

        match behavior {
            Behavior::Reply(text) => Ok(text),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(100_000)).await;
                Ok("too late".to_string())
            }
            Behavior::Fail(message) => Err(ClientError::Upstream {
                status: 500,
                message,
            }),
        }
    }
}

/// Transport that echoes the last user message, prefixed with the backend
/// name. Useful for asserting which backend served a conversation turn.
pub struct EchoClient;

#[async_trait]
impl ModelClient for EchoClient {
    async fn invoke(
        &self,
        backend: &BackendDescriptor,
        messages: &[Turn],
        _deadline: Duration,
    ) -> Result<String, ClientError> {
        let last = messages
            .last()
            .map(|turn| turn.content.as_str())
            .unwrap_or("");
        Ok(format!("{}: {}", backend.name, last))
    }
}
