//! OpenAI-compatible HTTP transport.
//!
//! Speaks the `/v1/chat/completions` wire format that both tiered backends
//! expose. A shared `reqwest::Client` provides connection pooling; the
//! per-request timeout enforces the caller's deadline, and dropping the
//! future aborts the in-flight request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::{ClientError, ModelClient};
use crate::context::{Turn, TurnRole};
use crate::registry::BackendDescriptor;

/// HTTP implementation of [`ModelClient`] for OpenAI-compatible endpoints.
pub struct HttpModelClient {
    client: Arc<Client>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl HttpModelClient {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn wire_role(role: TurnRole) -> &'static str {
        match role {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl Default for HttpModelClient {
    fn default() -> Self {
        Self::new(Arc::new(Client::new()))
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn invoke(
        &self,
        backend: &BackendDescriptor,
        messages: &[Turn],
        deadline: Duration,
    ) -> Result<String, ClientError> {
        let url = format!("{}/v1/chat/completions", backend.url);

        let body = CompletionRequest {
            model: &backend.name,
            messages: messages
                .iter()
                .map(|turn| WireMessage {
                    role: Self::wire_role(turn.role),
                    content: &turn.content,
                })
                .collect(),
        };

        let mut request = self.client.post(&url).timeout(deadline).json(&body);

        if let Some(env_var) = &backend.api_key_env {
            if let Ok(key) = std::env::var(env_var) {
                request = request.bearer_auth(key);
            }
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(deadline.as_millis() as u64)
            } else {
                ClientError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to read body: {}", e)))?;

        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("empty choices".to_string()))?;

        if choice.message.content.is_empty() {
            return Err(ClientError::InvalidResponse("empty completion".to_string()));
        }

        Ok(choice.message.content)
    }
}
