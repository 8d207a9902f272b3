//! Dispatch Engine.
//!
//! Orchestrates one request end to end: builds the outbound message list
//! from bounded conversation history, asks the routing policy for a primary
//! backend, invokes it under that backend's deadline, and retries once
//! against the alternate backend on timeout or hard error. Outcomes are
//! recorded in the performance tracker before any context mutation, so a
//! crash between the two can skip a context append but never leaves stale
//! performance data.

pub mod error;

pub use error::DispatchError;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::ModelClient;
use crate::context::{ContextStore, Turn};
use crate::registry::BackendDescriptor;
use crate::routing::RoutingPolicy;
use crate::tracker::{CallResult, PerformanceTracker};

/// Successful dispatch result.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Response text from the backend
    pub text: String,
    /// Name of the backend that produced it
    pub backend: String,
    /// Measured call latency
    pub latency: Duration,
}

/// How a single attempt failed; determines the surfaced error kind.
enum AttemptFailure {
    Timeout,
    Backend { detail: String },
}

impl From<AttemptFailure> for DispatchError {
    fn from(failure: AttemptFailure) -> Self {
        match failure {
            AttemptFailure::Timeout => DispatchError::Timeout,
            AttemptFailure::Backend { detail } => DispatchError::BackendError { detail },
        }
    }
}

/// Issues backend calls with deadline cancellation and single-retry fallback.
pub struct DispatchEngine {
    policy: RoutingPolicy,
    tracker: Arc<PerformanceTracker>,
    context: Arc<ContextStore>,
    client: Arc<dyn ModelClient>,
}

impl DispatchEngine {
    pub fn new(
        policy: RoutingPolicy,
        tracker: Arc<PerformanceTracker>,
        context: Arc<ContextStore>,
        client: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            policy,
            tracker,
            context,
            client,
        }
    }

    /// Answer one message within a conversation.
    ///
    /// Requests sharing `conversation_id` serialize against each other;
    /// different conversations proceed in parallel. At most two backend
    /// attempts are made per request.
    ///
    /// # Errors
    ///
    /// `Timeout` or `BackendError` after the retry also fails,
    /// `AllBackendsUnavailable` when routing finds no usable backend,
    /// `NotConfigured` on registry misconfiguration.
    pub async fn respond(
        &self,
        conversation_id: &str,
        message: &str,
    ) -> Result<Reply, DispatchError> {
        let guard = self.context.guard(conversation_id);
        let _serialized = guard.lock().await;

        let mut messages = self.context.get(conversation_id);
        messages.push(Turn::user(message));

        let primary = self.policy.select()?;
        metrics::counter!("meridian_requests_total", "backend" => primary.name.clone())
            .increment(1);

        let first_failure = match self.attempt(primary, &messages).await {
            Ok(reply) => {
                self.commit(conversation_id, message, &reply);
                return Ok(reply);
            }
            Err(failure) => failure,
        };

        let Some(alternate) = self.policy.alternate(primary.role) else {
            metrics::counter!("meridian_request_failures_total").increment(1);
            return Err(first_failure.into());
        };

        tracing::warn!(
            conversation_id = %conversation_id,
            failed = %primary.name,
            retry = %alternate.name,
            "primary backend failed, retrying on alternate"
        );
        metrics::counter!("meridian_fallbacks_total", "backend" => alternate.name.clone())
            .increment(1);

        match self.attempt(alternate, &messages).await {
            Ok(reply) => {
                self.commit(conversation_id, message, &reply);
                Ok(reply)
            }
            Err(final_failure) => {
                metrics::counter!("meridian_request_failures_total").increment(1);
                Err(final_failure.into())
            }
        }
    }

    /// One call against one backend under its configured deadline.
    ///
    /// The deadline timer wraps the transport future; when it fires the
    /// future is dropped, which cancels the in-flight call cooperatively.
    /// Any late response is discarded with it, so an abandoned call can
    /// never be applied to context or counted twice in the window.
    async fn attempt(
        &self,
        backend: &BackendDescriptor,
        messages: &[Turn],
    ) -> Result<Reply, AttemptFailure> {
        tracing::debug!(
            backend = %backend.name,
            turns = messages.len(),
            deadline_ms = backend.timeout.as_millis() as u64,
            "invoking backend"
        );
        let start = Instant::now();

        let outcome = tokio::time::timeout(
            backend.timeout,
            self.client.invoke(backend, messages, backend.timeout),
        )
        .await;
        let latency = start.elapsed();

        match outcome {
            Ok(Ok(text)) => {
                self.tracker
                    .record(&backend.name, latency, CallResult::Success);
                metrics::histogram!("meridian_request_duration_seconds")
                    .record(latency.as_secs_f64());
                tracing::info!(
                    backend = %backend.name,
                    latency_ms = latency.as_millis() as u64,
                    "backend responded"
                );
                Ok(Reply {
                    text,
                    backend: backend.name.clone(),
                    latency,
                })
            }
            Ok(Err(error)) if error.is_timeout() => {
                self.tracker
                    .record(&backend.name, latency, CallResult::Timeout);
                tracing::warn!(backend = %backend.name, "backend reported timeout");
                Err(AttemptFailure::Timeout)
            }
            Ok(Err(error)) => {
                self.tracker
                    .record(&backend.name, latency, CallResult::Error);
                tracing::warn!(backend = %backend.name, error = %error, "backend call failed");
                Err(AttemptFailure::Backend {
                    detail: error.to_string(),
                })
            }
            Err(_elapsed) => {
                self.tracker
                    .record(&backend.name, latency, CallResult::Timeout);
                tracing::warn!(
                    backend = %backend.name,
                    deadline_ms = backend.timeout.as_millis() as u64,
                    "deadline exceeded, call abandoned"
                );
                Err(AttemptFailure::Timeout)
            }
        }
    }

    /// Append the exchange to conversation history after a success.
    ///
    /// Runs strictly after the tracker update inside `attempt`; context is
    /// best-effort, routing correctness is not.
    fn commit(&self, conversation_id: &str, message: &str, reply: &Reply) {
        self.context.append(conversation_id, Turn::user(message));
        self.context
            .append(conversation_id, Turn::assistant(&reply.text));
    }
}
