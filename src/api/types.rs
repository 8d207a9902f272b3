//! Request and response types for the router API.

use serde::{Deserialize, Serialize};

use crate::context::Turn;
use crate::tracker::{PerformanceReport, Tier};

/// Body of `POST /v1/respond`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RespondRequest {
    /// Opaque conversation identifier supplied by the caller
    pub conversation_id: String,
    /// New user message
    pub message: String,
}

/// Successful response from `POST /v1/respond`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RespondResponse {
    pub reply: String,
    /// Backend that produced the reply
    pub backend: String,
    pub latency_ms: u64,
}

/// Response from `GET /v1/conversations/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub turns: Vec<Turn>,
}

/// Per-backend row in the health response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendHealth {
    pub name: String,
    pub role: String,
    pub tier: Tier,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    /// "ok" while at least one backend is usable, "unavailable" otherwise
    pub status: String,
    pub uptime_seconds: u64,
    pub backends: Vec<BackendHealth>,
}

/// Response from `GET /v1/performance`.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceResponse {
    #[serde(flatten)]
    pub report: PerformanceReport,
    pub active_conversations: usize,
}

/// OpenAI-style error body carried by every error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
