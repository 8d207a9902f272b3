//! # Router API
//!
//! HTTP surface for the Meridian router.
//!
//! ## Endpoints
//!
//! - `POST /v1/respond` - Answer one message within a conversation
//! - `GET /v1/conversations/{id}` - Conversation turn history
//! - `GET /v1/performance` - Per-backend window metrics and tiers
//! - `GET /health` - Tier summary with overall status
//! - `GET /metrics` - Prometheus exposition text
//!
//! ## Example
//!
//! ```no_run
//! use meridian::api::{create_router, AppState};
//! use meridian::client::HttpModelClient;
//! use meridian::config::MeridianConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(MeridianConfig::load(None)?);
//! let client = Arc::new(HttpModelClient::default());
//! let state = Arc::new(AppState::new(config, client)?);
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors are returned as JSON with an OpenAI-style envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "backend call timed out",
//!     "type": "router_error",
//!     "code": "timeout"
//!   }
//! }
//! ```
//! Timeout maps to 504, BackendError to 502, AllBackendsUnavailable to 503,
//! NotConfigured to 500.

mod error;
pub mod types;

pub use error::{ApiError, ErrorEnvelope};
pub use types::*;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::client::ModelClient;
use crate::config::MeridianConfig;
use crate::context::ContextStore;
use crate::dispatch::DispatchEngine;
use crate::logging::generate_request_id;
use crate::registry::{Registry, RegistryError};
use crate::routing::RoutingPolicy;
use crate::tracker::PerformanceTracker;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<MeridianConfig>,
    pub registry: Arc<Registry>,
    pub tracker: Arc<PerformanceTracker>,
    pub context: Arc<ContextStore>,
    pub engine: DispatchEngine,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    prometheus: PrometheusHandle,
}

impl AppState {
    /// Wire the full component graph from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` when the backend catalog is misconfigured;
    /// this is fatal at startup.
    pub fn new(
        config: Arc<MeridianConfig>,
        client: Arc<dyn ModelClient>,
    ) -> Result<Self, RegistryError> {
        let registry = Arc::new(Registry::from_config(&config.backends)?);
        let tracker = Arc::new(PerformanceTracker::for_registry(
            &registry,
            config.tracker.clone(),
        ));
        let context = Arc::new(ContextStore::new(config.context.max_turns));

        let policy = RoutingPolicy::new(
            Arc::clone(&registry),
            Arc::clone(&tracker),
            config.routing.clone(),
        );
        let engine = DispatchEngine::new(
            policy,
            Arc::clone(&tracker),
            Arc::clone(&context),
            client,
        );

        // Already-installed recorder (e.g., in tests) falls back to a detached handle
        let prometheus = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("metrics recorder already installed: {}", e);
            crate::metrics::PrometheusBuilder::new()
                .build_recorder()
                .handle()
        });

        Ok(Self {
            config,
            registry,
            tracker,
            context,
            engine,
            start_time: Instant::now(),
            prometheus,
        })
    }
}

/// Create the axum router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/respond", post(respond))
        .route("/v1/conversations/:id", get(conversation))
        .route("/v1/performance", get(performance))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for `POST /v1/respond`.
async fn respond(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, ApiError> {
    if request.conversation_id.is_empty() {
        return Err(ApiError::invalid_request("conversation_id cannot be empty"));
    }
    if request.message.is_empty() {
        return Err(ApiError::invalid_request("message cannot be empty"));
    }

    let request_id = generate_request_id();
    tracing::info!(
        request_id = %request_id,
        conversation_id = %request.conversation_id,
        "handling respond request"
    );

    let reply = state
        .engine
        .respond(&request.conversation_id, &request.message)
        .await?;

    Ok(Json(RespondResponse {
        reply: reply.text,
        backend: reply.backend,
        latency_ms: reply.latency.as_millis() as u64,
    }))
}

/// Handler for `GET /v1/conversations/{id}`.
async fn conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ConversationResponse> {
    Json(ConversationResponse {
        turns: state.context.get(&id),
        conversation_id: id,
    })
}

/// Handler for `GET /v1/performance`.
async fn performance(State(state): State<Arc<AppState>>) -> Json<PerformanceResponse> {
    Json(PerformanceResponse {
        report: state.tracker.report(),
        active_conversations: state.context.conversation_count(),
    })
}

/// Handler for `GET /health`.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backends: Vec<BackendHealth> = state
        .registry
        .list()
        .iter()
        .map(|descriptor| BackendHealth {
            name: descriptor.name.clone(),
            role: descriptor.role.to_string(),
            tier: state.tracker.tier(&descriptor.name),
        })
        .collect();

    let status = if backends.iter().any(|b| b.tier.is_usable()) {
        "ok"
    } else {
        "unavailable"
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        backends,
    })
}

/// Handler for `GET /metrics` (Prometheus text format).
///
/// Always returns 200 with the exposition content type, even before any
/// metric has been recorded.
async fn render_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.prometheus.render(),
    )
}
