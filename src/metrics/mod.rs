//! # Metrics Collection Module
//!
//! Prometheus export of router metrics, rendered at `GET /metrics`.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `meridian_requests_total{backend}` - Requests by primary backend
//! - `meridian_fallbacks_total{backend}` - Retries routed to the alternate
//! - `meridian_request_failures_total` - Requests that exhausted both attempts
//!
//! **Histograms:**
//! - `meridian_request_duration_seconds` - Successful call latency
//!
//! **Gauges:**
//! - `meridian_backend_tier{backend}` - 0 healthy, 1 degraded, 2 unavailable

use metrics_exporter_prometheus::{Matcher, PrometheusHandle};

// Re-exported so callers can build a detached recorder when the global one
// is already installed (tests construct several AppStates per process)
pub use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize the Prometheus metrics exporter with custom histogram buckets.
///
/// Buckets are sized for LLM inference latency (seconds to minutes, not
/// milliseconds). Returns a handle used to render the exposition text.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    let duration_buckets = &[
        0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("meridian_request_duration_seconds".to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}
