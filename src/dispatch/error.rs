//! Error types for request dispatch

use thiserror::Error;

use crate::registry::RegistryError;
use crate::routing::RoutingError;

/// Errors surfaced to callers of `respond`.
///
/// Timeout and BackendError are only returned after the single
/// retry-on-alternate has also failed; AllBackendsUnavailable and
/// NotConfigured are never retried since no alternate exists.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Deadline exceeded on the final attempt
    #[error("backend call timed out")]
    Timeout,

    /// Backend returned a failure response on the final attempt
    #[error("backend error: {detail}")]
    BackendError { detail: String },

    /// Routing policy found no usable backend
    #[error("no usable backend available")]
    AllBackendsUnavailable,

    /// Registry misconfiguration
    #[error(transparent)]
    NotConfigured(#[from] RegistryError),
}

impl From<RoutingError> for DispatchError {
    fn from(error: RoutingError) -> Self {
        match error {
            RoutingError::AllBackendsUnavailable => DispatchError::AllBackendsUnavailable,
            RoutingError::NotConfigured(e) => DispatchError::NotConfigured(e),
        }
    }
}
