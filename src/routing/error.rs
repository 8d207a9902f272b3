//! Error types for routing failures

use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that can occur during backend selection
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Every backend is Unavailable; nothing can take the request
    #[error("No usable backend available")]
    AllBackendsUnavailable,

    /// Registry misconfiguration surfaced during selection
    #[error(transparent)]
    NotConfigured(#[from] RegistryError),
}
