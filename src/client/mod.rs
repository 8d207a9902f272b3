//! Transport collaborator for backend invocation.
//!
//! The router treats backend calls as opaque: it hands the trait a message
//! list and a deadline and gets back text or a failure. Backend-specific
//! protocols live entirely behind [`ModelClient`]; the dispatch engine never
//! branches on them.

mod error;
pub mod http;

pub use error::ClientError;
pub use http::HttpModelClient;

use async_trait::async_trait;
use std::time::Duration;

use crate::context::Turn;
use crate::registry::BackendDescriptor;

/// Opaque backend invocation.
///
/// Implementations must honor the deadline cooperatively: the dispatch
/// engine additionally wraps every call in its own timer and drops the
/// future at the deadline, so a late response is discarded either way.
///
/// # Object Safety
///
/// Designed to be used as `Arc<dyn ModelClient>`.
#[async_trait]
pub trait ModelClient: Send + Sync + 'static {
    /// Send the message list to a backend and return the response text.
    ///
    /// # Returns
    ///
    /// - `Ok(text)` on success
    /// - `Err(ClientError::Timeout)` if the deadline elapsed
    /// - `Err(ClientError::Upstream)` if the backend returned an error
    /// - `Err(ClientError::Network)` if the backend was unreachable
    /// - `Err(ClientError::InvalidResponse)` on an unparseable response
    async fn invoke(
        &self,
        backend: &BackendDescriptor,
        messages: &[Turn],
        deadline: Duration,
    ) -> Result<String, ClientError>;
}
