use crate::registry::BackendRole;

/// Errors that can occur during registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("backend already exists: {0}")]
    DuplicateBackend(String),

    #[error("no backend configured for role: {0}")]
    NotConfigured(BackendRole),
}
