//! # Framework Errors
//!
//! This module defines the common error type returned by every client call. Repositories
//! convert their own errors into it, which keeps error handling uniform across actors.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// `true` for expected business outcomes that callers report as data rather than faults.
    pub fn is_domain_failure(&self) -> bool {
        matches!(
            self,
            FrameworkError::NotFound(_) | FrameworkError::Conflict(_) | FrameworkError::Rejected(_)
        )
    }
}
