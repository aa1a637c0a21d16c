//! Error types for the handle cache.

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while producing a backend handle
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The factory failed to construct a handle for the credential
    #[error("Handle construction failed: {reason}")]
    ConstructionFailed {
        /// Why construction failed
        reason: String,
    },

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Returns true if retrying the operation later could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ConstructionFailed { .. })
    }
}
