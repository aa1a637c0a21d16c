//! Error types for the event listing.

use thiserror::Error;

/// Result type for listing operations
pub type Result<T> = std::result::Result<T, ListingError>;

/// Errors that can occur while loading events
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// The backend rejected or failed the events query
    #[error("Backend query failed: {message}")]
    Backend {
        /// Backend-reported failure
        message: String,
    },
}
