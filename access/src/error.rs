//! Error types for tier policy and identity resolution.

use thiserror::Error;

/// Result type for access operations
pub type Result<T> = std::result::Result<T, AccessError>;

/// Errors that can occur during policy evaluation or identity resolution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    // ═══════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════
    /// Tier value outside the fixed enumeration
    #[error("Invalid tier: {value:?} (expected free, silver, gold, or platinum)")]
    InvalidTier {
        /// The rejected input value
        value: String,
    },

    // ═══════════════════════════════════════════
    // Identity Errors
    // ═══════════════════════════════════════════
    /// The identity service failed to resolve the current identity
    #[error("Identity unavailable: {reason}")]
    IdentityUnavailable {
        /// Why resolution failed
        reason: String,
    },

    // ═══════════════════════════════════════════
    // Internal Errors
    // ═══════════════════════════════════════════
    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccessError {
    /// Returns true if this error was caused by bad caller input
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidTier { .. })
    }

    /// Returns true if retrying the operation later could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::IdentityUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;

    #[test]
    fn invalid_tier_names_the_rejected_value() {
        let err = AccessError::InvalidTier {
            value: "diamond".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("diamond"));
        assert!(message.contains("platinum"));
    }

    #[test]
    fn error_categories() {
        let invalid = AccessError::InvalidTier {
            value: "vip".to_string(),
        };
        assert!(invalid.is_caller_error());
        assert!(!invalid.is_transient());

        let unavailable = AccessError::IdentityUnavailable {
            reason: "token refresh failed".to_string(),
        };
        assert!(unavailable.is_transient());
        assert!(!unavailable.is_caller_error());
    }
}
