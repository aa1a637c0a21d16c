//! Cache configuration.

/// Configuration for [`HandleCache`](crate::HandleCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a cached handle stays live, in minutes
    pub ttl_minutes: i64,
}

impl CacheConfig {
    /// Default handle lifetime in minutes
    pub const DEFAULT_TTL_MINUTES: i64 = 30;

    /// Create a configuration with default values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ttl_minutes: Self::DEFAULT_TTL_MINUTES,
        }
    }

    /// Set the handle lifetime in minutes
    #[must_use]
    pub const fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = minutes;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
