//! # Eventgate Client
//!
//! Credential-scoped backend handle cache for the Eventgate platform.
//!
//! ## Features
//!
//! - **Fingerprint keys**: handles are cached per credential, keyed by a
//!   non-reversible SHA-256 fingerprint, never by the raw secret
//! - **Anonymous sentinel**: visitors without a credential share one handle
//!   under the `"anonymous"` key
//! - **Bounded lifetime**: entries expire after a configurable lifetime and
//!   are swept opportunistically on lookup
//! - **Sign-out purge**: observing the identity go away invalidates every
//!   cached handle, exactly once per transition
//! - **Pluggable construction**: handle construction is delegated to a
//!   [`HandleFactory`], so the cache never knows what a handle is
//!
//! ## Architecture
//!
//! [`HandleCache`] owns a keyed map behind one mutex. All operations are
//! synchronous and short: construction is delegated to the factory while the
//! lock is held, which also guarantees at most one live handle per key even
//! under racing lookups. Time comes from an injected
//! [`Clock`](eventgate_core::environment::Clock) so expiry is testable.
//!
//! ## Example
//!
//! ```rust
//! use eventgate_client::HandleCache;
//! use eventgate_client::mocks::MockHandleFactory;
//! use eventgate_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! let cache = HandleCache::new(MockHandleFactory::new(), SystemClock);
//!
//! let first = cache.get_handle(Some("bearer-token")).unwrap();
//! let second = cache.get_handle(Some("bearer-token")).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

// Public modules
pub mod cache;
pub mod config;
pub mod error;
pub mod factory;
pub mod key;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use cache::HandleCache;
pub use config::CacheConfig;
pub use error::{ClientError, Result};
pub use factory::HandleFactory;
pub use key::CacheKey;
