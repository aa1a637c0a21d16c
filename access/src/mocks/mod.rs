//! Mock providers for testing.
//!
//! Available in tests and behind the `test-utils` feature.

pub mod identity;

pub use identity::MockIdentityProvider;
