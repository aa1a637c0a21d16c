//! Mock factories for testing.
//!
//! Available in tests and behind the `test-utils` feature.

pub mod factory;

pub use factory::{MockHandle, MockHandleFactory};
