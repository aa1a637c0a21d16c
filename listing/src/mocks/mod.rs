//! Mock gateways for testing.
//!
//! Available in tests and behind the `test-utils` feature.

pub mod gateway;

pub use gateway::MockEventsGateway;
