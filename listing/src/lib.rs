//! # Eventgate Listing
//!
//! Event listing state machine with tier filtering for the Eventgate
//! platform.
//!
//! ## Features
//!
//! - **Explicit identity machine**: identity resolution is a state machine
//!   driven by actions, never an implicit await in view code
//! - **Tier filtering**: per-item access decisions and tier tabs backed by
//!   the coverage rule from `eventgate-access`
//! - **Denial handling**: selecting a filter the plan does not cover reverts
//!   the selection to "all" and raises an upgrade notice
//! - **Cached backend access**: every fetch goes credential, cached handle,
//!   query, through the `eventgate-client` handle cache
//! - **Client-side narrowing**: search and tier filters narrow the loaded
//!   events locally without refetching
//!
//! ## Architecture
//!
//! [`ListingReducer`] is a pure state transition function returning effect
//! descriptions; [`ListingStore`] owns the state behind an async lock and
//! executes effects, feeding produced actions back in. The only suspension
//! points are the two external calls: fetching a credential and querying the
//! backend. Rendering is a consumer of [`ListingState`] snapshots and lives
//! outside this crate.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

// Public modules
pub mod actions;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod reducer;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;


// Re-export main types for convenience
pub use actions::ListingAction;
pub use environment::ListingEnvironment;
pub use error::{ListingError, Result};
pub use gateway::EventsGateway;
pub use reducer::ListingReducer;
pub use store::ListingStore;
pub use types::{Event, EventId, IdentityPhase, ListingState, LoadPhase, Notice};
