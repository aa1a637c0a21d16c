//! # Eventgate Access
//!
//! Tier policy and identity resolution for the Eventgate platform.
//!
//! ## Features
//!
//! - **Ordered tiers**: `free < silver < gold < platinum`, compared by rank
//! - **Coverage rule**: a plan covers content at or below its own rank
//! - **Filter sentinel**: [`TierFilter::All`] admits every tier without ranking
//! - **Identity snapshots**: resolved observations of the external identity
//!   signal, with the effective plan derived in fixed priority order
//! - **Provider trait**: async resolution against the real identity service,
//!   with mocks for tests
//!
//! ## Architecture
//!
//! Policy decisions are pure functions over [`Tier`] and [`IdentitySnapshot`];
//! only [`IdentityProvider`] touches the outside world. Callers resolve a
//! snapshot once and evaluate policy locally, so a slow identity service never
//! blocks a coverage check.
//!
//! ## Example
//!
//! ```rust
//! use eventgate_access::{Tier, TierFilter};
//!
//! let plan = Tier::Gold;
//! assert!(plan.covers(Tier::Silver));
//! assert!(!plan.covers(Tier::Platinum));
//!
//! let filter: TierFilter = "all".parse().unwrap();
//! assert!(filter.covered_by(Tier::Free));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

// Public modules
pub mod error;
pub mod identity;
pub mod providers;
pub mod tier;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use error::{AccessError, Result};
pub use identity::{IdentitySnapshot, UserId};
pub use providers::IdentityProvider;
pub use tier::{Tier, TierFilter};
