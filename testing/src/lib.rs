//! # Eventgate Testing
//!
//! Testing utilities and helpers for the Eventgate architecture.
//!
//! This crate provides:
//! - Mock clocks for deterministic time (fixed and manually advanced)
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use eventgate_testing::{ReducerTest, test_clock};
//!
//! #[test]
//! fn denied_filter_reverts_to_all() {
//!     ReducerTest::new(ListingReducer::new())
//!         .with_env(test_environment())
//!         .given_state(ListingState::new())
//!         .when_action(ListingAction::FilterSelected {
//!             filter: TierFilter::Only(Tier::Gold),
//!         })
//!         .then_state(|state| {
//!             assert_eq!(state.selected_filter, TierFilter::All);
//!         })
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use eventgate_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations of Environment traits
///
/// Feature crates keep their provider mocks next to the providers; the
/// clocks live here because every environment carries one.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventgate_testing::mocks::FixedClock;
    /// use eventgate_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Manually advanced clock for expiry tests
    ///
    /// Starts at a given instant and moves only when the test advances it,
    /// so TTL windows can be crossed without sleeping.
    ///
    /// # Example
    ///
    /// ```
    /// use eventgate_testing::mocks::ManualClock;
    /// use eventgate_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let clock = ManualClock::new(Utc::now());
    /// let before = clock.now();
    /// clock.advance(Duration::minutes(31));
    /// assert_eq!(clock.now() - before, Duration::minutes(31));
    /// ```
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a new manual clock starting at the given time
        #[must_use]
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(start)),
            }
        }

        /// Advance the clock by the given duration
        pub fn advance(&self, by: chrono::Duration) {
            let mut guard = Self::guard(&self.time);
            *guard = *guard + by;
        }

        /// Move the clock to an absolute instant
        pub fn set(&self, to: DateTime<Utc>) {
            *Self::guard(&self.time) = to;
        }

        // A poisoned lock still holds a usable timestamp.
        fn guard(
            time: &Arc<Mutex<DateTime<Utc>>>,
        ) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
            match time.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *Self::guard(&self.time)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualClock, test_clock};
pub use reducer_test::ReducerTest;
