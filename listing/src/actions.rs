//! Actions for the event listing.

use eventgate_access::{IdentitySnapshot, TierFilter};
use serde::{Deserialize, Serialize};

use crate::types::Event;

/// Actions processed by the [`ListingReducer`](crate::ListingReducer).
///
/// External surfaces dispatch the user-facing actions (`Started`,
/// `SearchChanged`, `FilterSelected`, `NoticeDismissed`, `Retry`); the rest
/// are fed back by effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ListingAction {
    /// Start the listing: begin identity resolution.
    ///
    /// Dispatched once when the listing surface appears, and again whenever
    /// the identity should be re-observed (e.g. after a sign-in or
    /// sign-out elsewhere in the application).
    Started,

    /// Identity resolution produced a snapshot.
    ///
    /// Fed back by the resolution effect. A snapshot equal to the one
    /// already resolved is a no-op.
    IdentityChanged {
        /// The resolved identity observation
        snapshot: IdentitySnapshot,
    },

    /// Identity resolution failed.
    ///
    /// Not an error state: the listing assumes a signed-out visitor on the
    /// lowest tier until a later resolution succeeds.
    IdentityUnavailable {
        /// Why resolution failed
        reason: String,
    },

    /// Load events from the backend.
    FetchEvents,

    /// The backend returned events.
    EventsLoaded {
        /// Event rows, expected ordered by date ascending
        events: Vec<Event>,
    },

    /// The fetch failed.
    FetchFailed {
        /// User-presentable failure description
        message: String,
    },

    /// The search query changed.
    ///
    /// Narrowing is client-side; no refetch happens.
    SearchChanged {
        /// New query, empty to clear
        query: String,
    },

    /// A tier filter was selected.
    ///
    /// Selections the plan does not cover are denied: the filter reverts to
    /// "all" and an upgrade notice is raised.
    FilterSelected {
        /// The requested filter
        filter: TierFilter,
    },

    /// The user dismissed the pending notice.
    NoticeDismissed,

    /// Retry a failed fetch.
    ///
    /// Only meaningful in the failed load phase; ignored otherwise.
    Retry,
}
