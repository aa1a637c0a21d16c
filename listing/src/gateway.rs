//! Gateway trait for the events backend.

use std::future::Future;

use crate::error::Result;
use crate::types::Event;

/// Surface of the events backend.
///
/// A gateway issues queries through a backend handle it does not own; the
/// handle comes from the [`HandleCache`](eventgate_client::HandleCache) and
/// carries whatever credential it was built with. This is the second of the
/// two suspension points in the listing flow.
pub trait EventsGateway<H>: Send + Sync {
    /// List all events, ordered by event date ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Backend`](crate::ListingError::Backend) when
    /// the query fails or the backend rejects the handle's credential.
    fn list_events(&self, handle: &H) -> impl Future<Output = Result<Vec<Event>>> + Send;
}
