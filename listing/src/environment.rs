//! Listing environment.
//!
//! This module defines the environment type for dependency injection
//! in the listing reducer.

use eventgate_access::IdentityProvider;
use eventgate_client::{HandleCache, HandleFactory};
use eventgate_core::environment::Clock;
use std::sync::Arc;

use crate::gateway::EventsGateway;

/// Listing environment.
///
/// Contains all external dependencies needed by the listing reducer. The
/// handle cache is shared: it is constructed once at application start and
/// the same instance is injected wherever backend access happens, so its
/// sign-out purge covers every consumer.
///
/// # Type Parameters
///
/// - `I`: Identity provider
/// - `F`: Backend handle factory
/// - `C`: Clock driving cache expiry
/// - `G`: Events gateway
#[derive(Clone)]
pub struct ListingEnvironment<I, F, C, G>
where
    I: IdentityProvider + Clone,
    F: HandleFactory + Clone,
    C: Clock + Clone,
    G: EventsGateway<F::Handle> + Clone,
{
    /// Identity provider (resolution and credential issue)
    pub identity: I,

    /// Shared backend handle cache
    pub cache: Arc<HandleCache<F, C>>,

    /// Events backend gateway
    pub gateway: G,
}

impl<I, F, C, G> ListingEnvironment<I, F, C, G>
where
    I: IdentityProvider + Clone,
    F: HandleFactory + Clone,
    C: Clock + Clone,
    G: EventsGateway<F::Handle> + Clone,
{
    /// Create a new listing environment.
    #[must_use]
    pub const fn new(identity: I, cache: Arc<HandleCache<F, C>>, gateway: G) -> Self {
        Self {
            identity,
            cache,
            gateway,
        }
    }
}
