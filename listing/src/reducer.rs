//! Reducer for the event listing.

use eventgate_access::{IdentityProvider, IdentitySnapshot, TierFilter};
use eventgate_client::HandleFactory;
use eventgate_core::effect::Effect;
use eventgate_core::environment::Clock;
use eventgate_core::reducer::Reducer;
use eventgate_core::{SmallVec, smallvec};
use std::sync::Arc;

use crate::actions::ListingAction;
use crate::environment::ListingEnvironment;
use crate::gateway::EventsGateway;
use crate::types::{IdentityPhase, ListingState, LoadPhase, Notice};

/// Event listing reducer.
///
/// Drives identity resolution, event loading, and the tier filter policy as
/// a pure state transition function; all I/O happens in the returned
/// effects. The two suspension points are the credential fetch and the
/// backend query, both inside the fetch effect.
#[derive(Debug, Clone)]
pub struct ListingReducer<I, F, C, G> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(I, F, C, G)>,
}

impl<I, F, C, G> ListingReducer<I, F, C, G> {
    /// Create a new listing reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<I, F, C, G> Default for ListingReducer<I, F, C, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, F, C, G> ListingReducer<I, F, C, G>
where
    I: IdentityProvider + Clone + 'static,
    F: HandleFactory + Clone + 'static,
    C: Clock + Clone + 'static,
    G: EventsGateway<F::Handle> + Clone + 'static,
{
    /// Effect running the full fetch flow: credential, cached handle, query.
    fn fetch_effect(env: &ListingEnvironment<I, F, C, G>) -> Effect<ListingAction> {
        let identity = env.identity.clone();
        let cache = Arc::clone(&env.cache);
        let gateway = env.gateway.clone();

        Effect::Future(Box::pin(async move {
            let credential = match identity.fetch_credential().await {
                Ok(credential) => credential,
                Err(err) => {
                    return Some(ListingAction::FetchFailed {
                        message: err.to_string(),
                    });
                }
            };
            let handle = match cache.get_handle(credential.as_deref()) {
                Ok(handle) => handle,
                Err(err) => {
                    return Some(ListingAction::FetchFailed {
                        message: err.to_string(),
                    });
                }
            };
            match gateway.list_events(&handle).await {
                Ok(events) => Some(ListingAction::EventsLoaded { events }),
                Err(err) => Some(ListingAction::FetchFailed {
                    message: err.to_string(),
                }),
            }
        }))
    }
}

impl<I, F, C, G> Reducer for ListingReducer<I, F, C, G>
where
    I: IdentityProvider + Clone + 'static,
    F: HandleFactory + Clone + 'static,
    C: Clock + Clone + 'static,
    G: EventsGateway<F::Handle> + Clone + 'static,
{
    type State = ListingState;
    type Action = ListingAction;
    type Environment = ListingEnvironment<I, F, C, G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Started: Begin identity resolution
            // ═══════════════════════════════════════════════════════════════
            ListingAction::Started => {
                state.identity = IdentityPhase::Resolving;
                tracing::debug!("Resolving identity");

                let identity = env.identity.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match identity.resolve().await {
                        Ok(snapshot) => Some(ListingAction::IdentityChanged { snapshot }),
                        Err(err) => Some(ListingAction::IdentityUnavailable {
                            reason: err.to_string(),
                        }),
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // IdentityChanged: Adopt the snapshot, then refetch
            // ═══════════════════════════════════════════════════════════════
            ListingAction::IdentityChanged { snapshot } => {
                let unchanged =
                    matches!(&state.identity, IdentityPhase::Resolved(prev) if *prev == snapshot);
                if unchanged {
                    tracing::debug!("Identity unchanged, skipping refetch");
                    return smallvec![Effect::None];
                }

                let plan = snapshot.plan();
                state.plan = plan;
                if !state.selected_filter.covered_by(plan) {
                    // A sign-out with a paid filter selected must not leave
                    // a denied filter active.
                    state.selected_filter = TierFilter::All;
                }
                state.identity = IdentityPhase::Resolved(snapshot.clone());
                tracing::info!(plan = %plan, present = snapshot.is_present(), "Identity resolved");

                // The cache must see the observation before the fetch builds
                // a handle, so the two effects are sequenced.
                let cache = Arc::clone(&env.cache);
                smallvec![Effect::chain(vec![
                    Effect::Future(Box::pin(async move {
                        cache.observe_identity(&snapshot);
                        None
                    })),
                    Effect::Future(Box::pin(async { Some(ListingAction::FetchEvents) })),
                ])]
            }

            // ═══════════════════════════════════════════════════════════════
            // IdentityUnavailable: Degrade to a signed-out visitor
            // ═══════════════════════════════════════════════════════════════
            ListingAction::IdentityUnavailable { reason } => {
                tracing::warn!(reason = %reason, "Identity unavailable, assuming signed out");
                smallvec![Effect::Future(Box::pin(async {
                    Some(ListingAction::IdentityChanged {
                        snapshot: IdentitySnapshot::anonymous(),
                    })
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // FetchEvents: Load events through the cached handle
            // ═══════════════════════════════════════════════════════════════
            ListingAction::FetchEvents => {
                state.load = LoadPhase::Loading;
                tracing::debug!("Fetching events");
                smallvec![Self::fetch_effect(env)]
            }

            // ═══════════════════════════════════════════════════════════════
            // EventsLoaded: Store the rows
            // ═══════════════════════════════════════════════════════════════
            ListingAction::EventsLoaded { mut events } => {
                // Gateways order by date already; re-sort in case one does not.
                events.sort_by_key(|event| event.event_date);
                tracing::info!(count = events.len(), "Events loaded");
                state.events = events;
                state.load = LoadPhase::Loaded;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // FetchFailed: Park in the failed phase until a manual retry
            // ═══════════════════════════════════════════════════════════════
            ListingAction::FetchFailed { message } => {
                tracing::warn!(message = %message, "Event fetch failed");
                state.load = LoadPhase::Failed { message };
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // SearchChanged: Client-side narrowing only
            // ═══════════════════════════════════════════════════════════════
            ListingAction::SearchChanged { query } => {
                state.search_query = query;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // FilterSelected: Apply the coverage rule
            // ═══════════════════════════════════════════════════════════════
            ListingAction::FilterSelected { filter } => {
                if filter.covered_by(state.plan) {
                    state.selected_filter = filter;
                    state.notice = None;
                } else if let TierFilter::Only(denied) = filter {
                    tracing::warn!(plan = %state.plan, denied = %denied, "Tier filter denied");
                    state.selected_filter = TierFilter::All;
                    state.notice = Some(Notice::upgrade_required(denied));
                }
                // The "all" sentinel is always covered, so there is no third
                // case.
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // NoticeDismissed: Clear the pending notice
            // ═══════════════════════════════════════════════════════════════
            ListingAction::NoticeDismissed => {
                state.notice = None;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Retry: Refetch after a failure
            // ═══════════════════════════════════════════════════════════════
            ListingAction::Retry => {
                if matches!(state.load, LoadPhase::Failed { .. }) {
                    smallvec![Effect::Future(Box::pin(async {
                        Some(ListingAction::FetchEvents)
                    }))]
                } else {
                    tracing::debug!("Retry ignored outside the failed phase");
                    smallvec![Effect::None]
                }
            }
        }
    }
}
