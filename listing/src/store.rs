//! Store for the event listing.

use eventgate_access::IdentityProvider;
use eventgate_client::HandleFactory;
use eventgate_core::effect::Effect;
use eventgate_core::environment::Clock;
use eventgate_core::reducer::Reducer;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::actions::ListingAction;
use crate::environment::ListingEnvironment;
use crate::gateway::EventsGateway;
use crate::reducer::ListingReducer;
use crate::types::ListingState;

/// Store for the event listing.
///
/// Owns the state behind an async lock, runs the reducer, and executes the
/// returned effects inline, feeding produced actions back in. `dispatch`
/// returns only after the action and everything it caused have settled,
/// which keeps scenario tests and the demo shell deterministic.
pub struct ListingStore<I, F, C, G>
where
    I: IdentityProvider + Clone + 'static,
    F: HandleFactory + Clone + 'static,
    C: Clock + Clone + 'static,
    G: EventsGateway<F::Handle> + Clone + 'static,
{
    state: Arc<RwLock<ListingState>>,
    reducer: ListingReducer<I, F, C, G>,
    env: ListingEnvironment<I, F, C, G>,
}

impl<I, F, C, G> ListingStore<I, F, C, G>
where
    I: IdentityProvider + Clone + 'static,
    F: HandleFactory + Clone + 'static,
    C: Clock + Clone + 'static,
    G: EventsGateway<F::Handle> + Clone + 'static,
{
    /// Create a new listing store.
    #[must_use]
    pub fn new(environment: ListingEnvironment<I, F, C, G>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ListingState::new())),
            reducer: ListingReducer::new(),
            env: environment,
        }
    }

    /// Dispatch an action to the store.
    ///
    /// Runs the reducer under the write lock, then executes every returned
    /// effect with the lock released, dispatching produced actions back in
    /// before returning.
    pub async fn dispatch(&self, action: ListingAction) {
        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.env)
        };
        for effect in effects {
            self.execute_effect(effect).await;
        }
    }

    /// Get a snapshot of the current state.
    pub async fn state(&self) -> ListingState {
        self.state.read().await.clone()
    }

    fn execute_effect<'a>(
        &'a self,
        effect: Effect<ListingAction>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            match effect {
                Effect::None => {}
                Effect::Future(future) => {
                    if let Some(action) = future.await {
                        self.dispatch(action).await;
                    }
                }
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    self.dispatch(*action).await;
                }
                // Ordering is all the inline executor guarantees; parallel
                // effects simply run in turn.
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for nested in effects {
                        self.execute_effect(nested).await;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::mocks::MockEventsGateway;
    use eventgate_access::mocks::MockIdentityProvider;
    use eventgate_client::HandleCache;
    use eventgate_client::mocks::MockHandleFactory;
    use eventgate_testing::{FixedClock, test_clock};

    fn test_store() -> ListingStore<MockIdentityProvider, MockHandleFactory, FixedClock, MockEventsGateway>
    {
        let cache = Arc::new(HandleCache::new(MockHandleFactory::new(), test_clock()));
        let env = ListingEnvironment::new(
            MockIdentityProvider::new(),
            cache,
            MockEventsGateway::new(),
        );
        ListingStore::new(env)
    }

    #[tokio::test]
    async fn store_starts_with_the_initial_state() {
        let store = test_store();
        assert_eq!(store.state().await, ListingState::new());
    }

    #[tokio::test]
    async fn dispatch_updates_state_through_the_reducer() {
        let store = test_store();

        store
            .dispatch(ListingAction::SearchChanged {
                query: "jazz".to_string(),
            })
            .await;

        assert_eq!(store.state().await.search_query, "jazz");
    }
}
