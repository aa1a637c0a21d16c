//! In-memory events gateway for tests.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use eventgate_client::mocks::MockHandle;

use crate::error::{ListingError, Result};
use crate::gateway::EventsGateway;
use crate::types::Event;

#[derive(Debug, Default)]
struct MockGatewayState {
    events: Vec<Event>,
    fail_reason: Option<String>,
    calls: usize,
    seen_serials: Vec<usize>,
}

/// Mock events gateway backed by in-memory rows.
///
/// Serves seeded events, can be made to fail on demand, and records which
/// handle each query came through. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockEventsGateway {
    inner: Arc<Mutex<MockGatewayState>>,
}

impl MockEventsGateway {
    /// Create a gateway serving no events
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway serving the given events
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        let gateway = Self::default();
        gateway.set_events(events);
        gateway
    }

    /// Replace the served events
    pub fn set_events(&self, events: Vec<Event>) {
        Self::guard(&self.inner).events = events;
    }

    /// Make queries fail with the given message until cleared
    pub fn fail_with(&self, message: impl Into<String>) {
        Self::guard(&self.inner).fail_reason = Some(message.into());
    }

    /// Stop injecting failures
    pub fn clear_failure(&self) {
        Self::guard(&self.inner).fail_reason = None;
    }

    /// How many queries have been issued
    #[must_use]
    pub fn calls(&self) -> usize {
        Self::guard(&self.inner).calls
    }

    /// Construction serials of the handles queries came through, in order
    #[must_use]
    pub fn seen_serials(&self) -> Vec<usize> {
        Self::guard(&self.inner).seen_serials.clone()
    }

    fn guard(inner: &Mutex<MockGatewayState>) -> MutexGuard<'_, MockGatewayState> {
        match inner.lock() {
            Ok(guard) => guard,
            // A poisoned lock still holds usable test fixtures.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl EventsGateway<MockHandle> for MockEventsGateway {
    fn list_events(&self, handle: &MockHandle) -> impl Future<Output = Result<Vec<Event>>> + Send {
        let inner = Arc::clone(&self.inner);
        let serial = handle.serial;
        async move {
            let mut state = Self::guard(&inner);
            state.calls += 1;
            state.seen_serials.push(serial);
            if let Some(message) = &state.fail_reason {
                return Err(ListingError::Backend {
                    message: message.clone(),
                });
            }
            Ok(state.events.clone())
        }
    }
}
