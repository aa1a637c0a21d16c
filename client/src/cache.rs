//! Keyed backend handle cache with bounded lifetime.

use chrono::{DateTime, Duration, Utc};
use eventgate_access::IdentitySnapshot;
use eventgate_core::environment::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::factory::HandleFactory;
use crate::key::CacheKey;

/// One cached handle and the instant it was constructed
struct CacheEntry<H> {
    handle: Arc<H>,
    created_at: DateTime<Utc>,
}

/// Entries plus the last observed identity presence, guarded together
struct CacheState<H> {
    entries: HashMap<CacheKey, CacheEntry<H>>,
    identity_present: bool,
}

/// Cache of backend handles keyed by credential fingerprint.
///
/// Holds at most one live handle per [`CacheKey`]. Repeated lookups with the
/// same credential return clones of the same [`Arc`] until the entry ages out
/// or is invalidated. Expired entries are swept at the start of every lookup
/// rather than by a background task, so an idle cache does no work.
///
/// The factory runs under the cache lock: two racing lookups for one key
/// construct one handle. Nothing async happens behind this lock, and the
/// lock is never held across an await point.
pub struct HandleCache<F: HandleFactory, C: Clock> {
    factory: F,
    clock: C,
    config: CacheConfig,
    state: Mutex<CacheState<F::Handle>>,
}

impl<F: HandleFactory, C: Clock> HandleCache<F, C> {
    /// Create a cache with the default configuration
    #[must_use]
    pub fn new(factory: F, clock: C) -> Self {
        Self::with_config(factory, clock, CacheConfig::default())
    }

    /// Create a cache with an explicit configuration
    #[must_use]
    pub fn with_config(factory: F, clock: C, config: CacheConfig) -> Self {
        Self {
            factory,
            clock,
            config,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                identity_present: false,
            }),
        }
    }

    /// Return the handle for a credential, constructing one on a miss.
    ///
    /// Sweeps expired entries first, so a stale handle is never returned and
    /// entries for other credentials age out without their own lookups. On a
    /// miss the factory builds a handle and the entry is stored with the
    /// current instant as its creation time.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError::ConstructionFailed`](crate::ClientError::ConstructionFailed)
    /// from the factory. Nothing is cached for the failed key; the next
    /// lookup retries construction.
    pub fn get_handle(&self, credential: Option<&str>) -> Result<Arc<F::Handle>> {
        let now = self.clock.now();
        let ttl = Duration::minutes(self.config.ttl_minutes);

        let mut state = self.lock_state();
        let before = state.entries.len();
        state
            .entries
            .retain(|_, entry| now.signed_duration_since(entry.created_at) < ttl);
        let swept = before - state.entries.len();
        if swept > 0 {
            debug!(swept, "Swept expired backend handles");
        }

        let key = CacheKey::derive(credential);
        if let Some(entry) = state.entries.get(&key) {
            trace!(key = %key, "Backend handle cache hit");
            return Ok(Arc::clone(&entry.handle));
        }

        let handle = Arc::new(self.factory.build(credential)?);
        debug!(key = %key, "Constructed backend handle");
        state.entries.insert(
            key,
            CacheEntry {
                handle: Arc::clone(&handle),
                created_at: now,
            },
        );
        Ok(handle)
    }

    /// Drop every cached handle immediately
    pub fn invalidate_all(&self) {
        let mut state = self.lock_state();
        let count = state.entries.len();
        state.entries.clear();
        info!(count, "Invalidated all cached handles");
    }

    /// Feed the cache an identity observation.
    ///
    /// When the identity transitions from present to absent, every cached
    /// handle is invalidated and `true` is returned. The purge fires once per
    /// transition: repeating an absent observation, or starting out absent,
    /// purges nothing.
    pub fn observe_identity(&self, snapshot: &IdentitySnapshot) -> bool {
        let mut state = self.lock_state();
        let was_present = state.identity_present;
        let present = snapshot.is_present();
        state.identity_present = present;

        if was_present && !present {
            let count = state.entries.len();
            state.entries.clear();
            info!(count, "Identity went away, invalidated cached handles");
            return true;
        }
        false
    }

    /// Number of entries currently stored.
    ///
    /// Includes entries past their lifetime that no lookup has swept yet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_state().entries.len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_state().entries.is_empty()
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState<F::Handle>> {
        match self.state.lock() {
            Ok(guard) => guard,
            // A poisoned lock still guards a consistent map of disposable entries.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::mocks::MockHandleFactory;
    use eventgate_access::UserId;
    use eventgate_testing::{ManualClock, test_clock};

    fn cache_with_clock() -> (HandleCache<MockHandleFactory, ManualClock>, MockHandleFactory, ManualClock) {
        let factory = MockHandleFactory::new();
        let clock = ManualClock::new(test_clock().now());
        let cache = HandleCache::new(factory.clone(), clock.clone());
        (cache, factory, clock)
    }

    #[test]
    fn miss_constructs_then_hit_reuses() {
        let (cache, factory, _clock) = cache_with_clock();

        let first = cache.get_handle(Some("bearer-abc")).unwrap();
        let second = cache.get_handle(Some("bearer-abc")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.builds().unwrap(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_credentials_get_distinct_handles() {
        let (cache, factory, _clock) = cache_with_clock();

        let a = cache.get_handle(Some("bearer-abc")).unwrap();
        let b = cache.get_handle(Some("bearer-xyz")).unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(factory.builds().unwrap(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn anonymous_and_credentialed_do_not_share() {
        let (cache, factory, _clock) = cache_with_clock();

        let anonymous = cache.get_handle(None).unwrap();
        let signed = cache.get_handle(Some("bearer-abc")).unwrap();
        let anonymous_again = cache.get_handle(None).unwrap();

        assert!(!Arc::ptr_eq(&anonymous, &signed));
        assert!(Arc::ptr_eq(&anonymous, &anonymous_again));
        assert_eq!(factory.builds().unwrap(), 2);
    }

    #[test]
    fn handle_expires_at_the_lifetime_boundary() {
        let (cache, factory, clock) = cache_with_clock();

        cache.get_handle(Some("bearer-abc")).unwrap();

        clock.advance(Duration::minutes(29));
        cache.get_handle(Some("bearer-abc")).unwrap();
        assert_eq!(factory.builds().unwrap(), 1, "entry still live at 29 minutes");

        clock.advance(Duration::minutes(1));
        cache.get_handle(Some("bearer-abc")).unwrap();
        assert_eq!(factory.builds().unwrap(), 2, "entry expired at exactly 30 minutes");
    }

    #[test]
    fn configured_lifetime_is_respected() {
        let factory = MockHandleFactory::new();
        let clock = ManualClock::new(test_clock().now());
        let cache = HandleCache::with_config(
            factory.clone(),
            clock.clone(),
            CacheConfig::new().with_ttl_minutes(5),
        );

        cache.get_handle(None).unwrap();
        clock.advance(Duration::minutes(5));
        cache.get_handle(None).unwrap();

        assert_eq!(factory.builds().unwrap(), 2);
    }

    #[test]
    fn lookup_sweeps_expired_entries_for_other_keys() {
        let (cache, _factory, clock) = cache_with_clock();

        cache.get_handle(Some("bearer-abc")).unwrap();
        cache.get_handle(Some("bearer-xyz")).unwrap();
        assert_eq!(cache.len(), 2);

        clock.advance(Duration::minutes(31));
        cache.get_handle(Some("bearer-new")).unwrap();

        assert_eq!(cache.len(), 1, "both stale entries swept by the new lookup");
    }

    #[test]
    fn construction_failure_caches_nothing() {
        let (cache, factory, _clock) = cache_with_clock();
        factory.fail_with("backend unreachable").unwrap();

        let err = cache.get_handle(Some("bearer-abc")).unwrap_err();
        assert_eq!(
            err,
            crate::ClientError::ConstructionFailed {
                reason: "backend unreachable".to_string()
            }
        );
        assert!(cache.is_empty());

        factory.clear_failure().unwrap();
        cache.get_handle(Some("bearer-abc")).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn sign_out_edge_purges_exactly_once() {
        let (cache, _factory, _clock) = cache_with_clock();
        let signed_in = IdentitySnapshot::signed_in(UserId::new("user-1"), []);
        let anonymous = IdentitySnapshot::anonymous();

        assert!(!cache.observe_identity(&signed_in));
        cache.get_handle(Some("bearer-abc")).unwrap();
        cache.get_handle(None).unwrap();

        assert!(cache.observe_identity(&anonymous), "present to absent purges");
        assert!(cache.is_empty());

        cache.get_handle(None).unwrap();
        assert!(
            !cache.observe_identity(&anonymous),
            "repeated absent observation does not purge again"
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn starting_out_absent_never_purges() {
        let (cache, _factory, _clock) = cache_with_clock();

        cache.get_handle(None).unwrap();
        assert!(!cache.observe_identity(&IdentitySnapshot::anonymous()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_all_clears_and_next_lookup_rebuilds() {
        let (cache, factory, _clock) = cache_with_clock();

        let first = cache.get_handle(Some("bearer-abc")).unwrap();
        cache.invalidate_all();
        assert!(cache.is_empty());

        let second = cache.get_handle(Some("bearer-abc")).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(factory.builds().unwrap(), 2);
    }
}
