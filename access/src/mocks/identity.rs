//! In-memory identity provider for tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{AccessError, Result};
use crate::identity::IdentitySnapshot;
use crate::providers::IdentityProvider;

#[derive(Debug, Default)]
struct MockIdentityState {
    snapshot: IdentitySnapshot,
    credential: Option<String>,
    fail_reason: Option<String>,
    resolve_calls: usize,
    credential_calls: usize,
}

/// Mock identity provider backed by in-memory state.
///
/// Starts anonymous. Tests seed an identity, flip it back to anonymous, or
/// inject failures, and can observe how many times each operation ran.
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    inner: Arc<Mutex<MockIdentityState>>,
}

impl MockIdentityProvider {
    /// Create a provider with no resolved identity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the identity and credential returned by subsequent calls
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn set_identity(
        &self,
        snapshot: IdentitySnapshot,
        credential: Option<String>,
    ) -> Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
        state.snapshot = snapshot;
        state.credential = credential;
        Ok(())
    }

    /// Flip the provider back to the anonymous state
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn sign_out(&self) -> Result<()> {
        self.set_identity(IdentitySnapshot::anonymous(), None)
    }

    /// Make both operations fail with the given reason until cleared
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn fail_with(&self, reason: impl Into<String>) -> Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
        state.fail_reason = Some(reason.into());
        Ok(())
    }

    /// Stop injecting failures
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn clear_failure(&self) -> Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
        state.fail_reason = None;
        Ok(())
    }

    /// How many times `resolve` has been called
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn resolve_calls(&self) -> Result<usize> {
        let state = self
            .inner
            .lock()
            .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
        Ok(state.resolve_calls)
    }

    /// How many times `fetch_credential` has been called
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn credential_calls(&self) -> Result<usize> {
        let state = self
            .inner
            .lock()
            .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
        Ok(state.credential_calls)
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn resolve(&self) -> impl Future<Output = Result<IdentitySnapshot>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner
                .lock()
                .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
            state.resolve_calls += 1;
            if let Some(reason) = &state.fail_reason {
                return Err(AccessError::IdentityUnavailable {
                    reason: reason.clone(),
                });
            }
            Ok(state.snapshot.clone())
        }
    }

    fn fetch_credential(&self) -> impl Future<Output = Result<Option<String>>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner
                .lock()
                .map_err(|_| AccessError::Internal("Mutex lock failed".to_string()))?;
            state.credential_calls += 1;
            if let Some(reason) = &state.fail_reason {
                return Err(AccessError::IdentityUnavailable {
                    reason: reason.clone(),
                });
            }
            Ok(state.credential.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::identity::UserId;
    use crate::tier::Tier;

    #[tokio::test]
    async fn starts_anonymous_with_no_credential() {
        let provider = MockIdentityProvider::new();
        let snapshot = provider.resolve().await.unwrap();
        assert!(!snapshot.is_present());
        assert_eq!(provider.fetch_credential().await.unwrap(), None);
    }

    #[tokio::test]
    async fn returns_the_seeded_identity_and_credential() {
        let provider = MockIdentityProvider::new();
        provider
            .set_identity(
                IdentitySnapshot::signed_in(UserId::new("user-1"), [Tier::Gold]),
                Some("token-1".to_string()),
            )
            .unwrap();

        let snapshot = provider.resolve().await.unwrap();
        assert_eq!(snapshot.plan(), Tier::Gold);
        assert_eq!(
            provider.fetch_credential().await.unwrap(),
            Some("token-1".to_string())
        );
    }

    #[tokio::test]
    async fn sign_out_reverts_to_anonymous() {
        let provider = MockIdentityProvider::new();
        provider
            .set_identity(
                IdentitySnapshot::signed_in(UserId::new("user-1"), []),
                Some("token-1".to_string()),
            )
            .unwrap();
        provider.sign_out().unwrap();

        assert!(!provider.resolve().await.unwrap().is_present());
        assert_eq!(provider.fetch_credential().await.unwrap(), None);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_identity_unavailable() {
        let provider = MockIdentityProvider::new();
        provider.fail_with("service offline").unwrap();

        let err = provider.resolve().await.unwrap_err();
        assert_eq!(
            err,
            AccessError::IdentityUnavailable {
                reason: "service offline".to_string()
            }
        );

        provider.clear_failure().unwrap();
        assert!(provider.resolve().await.is_ok());
    }

    #[tokio::test]
    async fn counts_calls_across_clones() {
        let provider = MockIdentityProvider::new();
        let clone = provider.clone();

        provider.resolve().await.unwrap();
        clone.resolve().await.unwrap();
        clone.fetch_credential().await.unwrap();

        assert_eq!(provider.resolve_calls().unwrap(), 2);
        assert_eq!(provider.credential_calls().unwrap(), 1);
    }
}
