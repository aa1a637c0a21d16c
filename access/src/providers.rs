//! Provider trait for the external identity service.

use std::future::Future;

use crate::error::Result;
use crate::identity::IdentitySnapshot;

/// Surface of the external identity service.
///
/// Both operations are suspension points: callers must treat the identity as
/// unknown until the returned future resolves, and must not block rendering
/// or policy evaluation on it. Implementations are expected to be cheap to
/// clone handles over shared connections.
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current identity into an immutable snapshot.
    ///
    /// Resolution failures are reported as errors rather than being mapped
    /// to an anonymous snapshot here; the caller decides how to degrade.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::IdentityUnavailable`](crate::AccessError::IdentityUnavailable)
    /// when the identity service cannot be reached or rejects the request.
    fn resolve(&self) -> impl Future<Output = Result<IdentitySnapshot>> + Send;

    /// Fetch a fresh bearer credential for the current identity.
    ///
    /// Returns `Ok(None)` for anonymous visitors. The credential is an opaque
    /// string used only for fingerprinting and for authenticating backend
    /// calls; it is never stored in state.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::IdentityUnavailable`](crate::AccessError::IdentityUnavailable)
    /// when the credential cannot be issued.
    fn fetch_credential(&self) -> impl Future<Output = Result<Option<String>>> + Send;
}
