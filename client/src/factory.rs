//! Factory trait for constructing backend handles.

use crate::error::Result;

/// Constructs backend handles for credentials.
///
/// The cache delegates all construction here and treats the handle as
/// opaque. Implementations must be synchronous and cheap; the cache calls
/// [`build`](Self::build) while holding its lock so that two racing lookups
/// for the same credential cannot both construct.
pub trait HandleFactory: Send + Sync {
    /// The backend handle this factory produces
    type Handle: Send + Sync + 'static;

    /// Construct a handle for the given credential.
    ///
    /// `None` means an anonymous handle. The factory decides what, if
    /// anything, the credential is used for; the cache only fingerprints it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConstructionFailed`](crate::ClientError::ConstructionFailed)
    /// when a handle cannot be produced. The cache propagates the error and
    /// stores nothing.
    fn build(&self, credential: Option<&str>) -> Result<Self::Handle>;
}
