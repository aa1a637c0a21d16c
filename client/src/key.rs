//! Cache keys derived from credentials.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier for one cache slot.
///
/// Derived from the credential by a one-way fingerprint, so a key can be
/// stored, logged, and compared without ever exposing the secret it stands
/// for. Visitors without a credential all map to the [`Self::ANONYMOUS`]
/// sentinel key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Sentinel key shared by all visitors without a credential
    pub const ANONYMOUS: &'static str = "anonymous";

    /// Derive the key for a credential.
    ///
    /// The credential is hashed with SHA-256 and the digest is encoded as
    /// URL-safe base64. An empty credential is still a credential and gets a
    /// fingerprint; only `None` maps to the anonymous sentinel.
    #[must_use]
    pub fn derive(credential: Option<&str>) -> Self {
        match credential {
            Some(secret) => {
                let mut hasher = Sha256::new();
                hasher.update(secret.as_bytes());
                let digest = hasher.finalize();
                Self(URL_SAFE_NO_PAD.encode(digest))
            }
            None => Self(Self::ANONYMOUS.to_string()),
        }
    }

    /// The fingerprint, or the anonymous sentinel
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the shared anonymous key
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0 == Self::ANONYMOUS
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
