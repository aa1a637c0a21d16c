//! Identity snapshots and the effective-plan derivation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::tier::Tier;

/// Opaque subject identifier issued by the identity service.
///
/// Treated as a token, never parsed or interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wrap a subject identifier
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved observation of the identity signal.
///
/// Snapshots are immutable values: resolution produces a new snapshot rather
/// than mutating an old one, so consumers can compare two observations to
/// detect sign-in and sign-out edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IdentitySnapshot {
    user_id: Option<UserId>,
    granted_plans: BTreeSet<Tier>,
}

impl IdentitySnapshot {
    /// Snapshot of a visitor with no resolved identity
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Snapshot of a signed-in visitor with the given plan grants
    #[must_use]
    pub fn signed_in(user_id: UserId, granted_plans: impl IntoIterator<Item = Tier>) -> Self {
        Self {
            user_id: Some(user_id),
            granted_plans: granted_plans.into_iter().collect(),
        }
    }

    /// The subject identifier, if an identity resolved
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Whether an identity is present
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.user_id.is_some()
    }

    /// Whether the membership signal granted the given plan
    #[must_use]
    pub fn has_plan(&self, tier: Tier) -> bool {
        self.granted_plans.contains(&tier)
    }

    /// Effective plan for this snapshot.
    ///
    /// Plans are checked in a fixed priority order, platinum first, then
    /// gold, then silver; the first granted plan wins and anything else
    /// falls through to free. When the signal grants several plans at once
    /// the order decides, not a separate "highest tier" computation.
    #[must_use]
    pub fn plan(&self) -> Tier {
        const PRIORITY: [Tier; 3] = [Tier::Platinum, Tier::Gold, Tier::Silver];

        for candidate in PRIORITY {
            if self.has_plan(candidate) {
                return candidate;
            }
        }
        Tier::Free
    }
}
