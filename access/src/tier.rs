//! Ordered membership tiers and the coverage policy evaluated against them.
//!
//! Every piece of content is labeled with the minimum [`Tier`] required to
//! view it, and every visitor carries an effective plan tier. Policy reduces
//! to one rule: a plan covers content when its rank is at least the content's
//! rank. [`TierFilter`] adds the "all" sentinel used by listing surfaces to
//! opt out of tier narrowing entirely.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccessError;

/// Membership tier, ordered from least to most privileged.
///
/// The discriminants are the ranks used by the coverage rule. They are part
/// of the policy, not an encoding detail: comparing two tiers compares their
/// ranks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// No paid membership. The safe default whenever the plan is unknown.
    #[default]
    Free = 1,
    /// Entry paid plan
    Silver = 2,
    /// Mid paid plan
    Gold = 3,
    /// Top paid plan, covers everything
    Platinum = 4,
}

impl Tier {
    /// All tiers in ascending rank order
    pub const ALL: [Self; 4] = [Self::Free, Self::Silver, Self::Gold, Self::Platinum];

    /// Numeric rank used by the coverage rule
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Whether a visitor on this plan may view content at `content` tier.
    ///
    /// ```rust
    /// use eventgate_access::Tier;
    ///
    /// assert!(Tier::Gold.covers(Tier::Silver));
    /// assert!(Tier::Gold.covers(Tier::Gold));
    /// assert!(!Tier::Silver.covers(Tier::Gold));
    /// ```
    #[must_use]
    pub const fn covers(self, content: Self) -> bool {
        self.rank() >= content.rank()
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            other => Err(AccessError::InvalidTier {
                value: other.to_string(),
            }),
        }
    }
}

/// Tier selection applied by listing surfaces.
///
/// `All` is a sentinel that admits every tier without consulting ranks, so
/// it never participates in ordering and can never be denied. `Only` narrows
/// the listing to a single tier and is subject to the coverage rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TierFilter {
    /// Admit events of every tier
    #[default]
    All,
    /// Admit only events of exactly this tier
    Only(Tier),
}

impl TierFilter {
    /// Whether a visitor on `plan` may select this filter.
    ///
    /// The sentinel is selectable by everyone; a single-tier filter requires
    /// the plan to cover that tier.
    #[must_use]
    pub const fn covered_by(self, plan: Tier) -> bool {
        match self {
            Self::All => true,
            Self::Only(required) => plan.covers(required),
        }
    }

    /// Whether an event at `content` tier passes this filter
    #[must_use]
    pub const fn matches(self, content: Tier) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.rank() == content.rank(),
        }
    }

    /// Canonical lowercase name ("all" or the tier name)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(tier) => tier.as_str(),
        }
    }
}

impl fmt::Display for TierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierFilter {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}
