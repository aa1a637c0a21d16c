//! Core types for the event listing.

use chrono::{DateTime, Utc};
use eventgate_access::{IdentitySnapshot, Tier, TierFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of an event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Generate a new random event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One event row as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Row identifier
    pub id: EventId,

    /// Event title
    pub title: String,

    /// Longer description, if the organizer provided one
    pub description: Option<String>,

    /// When the event takes place
    pub event_date: DateTime<Utc>,

    /// Cover image URL, if any
    pub image_url: Option<String>,

    /// Minimum tier required to view details
    pub tier: Tier,

    /// Free-form category label
    pub category: Option<String>,

    /// Venue or city
    pub location: Option<String>,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// User-facing notice raised by the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// What happened
    pub message: String,

    /// What the user can do about it
    pub hint: Option<String>,
}

impl Notice {
    /// Notice raised when the plan does not cover a selected tier filter
    #[must_use]
    pub fn upgrade_required(tier: Tier) -> Self {
        Self {
            message: format!("Your plan does not cover {tier} events."),
            hint: Some(
                "Upgrade your plan in your profile under Manage Account > Billing.".to_string(),
            ),
        }
    }
}

/// Where identity resolution currently stands.
///
/// The listing never blocks on identity: it starts in `Resolving` with a
/// free plan and moves to `Resolved` when the provider answers. Resolution
/// failures also land in `Resolved`, carrying an anonymous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdentityPhase {
    /// Waiting for the identity provider
    #[default]
    Resolving,
    /// Identity observed (possibly anonymous)
    Resolved(IdentitySnapshot),
}

/// Where the event load currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoadPhase {
    /// No fetch attempted yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Events loaded
    Loaded,
    /// Fetch failed; retry is manual
    Failed {
        /// What the failure was
        message: String,
    },
}

/// Complete state of the event listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingState {
    /// Identity resolution phase
    pub identity: IdentityPhase,

    /// Effective plan; free until identity resolves
    pub plan: Tier,

    /// Event load phase
    pub load: LoadPhase,

    /// Events as loaded, sorted by date ascending
    pub events: Vec<Event>,

    /// Case-insensitive search query; empty means no narrowing
    pub search_query: String,

    /// Selected tier filter
    pub selected_filter: TierFilter,

    /// Pending user-facing notice, if any
    pub notice: Option<Notice>,
}

impl ListingState {
    /// Create the initial state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            identity: IdentityPhase::Resolving,
            plan: Tier::Free,
            load: LoadPhase::Idle,
            events: Vec::new(),
            search_query: String::new(),
            selected_filter: TierFilter::All,
            notice: None,
        }
    }

    /// Whether the current plan may view the given event's details
    #[must_use]
    pub fn can_access(&self, event: &Event) -> bool {
        self.plan.covers(event.tier)
    }

    /// Events passing both the tier filter and the search query
    #[must_use]
    pub fn visible_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| self.selected_filter.matches(event.tier))
            .filter(|event| matches_search(event, &self.search_query))
            .collect()
    }

    /// Tab counts: the "all" tab plus one per tier.
    ///
    /// Counts are taken over the search-narrowed events only, so the tabs
    /// always agree with what a tier selection would show.
    #[must_use]
    pub fn tier_counts(&self) -> [(TierFilter, usize); 5] {
        let searched: Vec<&Event> = self
            .events
            .iter()
            .filter(|event| matches_search(event, &self.search_query))
            .collect();

        let count_of = |tier: Tier| searched.iter().filter(|event| event.tier == tier).count();

        [
            (TierFilter::All, searched.len()),
            (TierFilter::Only(Tier::Free), count_of(Tier::Free)),
            (TierFilter::Only(Tier::Silver), count_of(Tier::Silver)),
            (TierFilter::Only(Tier::Gold), count_of(Tier::Gold)),
            (TierFilter::Only(Tier::Platinum), count_of(Tier::Platinum)),
        ]
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring match over title, description, location, and
/// category. An empty query matches everything.
fn matches_search(event: &Event, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let term = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&term);

    contains(&event.title)
        || event.description.as_deref().is_some_and(contains)
        || event.location.as_deref().is_some_and(contains)
        || event.category.as_deref().is_some_and(contains)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use chrono::TimeZone;

    fn event(title: &str, tier: Tier) -> Event {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap();
        Event {
            id: EventId::new(),
            title: title.to_string(),
            description: None,
            event_date: date,
            image_url: None,
            tier,
            category: None,
            location: None,
            created_at: date,
        }
    }

    fn loaded_state(events: Vec<Event>) -> ListingState {
        ListingState {
            load: LoadPhase::Loaded,
            events,
            ..ListingState::new()
        }
    }

    #[test]
    fn initial_state_assumes_the_lowest_tier() {
        let state = ListingState::new();
        assert_eq!(state.identity, IdentityPhase::Resolving);
        assert_eq!(state.plan, Tier::Free);
        assert_eq!(state.selected_filter, TierFilter::All);
        assert!(state.notice.is_none());
    }

    #[test]
    fn can_access_follows_the_coverage_rule() {
        let mut state = loaded_state(vec![]);
        state.plan = Tier::Silver;

        assert!(state.can_access(&event("a", Tier::Free)));
        assert!(state.can_access(&event("b", Tier::Silver)));
        assert!(!state.can_access(&event("c", Tier::Gold)));
    }

    #[test]
    fn platinum_plan_accesses_every_tier() {
        let mut state = loaded_state(vec![]);
        state.plan = Tier::Platinum;

        for tier in Tier::ALL {
            assert!(state.can_access(&event("x", tier)));
        }
    }

    #[test]
    fn visible_events_respect_the_tier_filter() {
        let mut state = loaded_state(vec![
            event("free show", Tier::Free),
            event("gold gala", Tier::Gold),
            event("another gold", Tier::Gold),
        ]);

        assert_eq!(state.visible_events().len(), 3);

        state.selected_filter = TierFilter::Only(Tier::Gold);
        let visible = state.visible_events();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|e| e.tier == Tier::Gold));
    }

    #[test]
    fn search_narrows_case_insensitively_across_fields() {
        let mut jazz = event("Jazz Night", Tier::Free);
        jazz.location = Some("Blue Note, Paris".to_string());
        let mut rock = event("Rock Festival", Tier::Free);
        rock.description = Some("Open air with jazz interludes".to_string());
        let mut tech = event("Tech Meetup", Tier::Free);
        tech.category = Some("conference".to_string());

        let mut state = loaded_state(vec![jazz, rock, tech]);

        state.search_query = "JAZZ".to_string();
        assert_eq!(state.visible_events().len(), 2);

        state.search_query = "paris".to_string();
        assert_eq!(state.visible_events().len(), 1);

        state.search_query = "conference".to_string();
        assert_eq!(state.visible_events().len(), 1);

        state.search_query = "opera".to_string();
        assert!(state.visible_events().is_empty());
    }

    #[test]
    fn tier_counts_are_taken_over_the_search_narrowed_events() {
        let mut state = loaded_state(vec![
            event("jazz free", Tier::Free),
            event("jazz gold", Tier::Gold),
            event("rock gold", Tier::Gold),
        ]);
        state.search_query = "jazz".to_string();

        let counts = state.tier_counts();
        assert_eq!(counts[0], (TierFilter::All, 2));
        assert_eq!(counts[1], (TierFilter::Only(Tier::Free), 1));
        assert_eq!(counts[3], (TierFilter::Only(Tier::Gold), 1));
        assert_eq!(counts[4], (TierFilter::Only(Tier::Platinum), 0));
    }

    #[test]
    fn tier_counts_ignore_the_selected_tier_filter() {
        let mut state = loaded_state(vec![
            event("a", Tier::Free),
            event("b", Tier::Gold),
        ]);
        state.selected_filter = TierFilter::Only(Tier::Gold);

        let counts = state.tier_counts();
        assert_eq!(counts[0], (TierFilter::All, 2));
        assert_eq!(counts[1], (TierFilter::Only(Tier::Free), 1));
    }

    #[test]
    fn upgrade_notice_names_the_denied_tier() {
        let notice = Notice::upgrade_required(Tier::Gold);
        assert_eq!(notice.message, "Your plan does not cover gold events.");
        assert!(notice.hint.is_some());
    }
}
