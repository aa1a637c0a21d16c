//! Tier-gated event browsing walkthrough.
//!
//! Drives the listing store through a realistic session: an anonymous
//! visit, a denied filter selection, a silver sign-in, an upgrade to
//! platinum, handle expiry, and a sign-out that purges cached handles.
//!
//! # Running the Example
//!
//! ```bash
//! cargo run -p events-demo
//! ```
//!
//! Set `EVENTGATE_CACHE_TTL_MINUTES` to change how long backend handles
//! stay cached, and `RUST_LOG` to see the tracing output of the crates.

#![allow(missing_docs)]
#![allow(clippy::expect_used)] // Examples can use expect

use chrono::{DateTime, Duration, Utc};
use eventgate_access::mocks::MockIdentityProvider;
use eventgate_access::{IdentitySnapshot, Tier, TierFilter, UserId};
use eventgate_client::{CacheConfig, HandleCache, HandleFactory};
use eventgate_listing::{
    Event, EventId, EventsGateway, ListingAction, ListingEnvironment, ListingStore,
};
use eventgate_testing::ManualClock;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Backend handle carrying the scope it was built for.
#[derive(Debug)]
struct DemoHandle {
    serial: usize,
    scope: &'static str,
}

/// Factory that stamps each handle with a build serial.
#[derive(Clone, Default)]
struct DemoFactory {
    built: Arc<AtomicUsize>,
}

impl DemoFactory {
    fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }
}

impl HandleFactory for DemoFactory {
    type Handle = DemoHandle;

    fn build(&self, credential: Option<&str>) -> eventgate_client::Result<DemoHandle> {
        let serial = self.built.fetch_add(1, Ordering::SeqCst) + 1;
        let scope = if credential.is_some() {
            "credentialed"
        } else {
            "anonymous"
        };
        tracing::info!(serial, scope, "Built backend handle");
        Ok(DemoHandle { serial, scope })
    }
}

/// Gateway serving a fixed catalog.
#[derive(Clone)]
struct DemoGateway {
    catalog: Arc<Vec<Event>>,
}

impl EventsGateway<DemoHandle> for DemoGateway {
    fn list_events(
        &self,
        handle: &DemoHandle,
    ) -> impl Future<Output = eventgate_listing::Result<Vec<Event>>> + Send {
        tracing::debug!(serial = handle.serial, scope = handle.scope, "Querying events");
        let catalog = Arc::clone(&self.catalog);
        async move { Ok(catalog.as_ref().clone()) }
    }
}

type DemoStore = ListingStore<MockIdentityProvider, DemoFactory, ManualClock, DemoGateway>;

fn event(title: &str, tier: Tier, date: &str, location: &str, category: &str) -> Event {
    let date = DateTime::parse_from_rfc3339(date)
        .expect("fixture timestamps are valid")
        .with_timezone(&Utc);
    Event {
        id: EventId::new(),
        title: title.to_string(),
        description: None,
        event_date: date,
        image_url: None,
        tier,
        category: Some(category.to_string()),
        location: Some(location.to_string()),
        created_at: date,
    }
}

fn catalog() -> Vec<Event> {
    vec![
        event(
            "Open-Air Jazz Picnic",
            Tier::Free,
            "2025-06-14T12:00:00Z",
            "Riverside Park",
            "music",
        ),
        event(
            "City Makers Fair",
            Tier::Free,
            "2025-06-07T10:00:00Z",
            "Exhibition Hall",
            "community",
        ),
        event(
            "Jazz Cellar Night",
            Tier::Silver,
            "2025-06-20T20:00:00Z",
            "Blue Note Cellar",
            "music",
        ),
        event(
            "Vineyard Masterclass",
            Tier::Gold,
            "2025-06-10T17:00:00Z",
            "Chateau Terrace",
            "tasting",
        ),
        event(
            "Gold Gala Dinner",
            Tier::Gold,
            "2025-06-28T19:00:00Z",
            "Grand Ballroom",
            "dining",
        ),
        event(
            "Platinum Yacht Reception",
            Tier::Platinum,
            "2025-06-05T18:00:00Z",
            "Marina Bay",
            "networking",
        ),
    ]
}

async fn print_listing(store: &DemoStore) {
    let state = store.state().await;
    println!(
        "  plan: {} | filter: {} | load: {:?}",
        state.plan, state.selected_filter, state.load
    );
    if !state.search_query.is_empty() {
        println!("  search: {:?}", state.search_query);
    }
    for event in state.visible_events() {
        let marker = if state.can_access(event) {
            "open  "
        } else {
            "locked"
        };
        println!(
            "    [{marker}] {:<26} {}  ({})",
            event.title,
            event.event_date.format("%Y-%m-%d"),
            event.tier
        );
    }
    let tabs = state
        .tier_counts()
        .iter()
        .map(|(filter, count)| format!("{filter}:{count}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("  tabs: {tabs}");
    if let Some(notice) = &state.notice {
        println!("  notice: {}", notice.message);
        if let Some(hint) = &notice.hint {
            println!("          {hint}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "events_demo=info,eventgate_listing=warn,eventgate_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenvy::dotenv();
    let ttl_minutes = std::env::var("EVENTGATE_CACHE_TTL_MINUTES")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(CacheConfig::DEFAULT_TTL_MINUTES);

    println!("=== Eventgate Demo: Tier-Gated Event Browsing ===\n");

    let identity = MockIdentityProvider::new();
    let factory = DemoFactory::default();
    let clock = ManualClock::new(Utc::now());
    let cache = Arc::new(HandleCache::with_config(
        factory.clone(),
        clock.clone(),
        CacheConfig::new().with_ttl_minutes(ttl_minutes),
    ));
    let gateway = DemoGateway {
        catalog: Arc::new(catalog()),
    };
    let store = ListingStore::new(ListingEnvironment::new(
        identity.clone(),
        Arc::clone(&cache),
        gateway,
    ));

    println!("--- An anonymous visitor opens the listing ---");
    store.dispatch(ListingAction::Started).await;
    print_listing(&store).await;

    println!("\n--- They try the gold tab without a plan ---");
    store
        .dispatch(ListingAction::FilterSelected {
            filter: TierFilter::Only(Tier::Gold),
        })
        .await;
    print_listing(&store).await;
    store.dispatch(ListingAction::NoticeDismissed).await;

    println!("\n--- A silver member signs in ---");
    identity.set_identity(
        IdentitySnapshot::signed_in(UserId::new("user-42"), [Tier::Silver]),
        Some("session-token-silver".to_string()),
    )?;
    store.dispatch(ListingAction::Started).await;
    store
        .dispatch(ListingAction::FilterSelected {
            filter: TierFilter::Only(Tier::Silver),
        })
        .await;
    print_listing(&store).await;

    println!("\n--- They search for jazz ---");
    store
        .dispatch(ListingAction::SearchChanged {
            query: "jazz".to_string(),
        })
        .await;
    print_listing(&store).await;

    println!("\n--- The platinum tab is still out of reach ---");
    store
        .dispatch(ListingAction::FilterSelected {
            filter: TierFilter::Only(Tier::Platinum),
        })
        .await;
    print_listing(&store).await;
    store.dispatch(ListingAction::NoticeDismissed).await;
    store
        .dispatch(ListingAction::SearchChanged {
            query: String::new(),
        })
        .await;

    println!("\n--- They upgrade to platinum ---");
    identity.set_identity(
        IdentitySnapshot::signed_in(
            UserId::new("user-42"),
            [Tier::Silver, Tier::Gold, Tier::Platinum],
        ),
        Some("session-token-platinum".to_string()),
    )?;
    store.dispatch(ListingAction::Started).await;
    store
        .dispatch(ListingAction::FilterSelected {
            filter: TierFilter::Only(Tier::Platinum),
        })
        .await;
    print_listing(&store).await;
    println!("  handles built so far: {}", factory.built());

    println!("\n--- {ttl_minutes} minutes pass; the cached handle expires ---");
    clock.advance(Duration::minutes(ttl_minutes + 1));
    store.dispatch(ListingAction::FetchEvents).await;
    println!(
        "  handles built so far: {} (one rebuilt after expiry)",
        factory.built()
    );

    println!("\n--- They sign out ---");
    identity.sign_out()?;
    store.dispatch(ListingAction::Started).await;
    print_listing(&store).await;
    println!(
        "  cached handles now: {} (anonymous only, the rest were purged)",
        cache.len()
    );

    println!("\n=== Walkthrough Complete ===");
    println!("\nKey behaviors demonstrated:");
    println!("  • Plans cover their own tier and everything below");
    println!("  • A denied tier selection reverts to \"all\" and raises a notice");
    println!("  • Backend handles are cached per credential fingerprint");
    println!("  • Handles expire after {ttl_minutes} minutes and rebuild on demand");
    println!("  • Signing out purges every cached handle at once");

    Ok(())
}
