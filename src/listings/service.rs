//! Listings refresh service.
//!
//! Keeps the listing map current against the marketplace API: a periodic
//! sweep plus a manual refresh trigger. Pages are published incrementally
//! so the UI can show partially-loaded prices. Refreshes are serialized by
//! a generation counter: a newer refresh supersedes an in-flight one, and
//! the superseded sweep stops publishing (last-write-wins by start order,
//! not response arrival order). A timer tick while a sweep is in flight is
//! a no-op rather than a queued duplicate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::listings::client::{ListingPageSource, ListingError};
use crate::listings::ListingMap;
use crate::logger::{self, LogTag};

/// Safety cap on the paginated sweep, against a cursor that never ends.
pub const MAX_LISTING_PAGES: usize = 30;

/// Snapshot of the service state handed to callers.
#[derive(Debug, Clone, Default)]
pub struct ListingsState {
    pub listings: ListingMap,
    pub loading: bool,
    /// Last refresh error; stale listings are preserved alongside it.
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct ListingsService {
    source: Arc<dyn ListingPageSource>,
    state: RwLock<ListingsState>,
    generation: AtomicU64,
    page_cap: usize,
}

impl ListingsService {
    pub fn new(source: Arc<dyn ListingPageSource>) -> Arc<Self> {
        Self::with_page_cap(source, MAX_LISTING_PAGES)
    }

    pub fn with_page_cap(source: Arc<dyn ListingPageSource>, page_cap: usize) -> Arc<Self> {
        Arc::new(Self {
            source,
            state: RwLock::new(ListingsState::default()),
            generation: AtomicU64::new(0),
            page_cap: page_cap.max(1),
        })
    }

    pub fn state(&self) -> ListingsState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn listings(&self) -> ListingMap {
        self.state().listings
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn mutate<F: FnOnce(&mut ListingsState)>(&self, f: F) {
        if let Ok(mut state) = self.state.write() {
            f(&mut state);
        }
    }

    /// Publish an intermediate page result unless a newer refresh has
    /// started. Returns false when superseded.
    fn publish_partial(&self, generation: u64, merged: &ListingMap) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.mutate(|state| {
            state.listings = merged.clone();
            state.loading = true;
        });
        true
    }

    /// Run one full refresh. Used by both the periodic loop and manual
    /// retry; a manual call supersedes whatever sweep is in flight.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.run_sweep(generation).await;
    }

    async fn run_sweep(&self, generation: u64) {
        if !self.source.has_credentials() {
            // Browse degrades to trait-only; this is not an error state.
            logger::warning(
                LogTag::Listings,
                "no API key configured - listings unavailable",
            );
            self.mutate(|state| {
                state.listings = ListingMap::new();
                state.loading = false;
                state.error = None;
            });
            return;
        }

        // Snapshot for rollback: a failed sweep must leave the previously
        // published map intact, even after partial publishes.
        let previous = self.listings();

        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        });

        let mut merged = ListingMap::new();

        // Cheapest-per-item snapshot first; the /all sweep then fills in
        // the rest. First write per identifier wins.
        match self.source.fetch_best().await {
            Ok(page) => {
                merge_first_wins(&mut merged, page.listings);
                if !self.publish_partial(generation, &merged) {
                    return;
                }
            }
            Err(err) => {
                self.fail(generation, &err, previous);
                return;
            }
        }

        let mut cursor: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let page = match self.source.fetch_all(cursor.as_deref()).await {
                Ok(page) => page,
                Err(err) => {
                    self.fail(generation, &err, previous);
                    return;
                }
            };

            merge_first_wins(&mut merged, page.listings);
            pages += 1;
            if !self.publish_partial(generation, &merged) {
                return;
            }

            cursor = page.next;
            if cursor.is_none() || pages >= self.page_cap {
                break;
            }
        }

        if !self.is_current(generation) {
            return;
        }
        let total = merged.len();
        self.mutate(|state| {
            state.listings = merged;
            state.loading = false;
            state.error = None;
            state.updated_at = Some(Utc::now());
        });
        logger::info(
            LogTag::Listings,
            &format!("refresh complete listings={} pages={}", total, pages),
        );
    }

    fn fail(&self, generation: u64, err: &ListingError, previous: ListingMap) {
        if !self.is_current(generation) {
            return;
        }
        logger::error(LogTag::Listings, &format!("refresh failed: {}", err));
        // Roll back to the pre-sweep map; stale prices beat no prices.
        self.mutate(|state| {
            state.listings = previous;
            state.loading = false;
            state.error = Some(err.to_string());
        });
    }

    /// Spawn the periodic refresh loop. Sweeps run to completion before
    /// the next tick is considered; ticks that land while a sweep is in
    /// flight are dropped, not queued.
    pub fn start(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                service.refresh().await;
            }
        })
    }
}

fn merge_first_wins(merged: &mut ListingMap, entries: Vec<(String, crate::listings::Listing)>) {
    for (token_id, listing) in entries {
        merged.entry(token_id).or_insert(listing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::client::ListingPage;
    use crate::listings::Listing;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    fn listing(price: f64) -> Listing {
        Listing {
            price,
            currency: "ETH".to_string(),
            url: String::new(),
            has_activity: true,
        }
    }

    /// Scripted page source for exercising the sweep logic.
    struct StubSource {
        credentialed: bool,
        best: Vec<(String, Listing)>,
        all_pages: Vec<ListingPage>,
        endless_cursor: bool,
        fail_all: std::sync::atomic::AtomicBool,
        fetches: AtomicUsize,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                credentialed: true,
                best: Vec::new(),
                all_pages: Vec::new(),
                endless_cursor: false,
                fail_all: std::sync::atomic::AtomicBool::new(false),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ListingPageSource for StubSource {
        async fn fetch_best(&self) -> Result<ListingPage, ListingError> {
            Ok(ListingPage {
                listings: self.best.clone(),
                next: None,
            })
        }

        async fn fetch_all(&self, cursor: Option<&str>) -> Result<ListingPage, ListingError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(ListingError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            if self.endless_cursor {
                return Ok(ListingPage {
                    listings: Vec::new(),
                    next: Some("again".to_string()),
                });
            }
            let index = cursor.and_then(|c| c.parse::<usize>().ok()).unwrap_or(0);
            Ok(self.all_pages.get(index).cloned().unwrap_or_default())
        }

        fn has_credentials(&self) -> bool {
            self.credentialed
        }
    }

    #[tokio::test]
    async fn missing_credentials_yield_empty_map_without_error() {
        let mut stub = StubSource::new();
        stub.credentialed = false;
        let service = ListingsService::new(Arc::new(stub));

        service.refresh().await;
        let state = service.state();
        assert!(state.listings.is_empty());
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn best_snapshot_wins_over_all_sweep() {
        let mut stub = StubSource::new();
        stub.best = vec![("1".to_string(), listing(1.0))];
        stub.all_pages = vec![ListingPage {
            listings: vec![
                ("1".to_string(), listing(9.0)),
                ("2".to_string(), listing(2.0)),
            ],
            next: None,
        }];
        let service = ListingsService::new(Arc::new(stub));

        service.refresh().await;
        let state = service.state();
        assert_eq!(state.listings.len(), 2);
        // First write per identifier wins: the /best price survives.
        assert_eq!(state.listings["1"].price, 1.0);
        assert_eq!(state.listings["2"].price, 2.0);
        assert!(!state.loading);
        assert!(state.updated_at.is_some());
    }

    #[tokio::test]
    async fn cursor_chain_is_followed_across_pages() {
        let mut stub = StubSource::new();
        stub.all_pages = vec![
            ListingPage {
                listings: vec![("1".to_string(), listing(1.0))],
                next: Some("1".to_string()),
            },
            ListingPage {
                listings: vec![("2".to_string(), listing(2.0))],
                next: None,
            },
        ];
        let service = ListingsService::new(Arc::new(stub));

        service.refresh().await;
        assert_eq!(service.listings().len(), 2);
    }

    #[tokio::test]
    async fn endless_cursor_stops_at_the_page_cap() {
        let mut stub = StubSource::new();
        stub.endless_cursor = true;
        let stub = Arc::new(stub);
        let service = ListingsService::new(Arc::clone(&stub) as Arc<dyn ListingPageSource>);

        service.refresh().await;
        assert_eq!(stub.fetches.load(Ordering::SeqCst), MAX_LISTING_PAGES);
        assert!(!service.state().loading);
    }

    #[tokio::test]
    async fn failed_refresh_preserves_stale_listings() {
        let mut stub = StubSource::new();
        stub.best = vec![("1".to_string(), listing(1.0))];
        stub.all_pages = vec![ListingPage {
            listings: vec![("2".to_string(), listing(2.0))],
            next: None,
        }];
        let stub = Arc::new(stub);
        let service = ListingsService::new(Arc::clone(&stub) as Arc<dyn ListingPageSource>);

        service.refresh().await;
        assert_eq!(service.listings().len(), 2);
        assert!(service.state().error.is_none());

        stub.fail_all.store(true, Ordering::SeqCst);
        service.refresh().await;
        let state = service.state();
        assert!(state.error.is_some());
        assert!(!state.loading);
        // Rolled back to the full map from the successful sweep.
        assert_eq!(state.listings.len(), 2);
        assert!(state.listings.contains_key("2"));
    }

    #[tokio::test]
    async fn superseded_generation_publishes_nothing() {
        let mut stub = StubSource::new();
        stub.best = vec![("1".to_string(), listing(1.0))];
        let service = ListingsService::new(Arc::new(stub));

        // An older generation that resolves after a newer refresh started
        // must be discarded.
        let stale_generation = service.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _newer = service.generation.fetch_add(1, Ordering::SeqCst);

        let mut merged = ListingMap::new();
        merged.insert("1".to_string(), listing(1.0));
        assert!(!service.publish_partial(stale_generation, &merged));
        assert!(service.listings().is_empty());
    }
}
