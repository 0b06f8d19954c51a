//! View assembly: filter + sort + windowed reveal over the dataset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::filtering::evaluate::record_matches;
use crate::filtering::facets::FacetIndex;
use crate::filtering::selection::FilterSelection;
use crate::filtering::sort::sort_view;
use crate::listings::ListingMap;
use crate::records::types::Record;

/// Default incremental reveal step.
pub const DEFAULT_BATCH: usize = 60;

/// Computed gallery view: the dataset filtered, sorted and windowed.
pub struct Gallery {
    records: Vec<Record>,
    index: FacetIndex,
    pub selection: FilterSelection,
    visible_limit: usize,
    batch: usize,
}

impl Gallery {
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_batch(records, DEFAULT_BATCH)
    }

    pub fn with_batch(records: Vec<Record>, batch: usize) -> Self {
        let batch = batch.max(1);
        let index = FacetIndex::build(&records);
        Self {
            records,
            index,
            selection: FilterSelection::default(),
            visible_limit: batch,
            batch,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn index(&self) -> &FacetIndex {
        &self.index
    }

    /// All records passing the current selection, in sort order. Recomputed
    /// in full on every call; tolerant of an empty listing map.
    pub fn filtered<'a>(&'a self, listings: &ListingMap) -> Vec<&'a Record> {
        let mut view: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| record_matches(record, listings.get(&record.id), &self.selection))
            .collect();
        sort_view(&mut view, self.selection.sort, listings);
        view
    }

    /// The filtered view truncated to the reveal window.
    pub fn visible<'a>(&'a self, listings: &ListingMap) -> Vec<&'a Record> {
        let mut view = self.filtered(listings);
        view.truncate(self.visible_limit);
        view
    }

    pub fn visible_limit(&self) -> usize {
        self.visible_limit
    }

    /// Grow the window by one batch. Returns the new limit.
    pub fn reveal_more(&mut self) -> usize {
        self.visible_limit = self.visible_limit.saturating_add(self.batch);
        self.visible_limit
    }

    /// Snap the window back to one batch. Call on any selection change.
    pub fn reset_window(&mut self) {
        self.visible_limit = self.batch;
    }
}

/// Generation-counted debounce for free-text search. Each keystroke bumps
/// the generation; only the call that survives the quiet period untouched
/// reports settled.
#[derive(Clone, Default)]
pub struct SearchDebouncer {
    generation: Arc<AtomicU64>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keystroke and wait out the quiet period. Returns true if
    /// no newer keystroke arrived in the meantime.
    pub async fn settle(&self, quiet: Duration) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(quiet).await;
        self.generation.load(Ordering::SeqCst) == generation
    }
}
