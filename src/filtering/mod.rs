//! The in-memory facet/filter/search/sort engine.
//!
//! Everything here is pure over (records, listings, selection): filtering
//! and sorting produce new ordered views, never in-place edits of the
//! dataset.

pub mod conditional;
pub mod evaluate;
pub mod facets;
pub mod fields;
pub mod search;
pub mod selection;
pub mod sort;

pub use evaluate::record_matches;
pub use facets::{FacetIndex, HierarchicalCounts};
pub use fields::{FacetField, FilterField};
pub use search::{apply_suggestion, suggestions, Suggestion, SuggestionTarget};
pub use selection::{ActiveFilter, FilterSelection};
pub use sort::{sort_view, SortMode};
