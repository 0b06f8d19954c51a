//! Sort modes and the record comparator.
//!
//! Price modes carry a deliberate business rule: a record with a listing
//! always sorts before one without, in both directions. Two unlisted
//! records fall back to ascending numeric identifier.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::listings::ListingMap;
use crate::records::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    PriceAsc,
    PriceDesc,
    TokenIdAsc,
    TokenIdDesc,
    RarityAsc,
    RarityDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 6] = [
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::TokenIdAsc,
        SortMode::TokenIdDesc,
        SortMode::RarityAsc,
        SortMode::RarityDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::TokenIdAsc => "token_id_asc",
            SortMode::TokenIdDesc => "token_id_desc",
            SortMode::RarityAsc => "rarity_asc",
            SortMode::RarityDesc => "rarity_desc",
        }
    }

    /// True for the modes that need the listing map to order records.
    pub fn uses_price(&self) -> bool {
        matches!(self, SortMode::PriceAsc | SortMode::PriceDesc)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "price_asc" => Some(SortMode::PriceAsc),
            "price_desc" => Some(SortMode::PriceDesc),
            "token_id_asc" => Some(SortMode::TokenIdAsc),
            "token_id_desc" => Some(SortMode::TokenIdDesc),
            "rarity_asc" => Some(SortMode::RarityAsc),
            "rarity_desc" => Some(SortMode::RarityDesc),
            _ => None,
        }
    }
}

fn price_compare(a: &Record, b: &Record, listings: &ListingMap, descending: bool) -> Ordering {
    match (listings.get(&a.id), listings.get(&b.id)) {
        (Some(la), Some(lb)) => {
            let ordering = la.price.partial_cmp(&lb.price).unwrap_or(Ordering::Equal);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        // Listed always before unlisted, regardless of direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id_num.cmp(&b.id_num),
    }
}

fn rarity_compare(a: &Record, b: &Record) -> Ordering {
    a.rarity_score
        .partial_cmp(&b.rarity_score)
        .unwrap_or(Ordering::Equal)
}

/// Compare two records under a sort mode. Missing rarity is 0; identifiers
/// compare numerically, not lexicographically.
pub fn compare(a: &Record, b: &Record, mode: SortMode, listings: &ListingMap) -> Ordering {
    match mode {
        SortMode::PriceAsc => price_compare(a, b, listings, false),
        SortMode::PriceDesc => price_compare(a, b, listings, true),
        SortMode::TokenIdAsc => a.id_num.cmp(&b.id_num),
        SortMode::TokenIdDesc => b.id_num.cmp(&a.id_num),
        SortMode::RarityAsc => rarity_compare(a, b),
        SortMode::RarityDesc => rarity_compare(b, a),
    }
}

/// Stable sort of a record view in place.
pub fn sort_view(view: &mut [&Record], mode: SortMode, listings: &ListingMap) {
    view.sort_by(|a, b| compare(a, b, mode, listings));
}
