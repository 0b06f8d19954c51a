//! Live marketplace listings: API client, refresh service and the
//! reference currency quote.

pub mod client;
pub mod quote;
pub mod service;

use std::collections::HashMap;

/// A live offer for one identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Price in whole currency units (wire value scaled by its decimals).
    pub price: f64,
    pub currency: String,
    /// Canonical marketplace URL for the item.
    pub url: String,
    pub has_activity: bool,
}

/// Listings keyed by identifier. Replaced wholesale on each refresh; a
/// missing key means "unlisted".
pub type ListingMap = HashMap<String, Listing>;

pub use client::{ListingError, ListingPage, ListingPageSource, MarketClient};
pub use service::{ListingsService, ListingsState};
