//! Marketplace REST client (OpenSea v2 shape).
//!
//! Two endpoints feed the listing map: a `/best` snapshot (cheapest per
//! item) and a paginated `/all` sweep with an opaque cursor. Individual
//! listing entries that fail to parse are skipped, never fatal.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::MarketplaceConfig;
use crate::listings::Listing;
use crate::logger::{self, LogTag};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// One page of listing results.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub listings: Vec<(String, Listing)>,
    /// Opaque pagination cursor; `None` ends the sweep.
    pub next: Option<String>,
}

/// Seam between the refresh service and the marketplace API, so the
/// service is testable against a stub feed.
#[async_trait]
pub trait ListingPageSource: Send + Sync {
    async fn fetch_best(&self) -> Result<ListingPage, ListingError>;
    async fn fetch_all(&self, cursor: Option<&str>) -> Result<ListingPage, ListingError>;
    fn has_credentials(&self) -> bool;
}

pub struct MarketClient {
    http: reqwest::Client,
    api_base: String,
    collection_slug: String,
    collection_contract: String,
    chain: String,
    api_key: Option<String>,
    page_limit: usize,
}

impl MarketClient {
    pub fn new(config: &MarketplaceConfig) -> Result<Self, ListingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            collection_slug: config.collection_slug.clone(),
            collection_contract: config.collection_contract.clone(),
            chain: config.chain.clone(),
            api_key: config.resolve_api_key(),
            page_limit: config.page_limit,
        })
    }

    fn asset_url(&self, token_id: &str) -> String {
        format!(
            "https://opensea.io/assets/{}/{}/{}",
            self.chain, self.collection_contract, token_id
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value, ListingError> {
        let api_key = self.api_key.as_deref().unwrap_or_default();
        let response = self
            .http
            .get(url)
            .header("X-API-KEY", api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ListingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    fn parse_page(&self, payload: &Value) -> ListingPage {
        let mut page = ListingPage::default();
        let mut malformed = 0usize;

        if let Some(entries) = payload.get("listings").and_then(|l| l.as_array()) {
            for entry in entries {
                match parse_listing_entry(entry) {
                    Some((token_id, price, currency)) => {
                        let url = self.asset_url(&token_id);
                        page.listings.push((
                            token_id,
                            Listing {
                                price,
                                currency,
                                url,
                                has_activity: true,
                            },
                        ));
                    }
                    None => malformed += 1,
                }
            }
        }

        page.next = payload
            .get("next")
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
            .map(|n| n.to_string());

        if malformed > 0 {
            logger::debug(
                LogTag::Listings,
                &format!("skipped malformed listing entries: {}", malformed),
            );
        }
        page
    }
}

/// Extract `(token_id, price, currency)` from one raw listing entry. The
/// wire price is an integer string scaled by `10^decimals`.
fn parse_listing_entry(entry: &Value) -> Option<(String, f64, String)> {
    let token_id = entry
        .pointer("/protocol_data/parameters/offer/0/identifierOrCriteria")?
        .as_str()?
        .to_string();

    let price_data = entry.pointer("/price/current")?;
    let raw_value: f64 = price_data.get("value")?.as_str()?.parse().ok()?;
    let decimals = price_data.get("decimals")?.as_u64()?;
    let currency = price_data.get("currency")?.as_str()?.to_string();

    let price = raw_value / 10f64.powi(decimals as i32);
    Some((token_id, price, currency))
}

#[async_trait]
impl ListingPageSource for MarketClient {
    async fn fetch_best(&self) -> Result<ListingPage, ListingError> {
        let url = format!(
            "{}/listings/collection/{}/best?limit={}",
            self.api_base, self.collection_slug, self.page_limit
        );
        let payload = self.get_json(&url).await?;
        Ok(self.parse_page(&payload))
    }

    async fn fetch_all(&self, cursor: Option<&str>) -> Result<ListingPage, ListingError> {
        let mut url = format!(
            "{}/listings/collection/{}/all?limit={}",
            self.api_base, self.collection_slug, self.page_limit
        );
        if let Some(cursor) = cursor {
            url.push_str("&next=");
            url.push_str(cursor);
        }
        let payload = self.get_json(&url).await?;
        Ok(self.parse_page(&payload))
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
