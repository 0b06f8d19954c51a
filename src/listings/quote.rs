//! Reference currency quote (ETH/USD) for price display.

use std::time::Duration;

use serde_json::Value;

use crate::logger::{self, LogTag};

/// Fetch the current USD quote. Returns `None` on any failure; price
/// display falls back to the native currency alone.
pub async fn fetch_quote(url: &str, timeout: Duration) -> Option<f64> {
    let client = reqwest::Client::builder().timeout(timeout).build().ok()?;
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            logger::warning(LogTag::Listings, &format!("quote fetch failed: {}", err));
            return None;
        }
    };
    if !response.status().is_success() {
        logger::warning(
            LogTag::Listings,
            &format!("quote endpoint returned {}", response.status()),
        );
        return None;
    }
    let body: Value = response.json().await.ok()?;
    parse_quote(&body)
}

fn parse_quote(body: &Value) -> Option<f64> {
    body.get("USD").and_then(Value::as_f64).filter(|usd| *usd > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_usd_field() {
        assert_eq!(parse_quote(&json!({"USD": 3120.55})), Some(3120.55));
    }

    #[test]
    fn rejects_missing_or_non_positive_quotes() {
        assert_eq!(parse_quote(&json!({})), None);
        assert_eq!(parse_quote(&json!({"USD": 0.0})), None);
        assert_eq!(parse_quote(&json!({"USD": "oops"})), None);
    }
}
