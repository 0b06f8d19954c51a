//! Command-line interface for the gallery browser.

use clap::Parser;

use crate::filtering::fields::FilterField;
use crate::filtering::sort::SortMode;

#[derive(Debug, Parser)]
#[command(
    name = "gvcbrowser",
    about = "Browse, filter and price-check the Good Vibes Club collection",
    version
)]
pub struct Arguments {
    /// Path to the JSON config file (created with defaults when missing).
    #[arg(long, default_value = "gvcbrowser_config.json")]
    pub config: String,

    /// Override the dataset CSV path from the config.
    #[arg(long)]
    pub data: Option<String>,

    /// Override the badge catalog CSV path from the config.
    #[arg(long)]
    pub badges: Option<String>,

    /// Trait filter as FIELD=VALUE[,VALUE...]; repeatable.
    /// Fields use the query-string keys (gender, body, badgeCount, ...).
    #[arg(long = "filter", value_name = "FIELD=VALUES")]
    pub filters: Vec<String>,

    /// Free-text search over identifier and trait values.
    #[arg(long)]
    pub search: Option<String>,

    /// Restore a whole selection from a saved query string.
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Sort mode: price_asc, price_desc, token_id_asc, token_id_desc,
    /// rarity_asc, rarity_desc.
    #[arg(long, value_parser = parse_sort_mode)]
    pub sort: Option<SortMode>,

    /// Only show records with a live listing.
    #[arg(long)]
    pub listed: bool,

    /// Print ranked suggestions for the query instead of browsing.
    #[arg(long, value_name = "QUERY")]
    pub suggest: Option<String>,

    /// Print facet value counts for the current selection's dataset.
    #[arg(long)]
    pub facets: bool,

    /// Fetch live listings before showing the view.
    #[arg(long)]
    pub listings: bool,

    /// Keep running and re-fetch listings on the configured interval.
    #[arg(long)]
    pub watch: bool,

    /// Max rows to print (defaults to the configured batch size).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Enable verbose log output.
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug logs for a module (dataset, facets, filter, search,
    /// listings, ... or "all"); repeatable.
    #[arg(long = "debug", value_name = "MODULE")]
    pub debug_modules: Vec<String>,

    /// Errors only.
    #[arg(long)]
    pub quiet: bool,
}

fn parse_sort_mode(s: &str) -> Result<SortMode, String> {
    SortMode::parse(s).ok_or_else(|| format!("unknown sort mode '{}'", s))
}

/// One `--filter FIELD=V1,V2` occurrence, resolved to a field.
pub fn parse_filter_arg(raw: &str) -> Result<(FilterField, Vec<String>), String> {
    let (key, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUES, got '{}'", raw))?;
    let field =
        FilterField::from_key(key).ok_or_else(|| format!("unknown filter field '{}'", key))?;
    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        return Err(format!("no values given for '{}'", key));
    }
    Ok((field, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_with_multiple_values() {
        let (field, values) = parse_filter_arg("body=Hoodie, Tank Top").unwrap();
        assert_eq!(field, FilterField::Body);
        assert_eq!(values, vec!["Hoodie", "Tank Top"]);
    }

    #[test]
    fn rejects_unknown_field_and_empty_values() {
        assert!(parse_filter_arg("nope=x").is_err());
        assert!(parse_filter_arg("gender=").is_err());
        assert!(parse_filter_arg("gender").is_err());
    }

    #[test]
    fn parses_sort_modes() {
        assert_eq!(parse_sort_mode("rarity_desc"), Ok(SortMode::RarityDesc));
        assert!(parse_sort_mode("by_vibes").is_err());
    }
}
