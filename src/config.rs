use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logger::{self, LogTag};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
    pub badges_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    pub api_base: String,
    pub collection_slug: String,
    pub collection_contract: String,
    pub chain: String,
    /// Empty means "read from the OPENSEA_API_KEY environment variable".
    #[serde(default)]
    pub api_key: String,
    pub refresh_interval_secs: u64,
    pub page_limit: usize,
    pub max_pages: usize,
    pub request_timeout_secs: u64,
    pub quote_url: String,
    pub quote_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub log_level: String,
    pub visible_batch: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                path: "data/gvc_data.csv".to_string(),
                badges_path: "data/badges.csv".to_string(),
            },
            marketplace: MarketplaceConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.opensea.io/api/v2".to_string(),
            collection_slug: "good-vibes-club".to_string(),
            collection_contract: "0xb8ea78fcacef50d41375e44e6814ebba36bb33c4".to_string(),
            chain: "ethereum".to_string(),
            api_key: String::new(),
            refresh_interval_secs: 60,
            page_limit: 100,
            max_pages: 30,
            request_timeout_secs: 30,
            quote_url: "https://min-api.cryptocompare.com/data/price?fsym=ETH&tsyms=USD"
                .to_string(),
            quote_interval_secs: 300, // 5 minutes
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            visible_batch: 60,
        }
    }
}

impl MarketplaceConfig {
    /// Resolve the API key from config or environment. `None` degrades the
    /// browsing experience to trait-only (no listings), never an error.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }
        std::env::var("OPENSEA_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            logger::info(
                LogTag::Config,
                &format!("wrote default config to {}", path),
            );
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }
}
