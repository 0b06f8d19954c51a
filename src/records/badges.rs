//! Badge catalog: key -> display name mapping loaded from a side dataset.
//!
//! The catalog is cached process-wide behind a `OnceCell`, but every
//! consumer takes a `&BadgeCatalog` so tests can inject their own instead
//! of reaching for the global.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

use crate::logger::{self, LogTag};

#[derive(Debug, Clone)]
pub struct Badge {
    pub key: String,
    pub display_name: String,
    /// Referenced by convention; the image is not validated at load time.
    pub image_path: String,
}

#[derive(Debug, Clone, Default)]
pub struct BadgeCatalog {
    badges: HashMap<String, Badge>,
}

impl BadgeCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from `(key, display_name)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut badges = HashMap::new();
        for (key, display_name) in entries {
            let key = key.into().trim().to_string();
            let display_name = display_name.into().trim().to_string();
            if key.is_empty() || display_name.is_empty() {
                continue;
            }
            let image_path = format!("badges/{}.png", key);
            badges.insert(
                key.clone(),
                Badge {
                    key,
                    display_name,
                    image_path,
                },
            );
        }
        Self { badges }
    }

    /// Load the `key,display_name` CSV. Lines missing either column are
    /// skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open badge catalog: {}", path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut entries = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(_) => continue,
            };
            let key = row.get(0).unwrap_or("").trim();
            let display_name = row.get(1).unwrap_or("").trim();
            if key.is_empty() || display_name.is_empty() {
                continue;
            }
            entries.push((key.to_string(), display_name.to_string()));
        }

        let catalog = Self::from_entries(entries);
        logger::info(
            LogTag::Badges,
            &format!("loaded badges={} from {}", catalog.len(), path.display()),
        );
        Ok(catalog)
    }

    pub fn get(&self, key: &str) -> Option<&Badge> {
        self.badges.get(key)
    }

    /// Display name for a badge key, falling back to the raw key when the
    /// catalog has no entry.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.badges
            .get(key)
            .map(|b| b.display_name.as_str())
            .unwrap_or(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.badges.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }
}

static BADGE_CATALOG: OnceCell<BadgeCatalog> = OnceCell::new();

/// Install the process-wide catalog. Returns false if one was already set.
pub fn init_global(catalog: BadgeCatalog) -> bool {
    BADGE_CATALOG.set(catalog).is_ok()
}

/// Process-wide catalog; empty until [`init_global`] is called.
pub fn global() -> &'static BadgeCatalog {
    BADGE_CATALOG.get_or_init(BadgeCatalog::empty)
}
