//! Core record type for the collection dataset.

use serde::{Deserialize, Serialize};

/// Maximum number of badge slots per record.
pub const BADGE_SLOTS: usize = 5;

/// One item of the collection, created once at load time and never mutated.
///
/// The four trait families (background, body, face, hair) each carry a full
/// value plus a coarse `*_type` bucket and a fine-grained `*_style` value
/// within that bucket. Background has no separate style column; its full
/// value plays that role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    /// Numeric form of `id`, parsed once for numeric sorting (0 when the
    /// identifier is not numeric).
    pub id_num: u64,

    pub gender: String,

    pub background: String,
    pub background_type: String,

    pub body: String,
    pub body_type: String,
    pub body_style: String,
    pub body_color: String,

    pub face: String,
    pub face_type: String,
    pub face_style: String,
    pub face_color: String,

    pub hair: String,
    pub hair_type: String,
    pub hair_style: String,
    pub hair_color: String,

    pub type_full: String,
    pub type_type: String,
    pub type_color: String,

    pub color_group: String,
    pub color_count: String,

    /// Raw badge slot values; empty string means the slot is unused.
    pub badges: [String; BADGE_SLOTS],

    /// Derived rarity score, filled in after the full dataset is loaded.
    pub rarity_score: f64,
}

impl Record {
    /// Non-empty, trimmed badge keys in slot order.
    pub fn active_badges(&self) -> impl Iterator<Item = &str> {
        self.badges
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
    }

    pub fn badge_count(&self) -> usize {
        self.active_badges().count()
    }

    pub fn has_badge(&self, key: &str) -> bool {
        self.active_badges().any(|b| b == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_badges_skips_empty_and_whitespace_slots() {
        let mut record = Record::default();
        record.badges = [
            "gamer".to_string(),
            "  ".to_string(),
            String::new(),
            " plants ".to_string(),
            String::new(),
        ];

        let badges: Vec<&str> = record.active_badges().collect();
        assert_eq!(badges, vec!["gamer", "plants"]);
        assert_eq!(record.badge_count(), 2);
        assert!(record.has_badge("plants"));
        assert!(!record.has_badge("cosmic"));
    }
}
