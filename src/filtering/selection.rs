//! Filter selection state: the single source of truth for the current
//! query, plus query-string persistence and active-chip derivation.

use crate::filtering::fields::FilterField;
use crate::filtering::sort::SortMode;
use crate::records::BadgeCatalog;

/// Current query state. Multi-select fields use OR-within-field semantics;
/// all fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub gender: Vec<String>,
    pub color_group: Vec<String>,
    pub color_count: Vec<String>,
    pub type_color: Vec<String>,
    pub type_type: Vec<String>,
    pub body_color: Vec<String>,
    pub hair_color: Vec<String>,
    pub face_color: Vec<String>,
    pub badges: Vec<String>,
    pub badge_count: Vec<String>,
    pub body: Vec<String>,
    pub background: Vec<String>,
    pub face: Vec<String>,
    pub hair: Vec<String>,
    pub listed: bool,
    pub search: String,
    pub sort: SortMode,
}

/// One removable active-filter chip.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    pub field: FilterField,
    pub value: String,
    /// Human label for the value (badge keys resolved via the catalog).
    pub label: String,
    pub field_label: String,
}

impl FilterSelection {
    pub fn values(&self, field: FilterField) -> Option<&Vec<String>> {
        match field {
            FilterField::Gender => Some(&self.gender),
            FilterField::ColorGroup => Some(&self.color_group),
            FilterField::ColorCount => Some(&self.color_count),
            FilterField::TypeColor => Some(&self.type_color),
            FilterField::TypeType => Some(&self.type_type),
            FilterField::BodyColor => Some(&self.body_color),
            FilterField::HairColor => Some(&self.hair_color),
            FilterField::FaceColor => Some(&self.face_color),
            FilterField::Badges => Some(&self.badges),
            FilterField::BadgeCount => Some(&self.badge_count),
            FilterField::Body => Some(&self.body),
            FilterField::Background => Some(&self.background),
            FilterField::Face => Some(&self.face),
            FilterField::Hair => Some(&self.hair),
            _ => None,
        }
    }

    pub fn values_mut(&mut self, field: FilterField) -> Option<&mut Vec<String>> {
        match field {
            FilterField::Gender => Some(&mut self.gender),
            FilterField::ColorGroup => Some(&mut self.color_group),
            FilterField::ColorCount => Some(&mut self.color_count),
            FilterField::TypeColor => Some(&mut self.type_color),
            FilterField::TypeType => Some(&mut self.type_type),
            FilterField::BodyColor => Some(&mut self.body_color),
            FilterField::HairColor => Some(&mut self.hair_color),
            FilterField::FaceColor => Some(&mut self.face_color),
            FilterField::Badges => Some(&mut self.badges),
            FilterField::BadgeCount => Some(&mut self.badge_count),
            FilterField::Body => Some(&mut self.body),
            FilterField::Background => Some(&mut self.background),
            FilterField::Face => Some(&mut self.face),
            FilterField::Hair => Some(&mut self.hair),
            _ => None,
        }
    }

    /// Add one value to a multi-select field (no-op if already present).
    pub fn select(&mut self, field: FilterField, value: &str) {
        if let Some(values) = self.values_mut(field) {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
    }

    /// Remove a single value from its field, independent of [`clear`].
    /// For `Listed` and `Search` the whole scalar is reset.
    pub fn remove(&mut self, field: FilterField, value: &str) {
        match field {
            FilterField::Listed => self.listed = false,
            FilterField::Search => self.search.clear(),
            FilterField::Sort => {}
            _ => {
                if let Some(values) = self.values_mut(field) {
                    values.retain(|v| v != value);
                }
            }
        }
    }

    /// Reset the entire selection to defaults.
    pub fn clear(&mut self) {
        *self = FilterSelection::default();
    }

    pub fn is_default(&self) -> bool {
        *self == FilterSelection::default()
    }

    /// Serialize to a URL query string for shareable views. Multi-select
    /// fields join with commas, booleans appear only when set, strings
    /// only when non-empty.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());

        for field in FilterField::MULTI {
            if let Some(values) = self.values(field) {
                if !values.is_empty() {
                    serializer.append_pair(field.as_str(), &values.join(","));
                }
            }
        }
        if self.listed {
            serializer.append_pair("listed", "true");
        }
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        serializer.append_pair("sort", self.sort.as_str());

        serializer.finish()
    }

    /// Decode from a URL query string. Unknown keys, malformed values and
    /// unknown sort modes fall back to the per-field default.
    pub fn from_query_string(query: &str) -> Self {
        let mut selection = FilterSelection::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match FilterField::from_key(&key) {
                Some(FilterField::Listed) => {
                    selection.listed = value == "true";
                }
                Some(FilterField::Search) => {
                    selection.search = value.to_string();
                }
                Some(FilterField::Sort) => {
                    if let Some(mode) = SortMode::parse(&value) {
                        selection.sort = mode;
                    }
                }
                Some(field) => {
                    if let Some(values) = selection.values_mut(field) {
                        *values = value
                            .split(',')
                            .filter(|v| !v.is_empty())
                            .map(|v| v.to_string())
                            .collect();
                    }
                }
                None => {}
            }
        }

        selection
    }

    /// Flat chip list: one entry per selected value, plus synthetic
    /// entries for the listed flag and the search string.
    pub fn active_filters(&self, badges: &BadgeCatalog) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();

        for field in FilterField::MULTI {
            let Some(values) = self.values(field) else {
                continue;
            };
            for value in values {
                let label = match field {
                    FilterField::Badges => badges.display_name(value).to_string(),
                    FilterField::BadgeCount => badge_count_label(value),
                    _ => value.clone(),
                };
                chips.push(ActiveFilter {
                    field,
                    value: value.clone(),
                    label,
                    field_label: field.label().to_string(),
                });
            }
        }

        if self.listed {
            chips.push(ActiveFilter {
                field: FilterField::Listed,
                value: "true".to_string(),
                label: "Listed Only".to_string(),
                field_label: "Market".to_string(),
            });
        }
        if !self.search.is_empty() {
            chips.push(ActiveFilter {
                field: FilterField::Search,
                value: self.search.clone(),
                label: self.search.clone(),
                field_label: "Search".to_string(),
            });
        }

        chips
    }
}

fn badge_count_label(value: &str) -> String {
    match value {
        "0" => "No badges".to_string(),
        "1" => "1 badge".to_string(),
        other => format!("{} badges", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_selection() -> FilterSelection {
        let mut selection = FilterSelection::default();
        selection.gender = vec!["M".to_string()];
        selection.body = vec!["Clothed".to_string(), "Tank Top".to_string()];
        selection.badges = vec!["gamer".to_string()];
        selection.badge_count = vec!["2".to_string()];
        selection.listed = true;
        selection.search = "tank top".to_string();
        selection.sort = SortMode::RarityDesc;
        selection
    }

    #[test]
    fn query_string_round_trip() {
        let selection = sample_selection();
        let encoded = selection.to_query_string();
        let decoded = FilterSelection::from_query_string(&encoded);
        assert_eq!(decoded, selection);
    }

    #[test]
    fn decode_tolerates_junk() {
        let decoded = FilterSelection::from_query_string(
            "bogus=1&gender=&sort=not_a_mode&listed=maybe&body=Clothed,,Tank%20Top",
        );
        assert!(decoded.gender.is_empty());
        assert_eq!(decoded.sort, SortMode::default());
        assert!(!decoded.listed);
        assert_eq!(decoded.body, vec!["Clothed", "Tank Top"]);
    }

    #[test]
    fn default_encodes_to_sort_only() {
        let encoded = FilterSelection::default().to_query_string();
        assert_eq!(encoded, "sort=price_asc");
    }

    #[test]
    fn select_deduplicates() {
        let mut selection = FilterSelection::default();
        selection.select(FilterField::Gender, "M");
        selection.select(FilterField::Gender, "M");
        assert_eq!(selection.gender, vec!["M"]);
    }

    #[test]
    fn remove_clears_one_value_and_clear_resets_all() {
        let mut selection = sample_selection();
        selection.remove(FilterField::Body, "Clothed");
        assert_eq!(selection.body, vec!["Tank Top"]);
        selection.remove(FilterField::Listed, "true");
        assert!(!selection.listed);
        selection.remove(FilterField::Search, "");
        assert!(selection.search.is_empty());
        // Everything else survives single removals.
        assert_eq!(selection.gender, vec!["M"]);

        selection.clear();
        assert!(selection.is_default());
    }

    #[test]
    fn chips_expand_multi_selects_and_resolve_labels() {
        let catalog = BadgeCatalog::from_entries([("gamer", "Gamer")]);
        let chips = sample_selection().active_filters(&catalog);

        let labels: Vec<(&str, &str)> = chips
            .iter()
            .map(|c| (c.field_label.as_str(), c.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Gender", "M"),
                ("Badge", "Gamer"),
                ("Badge Count", "2 badges"),
                ("Body", "Clothed"),
                ("Body", "Tank Top"),
                ("Market", "Listed Only"),
                ("Search", "tank top"),
            ]
        );
    }

    #[test]
    fn badge_count_labels_humanize() {
        assert_eq!(badge_count_label("0"), "No badges");
        assert_eq!(badge_count_label("1"), "1 badge");
        assert_eq!(badge_count_label("3"), "3 badges");
    }
}
