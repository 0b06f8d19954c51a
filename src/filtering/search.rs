//! Search suggestion ranker: fuzzy multi-word matching over facet values,
//! badge names and identifiers.
//!
//! A candidate matches when every whitespace-separated query token is a
//! substring of it, in any order. Identifiers match on the raw query
//! instead and are never tokenized.

use crate::filtering::facets::FacetIndex;
use crate::filtering::fields::{FacetField, FilterField};
use crate::filtering::selection::FilterSelection;
use crate::logger::{self, LogTag};
use crate::records::BadgeCatalog;

/// Overall suggestion cap after ranking.
pub const SUGGESTION_LIMIT: usize = 25;
/// Identifier suggestions contribute at most this many candidates.
pub const TOKEN_ID_SUGGESTION_LIMIT: usize = 10;

const EASTER_EGG_QUERY: &str = "kinky";
const EASTER_EGG_VALUE: &str = "Tank Top Black";

/// How a suggestion is applied when the user picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionTarget {
    /// Add the value to this filter field's selection set.
    Filter(FilterField),
    /// Use the value as a free-text search term.
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub target: SuggestionTarget,
    pub category: String,
    pub value: String,
    pub count: usize,
    pub label: String,
}

fn fuzzy_match(text: &str, tokens: &[String]) -> bool {
    let lower = text.to_lowercase();
    tokens.iter().all(|token| lower.contains(token.as_str()))
}

fn trait_suggestion(category: &str, value: &str, count: usize, target: SuggestionTarget) -> Suggestion {
    Suggestion {
        target,
        category: category.to_string(),
        value: value.to_string(),
        count,
        label: format!("{}: {} ({})", category, value, count),
    }
}

/// Produce ranked suggestions for a free-text query.
pub fn suggestions(query: &str, index: &FacetIndex, badges: &BadgeCatalog) -> Vec<Suggestion> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let lower_query = query.to_lowercase();
    let tokens: Vec<String> = lower_query
        .split_whitespace()
        .map(|t| t.to_string())
        .collect();

    let mut candidates: Vec<Suggestion> = Vec::new();

    if lower_query.contains(EASTER_EGG_QUERY) {
        candidates.push(Suggestion {
            target: SuggestionTarget::Filter(FilterField::Body),
            category: "Body".to_string(),
            value: EASTER_EGG_VALUE.to_string(),
            count: 1,
            label: format!("Body: {} (Special for serc1n 🎉)", EASTER_EGG_VALUE),
        });
    }

    for token_id in index
        .token_ids
        .iter()
        .filter(|id| id.to_lowercase().contains(&lower_query))
        .take(TOKEN_ID_SUGGESTION_LIMIT)
    {
        candidates.push(Suggestion {
            target: SuggestionTarget::Search,
            category: "Token ID".to_string(),
            value: token_id.clone(),
            count: 1,
            label: format!("Token #{}", token_id),
        });
    }

    for field in FacetField::ALL {
        let label = field.label();
        let target = field
            .filter_target()
            .map(SuggestionTarget::Filter)
            .unwrap_or(SuggestionTarget::Search);

        for (value, &count) in index.flat_counts(field) {
            if field == FacetField::Badges {
                // Badges match on the display name as well as the raw key;
                // the raw key stays the applied value.
                let display = badges.display_name(value);
                if fuzzy_match(display, &tokens) || fuzzy_match(value, &tokens) {
                    candidates.push(Suggestion {
                        target,
                        category: label.to_string(),
                        value: value.clone(),
                        count,
                        label: format!("{}: {} ({})", label, display, count),
                    });
                }
            } else if fuzzy_match(value, &tokens) {
                candidates.push(trait_suggestion(label, value, count, target));
            }
        }
    }

    // Hierarchical views repeat type and style values under sidebar-facing
    // labels; duplicates with the flat fields above are intentional.
    for (field, filter_field, family_label) in [
        (FacetField::Body, FilterField::Body, "Body"),
        (FacetField::Background, FilterField::Background, "Background"),
        (FacetField::Face, FilterField::Face, "Face"),
        (FacetField::Hair, FilterField::Hair, "Hair"),
    ] {
        let Some(hierarchy) = index.hierarchy(field) else {
            continue;
        };
        let target = SuggestionTarget::Filter(filter_field);

        for (type_value, &count) in &hierarchy.main {
            if fuzzy_match(type_value, &tokens) {
                candidates.push(trait_suggestion(
                    &format!("{} Type", family_label),
                    type_value,
                    count,
                    target,
                ));
            }
        }
        for styles in hierarchy.by_type.values() {
            for (style, &count) in styles {
                if fuzzy_match(style, &tokens) {
                    candidates.push(trait_suggestion(family_label, style, count, target));
                }
            }
        }
    }

    rank(&mut candidates, &lower_query, &tokens);
    candidates.truncate(SUGGESTION_LIMIT);
    logger::debug(
        LogTag::Search,
        &format!("query='{}' suggestions={}", query, candidates.len()),
    );
    candidates
}

/// Ranking tiers, stable within each: exact value match, starts-with,
/// multi-token query as a contiguous phrase, then occurrence count.
fn rank(candidates: &mut [Suggestion], lower_query: &str, tokens: &[String]) {
    let phrase = if tokens.len() > 1 {
        Some(tokens.join(" "))
    } else {
        None
    };

    candidates.sort_by(|a, b| {
        let a_value = a.value.to_lowercase();
        let b_value = b.value.to_lowercase();

        let a_exact = a_value == lower_query;
        let b_exact = b_value == lower_query;
        if a_exact != b_exact {
            return b_exact.cmp(&a_exact);
        }

        let a_starts = a_value.starts_with(lower_query);
        let b_starts = b_value.starts_with(lower_query);
        if a_starts != b_starts {
            return b_starts.cmp(&a_starts);
        }

        if let Some(phrase) = &phrase {
            let a_phrase = a_value.contains(phrase.as_str());
            let b_phrase = b_value.contains(phrase.as_str());
            if a_phrase != b_phrase {
                return b_phrase.cmp(&a_phrase);
            }
        }

        b.count.cmp(&a.count)
    });
}

/// Apply a picked suggestion to the selection.
pub fn apply_suggestion(selection: &mut FilterSelection, suggestion: &Suggestion) {
    match suggestion.target {
        SuggestionTarget::Filter(field) => selection.select(field, &suggestion.value),
        SuggestionTarget::Search => selection.search = suggestion.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn record(id: &str, body: &str, body_type: &str, body_style: &str) -> Record {
        let mut r = Record::default();
        r.id = id.to_string();
        r.id_num = id.parse().unwrap_or(0);
        r.gender = "M".into();
        r.body = body.to_string();
        r.body_type = body_type.to_string();
        r.body_style = body_style.to_string();
        r
    }

    fn sample_index() -> FacetIndex {
        let mut records = vec![
            record("101", "Tank Top Black", "Clothed", "Tank Top"),
            record("102", "Tank Top White", "Clothed", "Tank Top"),
            record("203", "Hoodie Red", "Clothed", "Hoodie"),
            record("304", "Bare Pale", "Naked", "Bare"),
        ];
        records[0].badges = ["gamer".into(), "".into(), "".into(), "".into(), "".into()];
        FacetIndex::build(&records)
    }

    #[test]
    fn no_match_returns_empty_without_error() {
        let index = sample_index();
        let catalog = BadgeCatalog::empty();
        assert!(suggestions("zzzzz", &index, &catalog).is_empty());
        assert!(suggestions("   ", &index, &catalog).is_empty());
    }

    #[test]
    fn multiword_query_requires_every_token_in_any_order() {
        let index = sample_index();
        let catalog = BadgeCatalog::empty();

        let results = suggestions("top tank", &index, &catalog);
        assert!(!results.is_empty());
        for s in &results {
            let lower = s.value.to_lowercase();
            assert!(lower.contains("tank") && lower.contains("top"), "{}", s.value);
        }
    }

    #[test]
    fn exact_match_outranks_everything() {
        let index = sample_index();
        let catalog = BadgeCatalog::empty();

        let results = suggestions("tank top", &index, &catalog);
        // "Tank Top" (the style, count 2) is the exact match and must come
        // before "Tank Top Black"/"Tank Top White".
        assert_eq!(results[0].value, "Tank Top");
    }

    #[test]
    fn contiguous_phrase_outranks_scrambled_order_ties() {
        let mut candidates = vec![
            trait_suggestion("Body", "Top Gun Tank", 9, SuggestionTarget::Search),
            trait_suggestion("Body", "Tank Top Black", 1, SuggestionTarget::Search),
        ];
        rank(
            &mut candidates,
            "tank top",
            &["tank".to_string(), "top".to_string()],
        );
        assert_eq!(candidates[0].value, "Tank Top Black");
    }

    #[test]
    fn token_id_suggestions_are_tagged_as_search() {
        let index = sample_index();
        let catalog = BadgeCatalog::empty();

        let results = suggestions("101", &index, &catalog);
        let id_suggestion = results
            .iter()
            .find(|s| s.category == "Token ID")
            .expect("token id suggestion");
        assert_eq!(id_suggestion.target, SuggestionTarget::Search);
        assert_eq!(id_suggestion.label, "Token #101");
    }

    #[test]
    fn badge_suggestions_match_display_name_but_keep_the_key() {
        let index = sample_index();
        let catalog = BadgeCatalog::from_entries([("gamer", "Arcade Hero")]);

        let results = suggestions("arcade", &index, &catalog);
        let badge = results
            .iter()
            .find(|s| s.category == "Badge")
            .expect("badge suggestion");
        assert_eq!(badge.value, "gamer");
        assert_eq!(badge.target, SuggestionTarget::Filter(FilterField::Badges));
        assert!(badge.label.contains("Arcade Hero"));
    }

    #[test]
    fn results_are_capped() {
        // One record per distinct body value yields far more than the cap.
        let records: Vec<Record> = (0..60)
            .map(|i| {
                record(
                    &i.to_string(),
                    &format!("Shirt Variant {}", i),
                    "Clothed",
                    &format!("Shirt {}", i),
                )
            })
            .collect();
        let index = FacetIndex::build(&records);
        let catalog = BadgeCatalog::empty();

        let results = suggestions("shirt", &index, &catalog);
        assert_eq!(results.len(), SUGGESTION_LIMIT);
    }

    #[test]
    fn applying_suggestions_updates_the_selection() {
        let index = sample_index();
        let catalog = BadgeCatalog::empty();
        let mut selection = FilterSelection::default();

        let results = suggestions("hoodie", &index, &catalog);
        let trait_pick = results
            .iter()
            .find(|s| s.target == SuggestionTarget::Filter(FilterField::Body))
            .expect("body suggestion");
        apply_suggestion(&mut selection, trait_pick);
        assert!(selection.body.contains(&trait_pick.value));

        let results = suggestions("203", &index, &catalog);
        let id_pick = results
            .iter()
            .find(|s| s.target == SuggestionTarget::Search)
            .expect("id suggestion");
        apply_suggestion(&mut selection, id_pick);
        assert_eq!(selection.search, "203");
    }

    #[test]
    fn easter_egg_query_injects_the_synthetic_suggestion() {
        let index = sample_index();
        let catalog = BadgeCatalog::empty();

        let results = suggestions("kinky", &index, &catalog);
        assert!(results.iter().any(|s| s.value == EASTER_EGG_VALUE
            && s.target == SuggestionTarget::Filter(FilterField::Body)));
    }
}
