//! The filter evaluator: pure include/exclude decision for one record
//! against the current selection.
//!
//! Logical AND across categories, OR within a multi-select category.
//! Evaluation short-circuits on the first failing predicate, but every
//! predicate is independent so the result does not depend on order.

use crate::filtering::selection::FilterSelection;
use crate::listings::Listing;
use crate::records::Record;

fn matches_search(record: &Record, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        record.id.as_str(),
        record.gender.as_str(),
        record.background.as_str(),
        record.body.as_str(),
        record.face.as_str(),
        record.hair.as_str(),
        record.type_full.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

fn matches_simple(value: &str, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|s| s == value)
}

/// A selected value may come from the type layer (sidebar type chip), the
/// style layer (sidebar style chip) or the full value (search suggestion),
/// so all three are accepted. Background has no style column; its full
/// value covers both remaining layers.
fn matches_hierarchical(
    type_value: &str,
    style_value: &str,
    full_value: &str,
    selected: &[String],
) -> bool {
    selected.is_empty()
        || selected
            .iter()
            .any(|s| s == type_value || s == style_value || s == full_value)
}

/// Decide whether a record (joined with its listing, possibly absent)
/// passes the current selection.
pub fn record_matches(
    record: &Record,
    listing: Option<&Listing>,
    selection: &FilterSelection,
) -> bool {
    if !selection.search.is_empty() && !matches_search(record, &selection.search) {
        return false;
    }

    if selection.listed && listing.is_none() {
        return false;
    }

    if !matches_simple(&record.gender, &selection.gender)
        || !matches_simple(&record.color_group, &selection.color_group)
        || !matches_simple(&record.color_count, &selection.color_count)
        || !matches_simple(&record.type_color, &selection.type_color)
        || !matches_simple(&record.type_type, &selection.type_type)
        || !matches_simple(&record.body_color, &selection.body_color)
        || !matches_simple(&record.hair_color, &selection.hair_color)
        || !matches_simple(&record.face_color, &selection.face_color)
    {
        return false;
    }

    if !matches_hierarchical(
        &record.body_type,
        &record.body_style,
        &record.body,
        &selection.body,
    ) || !matches_hierarchical(
        &record.background_type,
        &record.background,
        &record.background,
        &selection.background,
    ) || !matches_hierarchical(
        &record.face_type,
        &record.face_style,
        &record.face,
        &selection.face,
    ) || !matches_hierarchical(
        &record.hair_type,
        &record.hair_style,
        &record.hair,
        &selection.hair,
    ) {
        return false;
    }

    if !selection.badges.is_empty()
        && !selection.badges.iter().any(|b| record.has_badge(b))
    {
        return false;
    }

    if !selection.badge_count.is_empty() {
        let count = record.badge_count().to_string();
        if !selection.badge_count.iter().any(|c| *c == count) {
            return false;
        }
    }

    true
}
