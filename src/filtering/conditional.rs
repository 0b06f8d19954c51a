//! Conditional facet display helpers.
//!
//! Some sidebar facets are only meaningful in context: face color applies
//! to glasses styles, hair color to actual hair styles, and the color
//! count facet only offers the 3-5 range.

use crate::filtering::facets::{FacetIndex, ValueCounts};
use crate::filtering::selection::FilterSelection;

const FACE_COLOR_TYPE: &str = "Glasses";
const HAIR_COLOR_TYPE: &str = "Hair";

/// Face color options are shown only when a selected face value is a style
/// under the `Glasses` type.
pub fn should_show_face_color(selection: &FilterSelection, index: &FacetIndex) -> bool {
    selection
        .face
        .iter()
        .any(|value| index.face.style_in_type(FACE_COLOR_TYPE, value))
}

/// Hair color options are shown only when a selected hair value is a style
/// under the `Hair` type.
pub fn should_show_hair_color(selection: &FilterSelection, index: &FacetIndex) -> bool {
    selection
        .hair
        .iter()
        .any(|value| index.hair.style_in_type(HAIR_COLOR_TYPE, value))
}

/// Color count options limited to the 3..=5 range.
pub fn filtered_color_counts(index: &FacetIndex) -> ValueCounts {
    index
        .flat_counts(crate::filtering::fields::FacetField::ColorCount)
        .iter()
        .filter(|(key, _)| matches!(key.parse::<u32>(), Ok(3..=5)))
        .map(|(key, &count)| (key.clone(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn sample_index() -> FacetIndex {
        let mut a = Record::default();
        a.id = "1".into();
        a.face = "Aviators Gold".into();
        a.face_type = "Glasses".into();
        a.face_style = "Aviators".into();
        a.hair = "Mohawk Green".into();
        a.hair_type = "Hair".into();
        a.hair_style = "Mohawk".into();
        a.color_count = "3".into();

        let mut b = Record::default();
        b.id = "2".into();
        b.face = "Smile".into();
        b.face_type = "Expression".into();
        b.face_style = "Smile".into();
        b.hair = "Cap Red".into();
        b.hair_type = "Headgear".into();
        b.hair_style = "Cap".into();
        b.color_count = "7".into();

        FacetIndex::build(&[a, b])
    }

    #[test]
    fn face_color_shows_only_for_glasses_styles() {
        let index = sample_index();
        let mut selection = FilterSelection::default();

        selection.face = vec!["Aviators".to_string()];
        assert!(should_show_face_color(&selection, &index));

        selection.face = vec!["Smile".to_string()];
        assert!(!should_show_face_color(&selection, &index));

        selection.face.clear();
        assert!(!should_show_face_color(&selection, &index));
    }

    #[test]
    fn hair_color_shows_only_for_hair_styles() {
        let index = sample_index();
        let mut selection = FilterSelection::default();

        selection.hair = vec!["Mohawk".to_string()];
        assert!(should_show_hair_color(&selection, &index));

        selection.hair = vec!["Cap".to_string()];
        assert!(!should_show_hair_color(&selection, &index));
    }

    #[test]
    fn color_counts_limited_to_mid_range() {
        let index = sample_index();
        let counts = filtered_color_counts(&index);
        assert!(counts.contains_key("3"));
        assert!(!counts.contains_key("7"));
    }
}
