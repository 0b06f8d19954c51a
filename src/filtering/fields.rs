//! Field identities shared by the facet index, the filter selection and
//! the search ranker.

use serde::{Deserialize, Serialize};

use crate::records::Record;

/// Selection-addressable filter fields. The first fourteen are
/// multi-select; `Listed`, `Search` and `Sort` are scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterField {
    Gender,
    ColorGroup,
    ColorCount,
    TypeColor,
    TypeType,
    BodyColor,
    HairColor,
    FaceColor,
    Badges,
    BadgeCount,
    Body,
    Background,
    Face,
    Hair,
    Listed,
    Search,
    Sort,
}

impl FilterField {
    /// Multi-select fields in fixed display/persistence order.
    pub const MULTI: [FilterField; 14] = [
        FilterField::Gender,
        FilterField::ColorGroup,
        FilterField::ColorCount,
        FilterField::TypeColor,
        FilterField::TypeType,
        FilterField::BodyColor,
        FilterField::HairColor,
        FilterField::FaceColor,
        FilterField::Badges,
        FilterField::BadgeCount,
        FilterField::Body,
        FilterField::Background,
        FilterField::Face,
        FilterField::Hair,
    ];

    /// Query-string key. `badgeCount` keeps its historical camel case so
    /// shared links stay valid.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Gender => "gender",
            FilterField::ColorGroup => "color_group",
            FilterField::ColorCount => "color_count",
            FilterField::TypeColor => "type_color",
            FilterField::TypeType => "type_type",
            FilterField::BodyColor => "body_color",
            FilterField::HairColor => "hair_color",
            FilterField::FaceColor => "face_color",
            FilterField::Badges => "badges",
            FilterField::BadgeCount => "badgeCount",
            FilterField::Body => "body",
            FilterField::Background => "background",
            FilterField::Face => "face",
            FilterField::Hair => "hair",
            FilterField::Listed => "listed",
            FilterField::Search => "search",
            FilterField::Sort => "sort",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "gender" => Some(FilterField::Gender),
            "color_group" => Some(FilterField::ColorGroup),
            "color_count" => Some(FilterField::ColorCount),
            "type_color" => Some(FilterField::TypeColor),
            "type_type" => Some(FilterField::TypeType),
            "body_color" => Some(FilterField::BodyColor),
            "hair_color" => Some(FilterField::HairColor),
            "face_color" => Some(FilterField::FaceColor),
            "badges" => Some(FilterField::Badges),
            "badgeCount" => Some(FilterField::BadgeCount),
            "body" => Some(FilterField::Body),
            "background" => Some(FilterField::Background),
            "face" => Some(FilterField::Face),
            "hair" => Some(FilterField::Hair),
            "listed" => Some(FilterField::Listed),
            "search" => Some(FilterField::Search),
            "sort" => Some(FilterField::Sort),
            _ => None,
        }
    }

    /// Human label used for active filter chips.
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Gender => "Gender",
            FilterField::ColorGroup => "Color Group",
            FilterField::ColorCount => "Color Count",
            FilterField::TypeColor => "Type Color",
            FilterField::TypeType => "Type",
            FilterField::BodyColor => "Body Color",
            FilterField::HairColor => "Hair Color",
            FilterField::FaceColor => "Face Color",
            FilterField::Badges => "Badge",
            FilterField::BadgeCount => "Badge Count",
            FilterField::Body => "Body",
            FilterField::Background => "Background",
            FilterField::Face => "Face",
            FilterField::Hair => "Hair",
            FilterField::Listed => "Listed Only",
            FilterField::Search => "Search",
            FilterField::Sort => "Sort",
        }
    }

    pub fn is_multi(&self) -> bool {
        !matches!(
            self,
            FilterField::Listed | FilterField::Search | FilterField::Sort
        )
    }
}

/// Flat facet fields: every record value the search ranker can suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetField {
    Gender,
    Background,
    BackgroundType,
    Body,
    BodyType,
    BodyStyle,
    BodyColor,
    Face,
    FaceType,
    FaceStyle,
    FaceColor,
    Hair,
    HairType,
    HairStyle,
    HairColor,
    TypeFull,
    TypeType,
    TypeColor,
    ColorGroup,
    ColorCount,
    Badges,
}

impl FacetField {
    /// All flat fields in suggestion display order.
    pub const ALL: [FacetField; 21] = [
        FacetField::Gender,
        FacetField::Background,
        FacetField::BackgroundType,
        FacetField::Body,
        FacetField::BodyType,
        FacetField::BodyStyle,
        FacetField::BodyColor,
        FacetField::Face,
        FacetField::FaceType,
        FacetField::FaceStyle,
        FacetField::FaceColor,
        FacetField::Hair,
        FacetField::HairType,
        FacetField::HairStyle,
        FacetField::HairColor,
        FacetField::TypeFull,
        FacetField::TypeType,
        FacetField::TypeColor,
        FacetField::ColorGroup,
        FacetField::ColorCount,
        FacetField::Badges,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FacetField::Gender => "Gender",
            FacetField::Background => "Background",
            FacetField::BackgroundType => "Background Type",
            FacetField::Body => "Body Full",
            FacetField::BodyType => "Body Type",
            FacetField::BodyStyle => "Body Style",
            FacetField::BodyColor => "Body Color",
            FacetField::Face => "Face Full",
            FacetField::FaceType => "Face Type",
            FacetField::FaceStyle => "Face Style",
            FacetField::FaceColor => "Face Color",
            FacetField::Hair => "Hair Full",
            FacetField::HairType => "Hair Type",
            FacetField::HairStyle => "Hair Style",
            FacetField::HairColor => "Hair Color",
            FacetField::TypeFull => "Type Full",
            FacetField::TypeType => "Type",
            FacetField::TypeColor => "Type Color",
            FacetField::ColorGroup => "Color Group",
            FacetField::ColorCount => "Color Count",
            FacetField::Badges => "Badge",
        }
    }

    /// The record value for this field. Badge values are multi-valued and
    /// counted separately, so this returns the empty string for them.
    pub fn record_value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            FacetField::Gender => &record.gender,
            FacetField::Background => &record.background,
            FacetField::BackgroundType => &record.background_type,
            FacetField::Body => &record.body,
            FacetField::BodyType => &record.body_type,
            FacetField::BodyStyle => &record.body_style,
            FacetField::BodyColor => &record.body_color,
            FacetField::Face => &record.face,
            FacetField::FaceType => &record.face_type,
            FacetField::FaceStyle => &record.face_style,
            FacetField::FaceColor => &record.face_color,
            FacetField::Hair => &record.hair,
            FacetField::HairType => &record.hair_type,
            FacetField::HairStyle => &record.hair_style,
            FacetField::HairColor => &record.hair_color,
            FacetField::TypeFull => &record.type_full,
            FacetField::TypeType => &record.type_type,
            FacetField::TypeColor => &record.type_color,
            FacetField::ColorGroup => &record.color_group,
            FacetField::ColorCount => &record.color_count,
            FacetField::Badges => "",
        }
    }

    /// Where a suggestion for this field should land when applied.
    ///
    /// Full values of the four hierarchical families resolve through the
    /// hierarchical filter (its matcher also checks the full value); the
    /// full type string has no filterable home, so it falls back to
    /// free-text search.
    pub fn filter_target(&self) -> Option<FilterField> {
        match self {
            FacetField::Gender => Some(FilterField::Gender),
            FacetField::Background | FacetField::BackgroundType => Some(FilterField::Background),
            FacetField::Body | FacetField::BodyType | FacetField::BodyStyle => {
                Some(FilterField::Body)
            }
            FacetField::BodyColor => Some(FilterField::BodyColor),
            FacetField::Face | FacetField::FaceType | FacetField::FaceStyle => {
                Some(FilterField::Face)
            }
            FacetField::FaceColor => Some(FilterField::FaceColor),
            FacetField::Hair | FacetField::HairType | FacetField::HairStyle => {
                Some(FilterField::Hair)
            }
            FacetField::HairColor => Some(FilterField::HairColor),
            FacetField::TypeFull => None,
            FacetField::TypeType => Some(FilterField::TypeType),
            FacetField::TypeColor => Some(FilterField::TypeColor),
            FacetField::ColorGroup => Some(FilterField::ColorGroup),
            FacetField::ColorCount => Some(FilterField::ColorCount),
            FacetField::Badges => Some(FilterField::Badges),
        }
    }
}
