//! Facet index: per-field value counts derived from the full record set.
//!
//! Built once after load with a single pass. Simple fields only count
//! non-empty values; badge-count buckets count every record (including
//! zero), so those sum to the total record count.

use std::collections::{BTreeMap, HashMap};

use crate::filtering::fields::FacetField;
use crate::logger::{self, LogTag};
use crate::records::Record;

/// Sentinel background type whose subcategories are the only ones shown.
pub const RARE_BACKGROUND_TYPE: &str = "1 of 1";

pub type ValueCounts = BTreeMap<String, usize>;

/// Two-level breakdown for a hierarchical trait family: coarse type counts
/// plus per-type style counts.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalCounts {
    pub main: ValueCounts,
    pub by_type: BTreeMap<String, ValueCounts>,
}

impl HierarchicalCounts {
    fn add(&mut self, type_value: &str, style_value: &str, materialize_styles: bool) {
        *self.main.entry(type_value.to_string()).or_insert(0) += 1;
        if materialize_styles {
            *self
                .by_type
                .entry(type_value.to_string())
                .or_default()
                .entry(style_value.to_string())
                .or_insert(0) += 1;
        }
    }

    /// Whether `style` appears under the given type bucket.
    pub fn style_in_type(&self, type_value: &str, style: &str) -> bool {
        self.by_type
            .get(type_value)
            .map(|styles| styles.contains_key(style))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FacetIndex {
    pub total_records: usize,
    /// Value counts for every flat searchable field.
    flat: HashMap<FacetField, ValueCounts>,
    pub body: HierarchicalCounts,
    pub background: HierarchicalCounts,
    pub face: HierarchicalCounts,
    pub hair: HierarchicalCounts,
    /// Records bucketed by how many badge slots they use ("0".."5").
    pub badge_counts: ValueCounts,
    /// Identifiers in dataset order, for the search ranker.
    pub token_ids: Vec<String>,
}

static EMPTY_COUNTS: once_cell::sync::Lazy<ValueCounts> =
    once_cell::sync::Lazy::new(ValueCounts::new);

impl FacetIndex {
    pub fn build(records: &[Record]) -> Self {
        let mut index = FacetIndex {
            total_records: records.len(),
            ..Default::default()
        };

        for record in records {
            index.token_ids.push(record.id.clone());

            for field in FacetField::ALL {
                if field == FacetField::Badges {
                    continue;
                }
                let value = field.record_value(record);
                if !value.is_empty() {
                    *index
                        .flat
                        .entry(field)
                        .or_default()
                        .entry(value.to_string())
                        .or_insert(0) += 1;
                }
            }

            // Background subcategories are only materialized for the rare
            // sentinel type; the other three families are dense. Body,
            // face and hair additionally require both layers to be
            // present before counting at all.
            if !record.background.is_empty() {
                index.background.add(
                    &record.background_type,
                    &record.background,
                    record.background_type == RARE_BACKGROUND_TYPE,
                );
            }
            if !record.body_type.is_empty() && !record.body_style.is_empty() {
                index.body.add(&record.body_type, &record.body_style, true);
            }
            if !record.face_type.is_empty() && !record.face_style.is_empty() {
                index.face.add(&record.face_type, &record.face_style, true);
            }
            if !record.hair_type.is_empty() && !record.hair_style.is_empty() {
                index.hair.add(&record.hair_type, &record.hair_style, true);
            }

            let mut badge_count = 0usize;
            for badge in record.active_badges() {
                *index
                    .flat
                    .entry(FacetField::Badges)
                    .or_default()
                    .entry(badge.to_string())
                    .or_insert(0) += 1;
                badge_count += 1;
            }
            *index
                .badge_counts
                .entry(badge_count.to_string())
                .or_insert(0) += 1;
        }

        logger::debug(
            LogTag::Facets,
            &format!(
                "index built records={} badge_keys={}",
                index.total_records,
                index.flat_counts(FacetField::Badges).len()
            ),
        );
        index
    }

    /// Value counts for a flat field (empty map when nothing was counted).
    pub fn flat_counts(&self, field: FacetField) -> &ValueCounts {
        self.flat.get(&field).unwrap_or(&EMPTY_COUNTS)
    }

    pub fn hierarchy(&self, field: FacetField) -> Option<&HierarchicalCounts> {
        match field {
            FacetField::Body => Some(&self.body),
            FacetField::Background => Some(&self.background),
            FacetField::Face => Some(&self.face),
            FacetField::Hair => Some(&self.hair),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> Record {
        let mut r = Record::default();
        r.id = id.to_string();
        r.id_num = id.parse().unwrap_or(0);
        r
    }

    fn sample_records() -> Vec<Record> {
        let mut a = record("1");
        a.gender = "M".into();
        a.background = "Blue".into();
        a.background_type = "Solid".into();
        a.body = "Hoodie Red".into();
        a.body_type = "Clothed".into();
        a.body_style = "Hoodie".into();
        a.badges = ["gamer".into(), "plants".into(), "".into(), "".into(), "".into()];

        let mut b = record("2");
        b.gender = "F".into();
        b.background = "Rainbow Road".into();
        b.background_type = "1 of 1".into();
        b.body = "Tank Top Black".into();
        b.body_type = "Clothed".into();
        b.body_style = "Tank Top".into();

        let mut c = record("3");
        c.gender = "M".into();
        c.background = "Blue".into();
        c.background_type = "Solid".into();
        c.body = "Bare".into();
        c.body_type = "Naked".into();
        c.body_style = "Bare".into();
        c.badges = ["gamer".into(), "".into(), "".into(), "".into(), "".into()];

        vec![a, b, c]
    }

    #[test]
    fn simple_counts_sum_to_total_for_exclusive_fields() {
        let index = FacetIndex::build(&sample_records());
        let gender_total: usize = index.flat_counts(FacetField::Gender).values().sum();
        assert_eq!(gender_total, index.total_records);
        assert_eq!(index.flat_counts(FacetField::Gender)["M"], 2);
        assert_eq!(index.flat_counts(FacetField::Gender)["F"], 1);
    }

    #[test]
    fn badge_count_buckets_cover_every_record() {
        let index = FacetIndex::build(&sample_records());
        let bucket_total: usize = index.badge_counts.values().sum();
        assert_eq!(bucket_total, index.total_records);
        assert_eq!(index.badge_counts["0"], 1);
        assert_eq!(index.badge_counts["1"], 1);
        assert_eq!(index.badge_counts["2"], 1);
        assert_eq!(index.flat_counts(FacetField::Badges)["gamer"], 2);
    }

    #[test]
    fn background_styles_only_materialized_for_rare_type() {
        let index = FacetIndex::build(&sample_records());
        assert_eq!(index.background.main["Solid"], 2);
        assert_eq!(index.background.main["1 of 1"], 1);
        // Dense for the sentinel type only.
        assert!(index.background.by_type.get("Solid").is_none());
        assert_eq!(index.background.by_type["1 of 1"]["Rainbow Road"], 1);
    }

    #[test]
    fn body_styles_materialized_for_every_type() {
        let index = FacetIndex::build(&sample_records());
        assert_eq!(index.body.main["Clothed"], 2);
        assert_eq!(index.body.by_type["Clothed"]["Hoodie"], 1);
        assert_eq!(index.body.by_type["Clothed"]["Tank Top"], 1);
        assert_eq!(index.body.by_type["Naked"]["Bare"], 1);
        assert!(index.body.style_in_type("Clothed", "Hoodie"));
        assert!(!index.body.style_in_type("Naked", "Hoodie"));
    }

    #[test]
    fn hierarchical_families_require_both_layers() {
        let mut records = sample_records();
        records[0].body_style.clear();
        let index = FacetIndex::build(&records);
        // Record 0 no longer counted in body at all.
        assert_eq!(index.body.main["Clothed"], 1);
    }

    #[test]
    fn token_ids_preserve_dataset_order() {
        let index = FacetIndex::build(&sample_records());
        assert_eq!(index.token_ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_dataset_builds_empty_index() {
        let index = FacetIndex::build(&[]);
        assert_eq!(index.total_records, 0);
        assert!(index.flat_counts(FacetField::Gender).is_empty());
        assert!(index.badge_counts.is_empty());
    }
}
