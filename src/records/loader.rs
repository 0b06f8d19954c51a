//! Positional CSV loading for the collection dataset.
//!
//! Column positions are fixed; the header row is skipped, not interpreted.
//! Rows with too few columns are dropped silently so one malformed line
//! never aborts the whole load.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::logger::{self, LogTag};
use crate::records::types::{Record, BADGE_SLOTS};

/// Column layout of the dataset. Columns 19-21 exist in the file but are
/// not used by the engine.
const COL_ID: usize = 0;
const COL_GENDER: usize = 1;
const COL_BACKGROUND: usize = 2;
const COL_BACKGROUND_TYPE: usize = 3;
const COL_BODY: usize = 4;
const COL_BODY_TYPE: usize = 5;
const COL_BODY_STYLE: usize = 6;
const COL_BODY_COLOR: usize = 7;
const COL_FACE: usize = 8;
const COL_FACE_TYPE: usize = 9;
const COL_FACE_STYLE: usize = 10;
const COL_FACE_COLOR: usize = 11;
const COL_HAIR: usize = 12;
const COL_HAIR_TYPE: usize = 13;
const COL_HAIR_STYLE: usize = 14;
const COL_HAIR_COLOR: usize = 15;
const COL_TYPE: usize = 16;
const COL_TYPE_TYPE: usize = 17;
const COL_TYPE_COLOR: usize = 18;
const COL_COLOR_GROUP: usize = 22;
const COL_COLOR_COUNT: usize = 23;
const COL_BADGE1: usize = 24;

/// Minimum column count for a row to be usable (through badge5).
pub const MIN_COLUMNS: usize = COL_BADGE1 + BADGE_SLOTS;

/// Load and parse the dataset, then fill in rarity scores.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;
    let mut records = parse_records(file)?;
    apply_rarity_scores(&mut records);
    logger::info(
        LogTag::Dataset,
        &format!("loaded records={} from {}", records.len(), path.display()),
    );
    Ok(records)
}

/// Parse dataset rows from any reader. Rarity scores are left at 0; call
/// [`apply_rarity_scores`] once the full set is in memory.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in csv_reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        match record_from_row(&row) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        logger::debug(
            LogTag::Dataset,
            &format!("skipped malformed rows: {}", skipped),
        );
    }

    Ok(records)
}

fn record_from_row(row: &csv::StringRecord) -> Option<Record> {
    if row.len() < MIN_COLUMNS {
        return None;
    }

    let field = |idx: usize| row.get(idx).unwrap_or("").to_string();

    let id = field(COL_ID);
    if id.trim().is_empty() {
        return None;
    }

    let mut badges: [String; BADGE_SLOTS] = Default::default();
    for slot in 0..BADGE_SLOTS {
        badges[slot] = field(COL_BADGE1 + slot);
    }

    Some(Record {
        id_num: id.trim().parse().unwrap_or(0),
        id,
        gender: field(COL_GENDER),
        background: field(COL_BACKGROUND),
        background_type: field(COL_BACKGROUND_TYPE),
        body: field(COL_BODY),
        body_type: field(COL_BODY_TYPE),
        body_style: field(COL_BODY_STYLE),
        body_color: field(COL_BODY_COLOR),
        face: field(COL_FACE),
        face_type: field(COL_FACE_TYPE),
        face_style: field(COL_FACE_STYLE),
        face_color: field(COL_FACE_COLOR),
        hair: field(COL_HAIR),
        hair_type: field(COL_HAIR_TYPE),
        hair_style: field(COL_HAIR_STYLE),
        hair_color: field(COL_HAIR_COLOR),
        type_full: field(COL_TYPE),
        type_type: field(COL_TYPE_TYPE),
        type_color: field(COL_TYPE_COLOR),
        color_group: field(COL_COLOR_GROUP),
        color_count: field(COL_COLOR_COUNT),
        badges,
        rarity_score: 0.0,
    })
}

fn rarity_value(record: &Record, category: usize) -> &str {
    match category {
        0 => &record.gender,
        1 => &record.background,
        2 => &record.body,
        3 => &record.face,
        4 => &record.hair,
        _ => &record.type_full,
    }
}

const RARITY_CATEGORY_COUNT: usize = 6;

/// Derive per-record rarity scores from trait frequency.
///
/// For each of the six top-level categories, a record scores the inverse of
/// its trait value's relative frequency: `total / count(value)`. Empty
/// values contribute nothing.
pub fn apply_rarity_scores(records: &mut [Record]) {
    if records.is_empty() {
        return;
    }

    let total = records.len() as f64;
    let mut counts: Vec<HashMap<String, usize>> = vec![HashMap::new(); RARITY_CATEGORY_COUNT];

    for record in records.iter() {
        for category in 0..RARITY_CATEGORY_COUNT {
            let value = rarity_value(record, category);
            if !value.is_empty() {
                *counts[category].entry(value.to_string()).or_insert(0) += 1;
            }
        }
    }

    for record in records.iter_mut() {
        let mut score = 0.0;
        for category in 0..RARITY_CATEGORY_COUNT {
            let value = rarity_value(record, category).to_string();
            if value.is_empty() {
                continue;
            }
            if let Some(&count) = counts[category].get(&value) {
                score += total / count as f64;
            }
        }
        record.rarity_score = score;
    }
}
