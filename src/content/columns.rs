// src/content/columns.rs
//!
//! Attribute extraction from a content query row
//!
//! Providers disagree on column names, so every field is looked up through
//! a fixed list of candidates and the first present value wins.
//!

use super::provider::ContentRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Seconds,
    Millis,
}

const NAME_COLUMNS: &[&str] = &["_display_name", "title"];
const DATA_COLUMN: &str = "_data";
const SIZE_COLUMNS: &[&str] = &["_size"];
const MODIFIED_COLUMNS: &[(&str, TimeUnit)] = &[
    ("last_modified", TimeUnit::Millis),
    ("date_modified", TimeUnit::Seconds),
];
const CREATED_COLUMNS: &[(&str, TimeUnit)] = &[
    ("date_added", TimeUnit::Seconds),
    ("datetaken", TimeUnit::Millis),
];

/// Display name, falling back to the file name of the `_data` path.
pub fn display_name(row: &dyn ContentRow) -> Option<String> {
    NAME_COLUMNS
        .iter()
        .find_map(|column| non_empty(row.get_string(column)))
        .or_else(|| {
            non_empty(row.get_string(DATA_COLUMN))
                .and_then(|path| path.rsplit('/').next().map(str::to_string))
                .and_then(|name| non_empty(Some(name)))
        })
}

pub fn size(row: &dyn ContentRow) -> Option<u64> {
    SIZE_COLUMNS
        .iter()
        .find_map(|column| row.get_long(column))
        .and_then(|size| u64::try_from(size).ok())
}

/// Last modified time in milliseconds.
pub fn last_modified(row: &dyn ContentRow) -> Option<u64> {
    timestamp(row, MODIFIED_COLUMNS)
}

/// Creation time in milliseconds.
pub fn created_at(row: &dyn ContentRow) -> Option<u64> {
    timestamp(row, CREATED_COLUMNS)
}

fn timestamp(row: &dyn ContentRow, columns: &[(&str, TimeUnit)]) -> Option<u64> {
    columns.iter().find_map(|(column, unit)| {
        let value = u64::try_from(row.get_long(column)?).ok()?;
        Some(match unit {
            TimeUnit::Seconds => value.saturating_mul(1000),
            TimeUnit::Millis => value,
        })
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
