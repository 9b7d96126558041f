//! Normalization from raw feed CSV text to [`AttractionRecord`]s.
//!
//! Row-level problems (wrong column count, missing name, unparseable
//! coordinates) drop only the offending row; the pass never aborts.

use std::collections::{BTreeSet, HashMap};

use attractions_core::AttractionRecord;

use crate::csv::{lines, split_record, strip_outer_quotes};

/// Header names the normalizer reads. Other columns are ignored.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const CATEGORIES: &str = "Categories";
    pub const STATE: &str = "State";
    pub const CITY: &str = "LocationCity";
    pub const DESCRIPTION: &str = "Description";
    pub const IMAGE_URL: &str = "ImageURL";
    pub const IMAGE_ALT_TEXT: &str = "ImageAltText";
    pub const WEBSITE: &str = "Website";
}

/// Why a data row was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ColumnCount { expected: usize, found: usize },
    MissingName,
    InvalidCoordinate { field: &'static str, raw: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ColumnCount { expected, found } => {
                write!(f, "mismatched number of columns: expected {expected}, got {found}")
            }
            SkipReason::MissingName => write!(f, "missing name"),
            SkipReason::InvalidCoordinate { field, raw } => {
                write!(f, "invalid {field} \"{raw}\"")
            }
        }
    }
}

/// A dropped row and its 1-based line number in the feed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// Result of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFeed {
    /// Accepted records in feed order.
    pub records: Vec<AttractionRecord>,
    /// Distinct categories across accepted records, sorted.
    pub categories: BTreeSet<String>,
    /// Distinct non-empty states across accepted records, sorted.
    pub states: BTreeSet<String>,
    pub skipped: Vec<SkippedRow>,
    /// Number of lines after the header, blank ones included.
    pub data_rows: usize,
}

/// Parses feed text (header line first) into validated records plus the
/// category and state sets used to populate the filter controls.
///
/// Text with fewer than two lines yields an empty result.
#[must_use]
pub fn normalize_feed(text: &str) -> NormalizedFeed {
    let all_lines: Vec<&str> = lines(text).collect();
    let mut feed = NormalizedFeed::default();
    if all_lines.len() < 2 {
        return feed;
    }

    let header = split_record(all_lines[0]);
    feed.data_rows = all_lines.len() - 1;

    for (index, line) in all_lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        match normalize_row(&header, line) {
            Ok(record) => {
                if let Some(state) = &record.state {
                    feed.states.insert(state.clone());
                }
                feed.categories.extend(record.categories.iter().cloned());
                feed.records.push(record);
            }
            Err(reason) => {
                tracing::warn!(line = line_number, %reason, row = %line, "skipping feed row");
                feed.skipped.push(SkippedRow {
                    line: line_number,
                    reason,
                });
            }
        }
    }

    tracing::debug!(
        accepted = feed.records.len(),
        skipped = feed.skipped.len(),
        categories = feed.categories.len(),
        states = feed.states.len(),
        "normalized feed"
    );

    feed
}

fn normalize_row(header: &[String], line: &str) -> Result<AttractionRecord, SkipReason> {
    let values = split_record(line);
    if values.len() != header.len() {
        return Err(SkipReason::ColumnCount {
            expected: header.len(),
            found: values.len(),
        });
    }

    // Later duplicate header names win.
    let row: HashMap<&str, &str> = header
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(String::as_str))
        .collect();
    let field = |name: &str| -> String {
        row.get(name)
            .map(|v| strip_outer_quotes(v).trim().to_string())
            .unwrap_or_default()
    };

    let name = field(columns::NAME);
    if name.is_empty() {
        return Err(SkipReason::MissingName);
    }
    let latitude = parse_coordinate(columns::LATITUDE, &field(columns::LATITUDE))?;
    let longitude = parse_coordinate(columns::LONGITUDE, &field(columns::LONGITUDE))?;

    let categories = field(columns::CATEGORIES)
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    let state = Some(field(columns::STATE)).filter(|s| !s.is_empty());

    Ok(AttractionRecord {
        name,
        latitude,
        longitude,
        categories,
        state,
        city: field(columns::CITY),
        description: field(columns::DESCRIPTION),
        image_url: field(columns::IMAGE_URL),
        image_alt_text: field(columns::IMAGE_ALT_TEXT),
        website: field(columns::WEBSITE),
    })
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, SkipReason> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SkipReason::InvalidCoordinate {
            field,
            raw: raw.to_string(),
        })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
