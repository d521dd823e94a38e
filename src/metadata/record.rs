//! Sequence metadata records.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::constants::filter::DATE_FORMAT;

/// Columns read from a Nextstrain metadata row.
///
/// The file has dozens of columns; everything else is skipped by the
/// deserializer.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    /// Nextstrain clade assignment.
    pub clade_nextstrain: Option<String>,
    /// Sample country.
    pub country: Option<String>,
    /// Collection date, possibly incomplete (`2024-01-XX`, `2024`).
    pub date: Option<String>,
    /// First-level administrative division (state for US samples).
    pub division: Option<String>,
    /// Host species.
    pub host: Option<String>,
}

/// A sequence record in the shape the summary works on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Nextstrain clade.
    pub clade: Option<String>,
    /// Sample country.
    pub country: Option<String>,
    /// Complete collection date.
    pub date: Option<NaiveDate>,
    /// Sample location.
    pub location: Option<String>,
}

impl From<RawRecord> for SequenceRecord {
    /// Rename without filtering; incomplete dates become `None`.
    fn from(raw: RawRecord) -> Self {
        Self {
            clade: non_empty(raw.clade_nextstrain),
            country: non_empty(raw.country),
            date: raw.date.as_deref().and_then(parse_collection_date),
            location: non_empty(raw.division),
        }
    }
}

/// Parse a complete `YYYY-MM-DD` collection date.
pub fn parse_collection_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Treat blank and `?` fields as missing.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "?"
    })
}
