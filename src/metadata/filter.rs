//! Sequence metadata filter.

use crate::constants::filter::{COUNTRY, HOST};
use crate::metadata::record::{RawRecord, SequenceRecord, non_empty, parse_collection_date};

/// US states, the District of Columbia and Puerto Rico with their postal
/// abbreviations.
const US_STATES: [(&str, &str); 52] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Division spellings used by Nextstrain that differ from [`US_STATES`].
const DIVISION_ALIASES: [(&str, &str); 1] = [("Washington DC", "DC")];

/// Postal abbreviation for a US state name.
pub fn state_abbreviation(name: &str) -> Option<&'static str> {
    let name = name.trim();
    US_STATES
        .iter()
        .chain(DIVISION_ALIASES.iter())
        .find(|(state, _)| *state == name)
        .map(|(_, abbr)| *abbr)
}

/// Keeps human-host sequences from US states with a complete collection date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFilter {
    country: String,
    host: String,
}

impl Default for MetadataFilter {
    fn default() -> Self {
        Self {
            country: COUNTRY.to_string(),
            host: HOST.to_string(),
        }
    }
}

impl MetadataFilter {
    /// Apply the filter, returning the renamed record if it qualifies.
    ///
    /// `division` becomes `location` as a state abbreviation.
    pub fn apply(&self, raw: RawRecord) -> Option<SequenceRecord> {
        if raw.country.as_deref().map(str::trim) != Some(self.country.as_str()) {
            return None;
        }
        if raw.host.as_deref().map(str::trim) != Some(self.host.as_str()) {
            return None;
        }
        let location = state_abbreviation(raw.division.as_deref()?)?;
        let date = parse_collection_date(raw.date.as_deref()?)?;

        Some(SequenceRecord {
            clade: non_empty(raw.clade_nextstrain),
            country: raw.country,
            date: Some(date),
            location: Some(location.to_string()),
        })
    }
}
