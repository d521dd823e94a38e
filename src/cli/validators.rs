//! CLI argument validators.

use chrono::NaiveDate;

use crate::utils::date::parse_as_of_date;

/// Parse and validate an as-of date (`YYYY-MM-DD`).
pub fn parse_as_of(s: &str) -> Result<NaiveDate, String> {
    parse_as_of_date(s).map_err(|e| format!("'{s}' is not a valid YYYY-MM-DD date: {e}"))
}
