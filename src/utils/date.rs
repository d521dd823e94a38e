//! As-of date resolution.
//!
//! The job counts clades "as of" a calendar day. A past day is widened to its
//! last second so that sequences published at any time that day are included;
//! today (or no date) means the current instant.

use chrono::{DateTime, NaiveDate, Utc};

use crate::constants::filter::DATE_FORMAT;
use crate::error::{Error, Result};

/// A resolved as-of cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAsOf {
    /// Calendar date used to name the output file.
    pub date: NaiveDate,
    /// Cutoff timestamp passed to the metadata source.
    pub timestamp: DateTime<Utc>,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_as_of_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Resolve an optional as-of date against the current time.
///
/// - `None` or today's UTC date resolves to `now`.
/// - An earlier date resolves to 23:59:59 UTC on that date.
/// - A later date is an error.
pub fn resolve_as_of(as_of: Option<NaiveDate>, now: DateTime<Utc>) -> Result<ResolvedAsOf> {
    let today = now.date_naive();

    match as_of {
        None => Ok(ResolvedAsOf {
            date: today,
            timestamp: now,
        }),
        Some(date) if date == today => Ok(ResolvedAsOf {
            date,
            timestamp: now,
        }),
        Some(date) if date > today => Err(Error::AsOfInFuture { as_of: date, today }),
        Some(date) => Ok(ResolvedAsOf {
            date,
            timestamp: end_of_day(date)?,
        }),
    }
}

/// Last second of `date` in UTC.
fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::Internal {
            message: format!("could not build end-of-day timestamp for {date}"),
        })
}
