//! CLI argument definitions.

use super::validators::parse_as_of;
use chrono::NaiveDate;
use clap::Parser;

/// Write SARS-CoV-2 clade counts by date and location to a Parquet file.
///
/// Counts come from the Nextstrain GenBank-based sequence metadata as it stood
/// on the as-of date. Intended to run weekly; the output file is named
/// `{as_of}_covid_clade_counts.parquet`.
#[derive(Debug, Parser)]
#[command(name = "clade-counts")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Count clades using the last Nextstrain sequence metadata available on or
    /// before this date (YYYY-MM-DD, default: today in UTC).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,
}
