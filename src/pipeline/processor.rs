//! Clade count job.

use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;
use tracing::info;

use super::coordinator::{ensure_output_dir, output_path_for};
use crate::error::Result;
use crate::output::write_clade_counts;
use crate::source::{CLADE_DATE_LOCATION, CladeContext, CladeSource, CollectMode};
use crate::utils::date::{ResolvedAsOf, resolve_as_of};

/// Options for one job run.
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// Directory receiving the output file.
    pub data_dir: PathBuf,
    /// How the summary is materialized.
    pub collect_mode: CollectMode,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct JobResult {
    /// Resolved as-of cutoff.
    pub as_of: ResolvedAsOf,
    /// Context the counts were computed from.
    pub context: CladeContext,
    /// Written Parquet file.
    pub output_path: PathBuf,
    /// Number of rows written.
    pub rows: usize,
    /// Number of sequences counted.
    pub sequences: u64,
}

/// Resolve the as-of date, then run the pipeline.
///
/// A future date fails here, before the source is asked for a context.
pub fn run_job<S: CladeSource>(
    source: &S,
    as_of: Option<NaiveDate>,
    now: DateTime<Utc>,
    options: &JobOptions,
) -> Result<JobResult> {
    let resolved = resolve_as_of(as_of, now)?;
    run_pipeline(source, resolved, options)
}

/// Fetch, filter, count and write clade counts for a resolved cutoff.
pub fn run_pipeline<S: CladeSource>(
    source: &S,
    as_of: ResolvedAsOf,
    options: &JobOptions,
) -> Result<JobResult> {
    info!(
        as_of = %as_of.date,
        sequence_as_of = %as_of.timestamp,
        "Resolved as-of date"
    );
    ensure_output_dir(&options.data_dir)?;

    let context = source.context(as_of.timestamp)?;
    info!(
        sequence_as_of = %context.sequence_as_of,
        nextstrain_metadata_url = %context.url_sequence_metadata,
        "Clade context created"
    );

    let metadata = source.sequence_metadata(&context)?;

    info!("filter_metadata");
    let filtered = source.filter_metadata(metadata);

    info!("summarize_clades");
    let counts = source.summarize_clades(filtered, &CLADE_DATE_LOCATION);

    let output_path = output_path_for(&options.data_dir, as_of.date);
    info!(mode = ?options.collect_mode, "collecting clade counts");
    let table = source.collect(counts, options.collect_mode)?;

    info!(rows = table.len(), "write_parquet");
    write_clade_counts(&table, &output_path)?;

    info!(path = %output_path.display(), "Clade outputs saved");

    Ok(JobResult {
        as_of,
        context,
        output_path,
        rows: table.len(),
        sequences: table.total(),
    })
}
