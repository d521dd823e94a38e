//! Clade data sources.
//!
//! [`CladeSource`] is the only surface the pipeline uses to reach sequence
//! metadata. Upstream API changes are absorbed by an implementation of this
//! trait; the pipeline itself does not change.

pub mod nextstrain;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::output::CladeCountTable;

pub use nextstrain::NextstrainSource;

/// Context for one as-of snapshot of sequence metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CladeContext {
    /// Cutoff the metadata snapshot was selected for.
    pub sequence_as_of: DateTime<Utc>,
    /// Location of the selected metadata file.
    pub url_sequence_metadata: String,
    /// Upstream version identifier of the metadata file.
    pub metadata_version: String,
}

/// Column a clade summary can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupColumn {
    /// Nextstrain clade.
    Clade,
    /// Sample country.
    Country,
    /// Sample collection date.
    Date,
    /// Sample location (US state abbreviation after filtering).
    Location,
}

impl GroupColumn {
    /// Column name in the output table.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clade => "clade",
            Self::Country => "country",
            Self::Date => "date",
            Self::Location => "location",
        }
    }
}

impl std::fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Grouping used by the weekly clade count job.
pub const CLADE_DATE_LOCATION: [GroupColumn; 3] =
    [GroupColumn::Clade, GroupColumn::Date, GroupColumn::Location];

/// How a lazy summary is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollectMode {
    /// Aggregate each record as it is read.
    #[default]
    Streaming,
    /// Read every qualifying record into memory, then aggregate.
    InMemory,
}

/// A provider of clade counts.
///
/// The five operations are called in order by the pipeline: build a context,
/// get lazy metadata from it, filter, summarize, collect.
pub trait CladeSource {
    /// Lazy handle to sequence metadata.
    type Metadata;
    /// Lazy handle to a clade count summary.
    type Counts;

    /// Build a context for the snapshot current at `as_of`.
    fn context(&self, as_of: DateTime<Utc>) -> Result<CladeContext>;

    /// Lazy handle to the sequence metadata selected by `context`.
    fn sequence_metadata(&self, context: &CladeContext) -> Result<Self::Metadata>;

    /// Remove records that should not be counted.
    fn filter_metadata(&self, metadata: Self::Metadata) -> Self::Metadata;

    /// Count records per distinct combination of `group_by` columns.
    fn summarize_clades(&self, metadata: Self::Metadata, group_by: &[GroupColumn])
    -> Self::Counts;

    /// Evaluate a summary into a concrete table.
    fn collect(&self, counts: Self::Counts, mode: CollectMode) -> Result<CladeCountTable>;
}
