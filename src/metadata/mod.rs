//! Lazy sequence metadata.
//!
//! [`LazyMetadata`] describes how to read and filter a metadata TSV without
//! touching the file. Rows are only read when a [`LazyCladeCounts`] is
//! collected.

mod filter;
mod record;
mod summarize;

pub use filter::{MetadataFilter, state_abbreviation};
pub use record::{RawRecord, SequenceRecord, parse_collection_date};
pub use summarize::CountAggregator;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::output::CladeCountTable;
use crate::source::{CollectMode, GroupColumn};

/// Compression of a metadata file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain TSV.
    None,
    /// Zstandard-compressed TSV.
    Zstd,
}

impl Compression {
    /// Infer compression from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("zst" | "zstd") => Self::Zstd,
            _ => Self::None,
        }
    }
}

/// A deferred scan over a metadata TSV.
#[derive(Debug, Clone)]
pub struct LazyMetadata {
    path: PathBuf,
    compression: Compression,
    filter: Option<MetadataFilter>,
}

impl LazyMetadata {
    /// Plan a scan of `path`, inferring compression from its extension.
    pub fn scan_tsv(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let compression = Compression::from_path(&path);
        Self {
            path,
            compression,
            filter: None,
        }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a filter has been applied to the plan.
    pub const fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Add a filter to the plan.
    #[must_use]
    pub fn filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Plan a count per distinct combination of `group_by`.
    pub fn summarize(self, group_by: &[GroupColumn]) -> LazyCladeCounts {
        LazyCladeCounts {
            metadata: self,
            group_by: group_by.to_vec(),
        }
    }

    fn open(&self) -> Result<csv::Reader<Box<dyn Read>>> {
        let file = File::open(&self.path).map_err(|e| Error::MetadataOpen {
            path: self.path.clone(),
            source: e,
        })?;

        let input: Box<dyn Read> = match self.compression {
            Compression::None => Box::new(BufReader::new(file)),
            Compression::Zstd => {
                Box::new(
                    zstd::stream::read::Decoder::new(file).map_err(|e| Error::MetadataOpen {
                        path: self.path.clone(),
                        source: e,
                    })?,
                )
            }
        };

        // Nextstrain metadata is unquoted TSV; free-text columns may contain
        // stray quote characters.
        Ok(csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .from_reader(input))
    }

    /// Read the file, passing each qualifying record to `f`.
    ///
    /// Returns the number of rows read before filtering.
    pub fn for_each_record(&self, mut f: impl FnMut(SequenceRecord)) -> Result<u64> {
        let mut reader = self.open()?;
        let mut rows = 0u64;

        for result in reader.deserialize::<RawRecord>() {
            let raw = result.map_err(|e| Error::MetadataRead {
                path: self.path.clone(),
                source: e,
            })?;
            rows += 1;

            let record = match &self.filter {
                Some(filter) => filter.apply(raw),
                None => Some(SequenceRecord::from(raw)),
            };
            if let Some(record) = record {
                f(record);
            }
        }

        Ok(rows)
    }

    /// Read every qualifying record into memory.
    pub fn collect_records(&self) -> Result<Vec<SequenceRecord>> {
        let mut records = Vec::new();
        self.for_each_record(|r| records.push(r))?;
        Ok(records)
    }
}

/// A deferred clade count summary.
#[derive(Debug, Clone)]
pub struct LazyCladeCounts {
    metadata: LazyMetadata,
    group_by: Vec<GroupColumn>,
}

impl LazyCladeCounts {
    /// Key columns of the summary.
    pub fn group_by(&self) -> &[GroupColumn] {
        &self.group_by
    }

    /// Execute the plan.
    pub fn collect(self, mode: CollectMode) -> Result<CladeCountTable> {
        let mut aggregator = CountAggregator::new(&self.group_by);

        let rows = match mode {
            CollectMode::Streaming => self.metadata.for_each_record(|r| aggregator.add(r))?,
            CollectMode::InMemory => {
                let mut records = Vec::new();
                let rows = self.metadata.for_each_record(|r| records.push(r))?;
                aggregator.extend(records);
                rows
            }
        };

        debug!(
            path = %self.metadata.path.display(),
            ?mode,
            rows,
            groups = aggregator.len(),
            "Collected clade counts"
        );

        Ok(aggregator.finish())
    }
}
