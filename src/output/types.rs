//! Output type definitions.

use chrono::NaiveDate;

use crate::source::GroupColumn;

/// Count of sequences for one group key.
///
/// Key fields that are not part of the table's grouping are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CladeCount {
    /// Nextstrain clade.
    pub clade: Option<String>,
    /// Sample country.
    pub country: Option<String>,
    /// Sample collection date.
    pub date: Option<NaiveDate>,
    /// Sample location.
    pub location: Option<String>,
    /// Number of sequences.
    pub count: u32,
}

impl CladeCount {
    /// Build a clade/date/location count.
    pub fn new(
        clade: impl Into<String>,
        date: NaiveDate,
        location: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            clade: Some(clade.into()),
            country: None,
            date: Some(date),
            location: Some(location.into()),
            count,
        }
    }
}

/// A materialized clade count summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CladeCountTable {
    /// Key columns, in output order.
    pub group_by: Vec<GroupColumn>,
    /// One row per distinct key.
    pub rows: Vec<CladeCount>,
}

impl CladeCountTable {
    /// Create a table from key columns and rows.
    pub fn new(group_by: &[GroupColumn], rows: Vec<CladeCount>) -> Self {
        Self {
            group_by: group_by.to_vec(),
            rows,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of sequences counted.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.count)).sum()
    }
}
