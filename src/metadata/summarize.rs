//! Clade count aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::metadata::record::SequenceRecord;
use crate::output::{CladeCount, CladeCountTable};
use crate::source::GroupColumn;

type GroupKey = (
    Option<String>,
    Option<String>,
    Option<NaiveDate>,
    Option<String>,
);

/// Counts records per group key.
///
/// Keys are kept ordered so the collected table is deterministic.
#[derive(Debug)]
pub struct CountAggregator {
    group_by: Vec<GroupColumn>,
    counts: BTreeMap<GroupKey, u32>,
}

impl CountAggregator {
    /// Create an aggregator over `group_by`.
    pub fn new(group_by: &[GroupColumn]) -> Self {
        Self {
            group_by: group_by.to_vec(),
            counts: BTreeMap::new(),
        }
    }

    fn groups(&self, column: GroupColumn) -> bool {
        self.group_by.contains(&column)
    }

    /// Add one record.
    pub fn add(&mut self, record: SequenceRecord) {
        let key = (
            record.clade.filter(|_| self.groups(GroupColumn::Clade)),
            record.country.filter(|_| self.groups(GroupColumn::Country)),
            record.date.filter(|_| self.groups(GroupColumn::Date)),
            record.location.filter(|_| self.groups(GroupColumn::Location)),
        );
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no records have been added.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Finish into a table ordered by clade, country, date, location.
    pub fn finish(self) -> CladeCountTable {
        let rows = self
            .counts
            .into_iter()
            .map(|((clade, country, date, location), count)| CladeCount {
                clade,
                country,
                date,
                location,
                count,
            })
            .collect();

        CladeCountTable::new(&self.group_by, rows)
    }
}

impl Extend<SequenceRecord> for CountAggregator {
    fn extend<I: IntoIterator<Item = SequenceRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}
