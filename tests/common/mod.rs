//! Shared helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::cell::RefCell;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, Date32Array, StringArray, UInt32Array};
use chrono::{DateTime, NaiveDate, Utc};
use clade_counts::output::{CladeCount, CladeCountTable};
use clade_counts::source::{
    CLADE_DATE_LOCATION, CladeContext, CladeSource, CollectMode, GroupColumn,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

/// Lazy plan recorded by [`FakeSource`].
#[derive(Debug, Clone, Default)]
pub struct FakePlan {
    pub filtered: bool,
    pub group_by: Vec<GroupColumn>,
}

/// A clade source returning a fixed table and recording each call.
pub struct FakeSource {
    pub table: CladeCountTable,
    pub calls: RefCell<Vec<String>>,
    pub contexts: RefCell<Vec<DateTime<Utc>>>,
}

impl FakeSource {
    pub fn new(rows: Vec<CladeCount>) -> Self {
        Self {
            table: CladeCountTable::new(&CLADE_DATE_LOCATION, rows),
            calls: RefCell::new(Vec::new()),
            contexts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl CladeSource for FakeSource {
    type Metadata = FakePlan;
    type Counts = FakePlan;

    fn context(&self, as_of: DateTime<Utc>) -> clade_counts::Result<CladeContext> {
        self.record("context");
        self.contexts.borrow_mut().push(as_of);
        Ok(CladeContext {
            sequence_as_of: as_of,
            url_sequence_metadata: "https://example.org/metadata.tsv.zst?versionId=fake"
                .to_string(),
            metadata_version: "fake".to_string(),
        })
    }

    fn sequence_metadata(&self, _context: &CladeContext) -> clade_counts::Result<FakePlan> {
        self.record("sequence_metadata");
        Ok(FakePlan::default())
    }

    fn filter_metadata(&self, metadata: FakePlan) -> FakePlan {
        self.record("filter_metadata");
        FakePlan {
            filtered: true,
            ..metadata
        }
    }

    fn summarize_clades(&self, metadata: FakePlan, group_by: &[GroupColumn]) -> FakePlan {
        self.record("summarize_clades");
        FakePlan {
            group_by: group_by.to_vec(),
            ..metadata
        }
    }

    fn collect(
        &self,
        counts: FakePlan,
        _mode: CollectMode,
    ) -> clade_counts::Result<CladeCountTable> {
        self.record("collect");
        assert!(counts.filtered, "summary collected without filtering");
        assert_eq!(counts.group_by, CLADE_DATE_LOCATION);
        Ok(self.table.clone())
    }
}

/// Rows of a clade/date/location Parquet file.
pub fn read_clade_counts(path: &Path) -> Vec<(Option<String>, Option<NaiveDate>, Option<String>, u32)> {
    let file = File::open(path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.unwrap();
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["clade", "date", "location", "count"]);

        let clades = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
        let dates = batch.column(1).as_any().downcast_ref::<Date32Array>().unwrap();
        let locations = batch.column(2).as_any().downcast_ref::<StringArray>().unwrap();
        let counts = batch.column(3).as_any().downcast_ref::<UInt32Array>().unwrap();

        for i in 0..batch.num_rows() {
            rows.push((
                (!clades.is_null(i)).then(|| clades.value(i).to_string()),
                dates.value_as_date(i),
                (!locations.is_null(i)).then(|| locations.value(i).to_string()),
                counts.value(i),
            ));
        }
    }
    rows
}
