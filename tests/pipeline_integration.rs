//! End-to-end tests of the clade count job against a fixed source.

#![allow(clippy::unwrap_used)]

mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use clade_counts::Error;
use clade_counts::output::CladeCount;
use clade_counts::pipeline::{JobOptions, run_job};
use clade_counts::source::CollectMode;
use common::{FakeSource, read_clade_counts};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options(dir: &TempDir) -> JobOptions {
    JobOptions {
        data_dir: dir.path().join("data"),
        collect_mode: CollectMode::Streaming,
    }
}

fn single_row_source() -> FakeSource {
    FakeSource::new(vec![CladeCount::new("20A", date(2024, 1, 1), "USA", 42)])
}

#[test]
fn test_past_date_writes_end_of_day_counts() {
    let dir = TempDir::new().unwrap();
    let source = single_row_source();
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();

    let result = run_job(&source, Some(date(2024, 1, 1)), now, &options(&dir)).unwrap();

    let expected_cutoff = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
    assert_eq!(result.as_of.timestamp, expected_cutoff);
    assert_eq!(source.contexts.borrow().as_slice(), [expected_cutoff]);
    assert_eq!(
        result.output_path,
        dir.path()
            .join("data")
            .join("2024-01-01_covid_clade_counts.parquet")
    );
    assert_eq!(result.rows, 1);
    assert_eq!(result.sequences, 42);

    let rows = read_clade_counts(&result.output_path);
    assert_eq!(
        rows,
        vec![(
            Some("20A".to_string()),
            Some(date(2024, 1, 1)),
            Some("USA".to_string()),
            42
        )]
    );
}

#[test]
fn test_no_date_uses_current_time() {
    let dir = TempDir::new().unwrap();
    let source = single_row_source();
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap();

    let result = run_job(&source, None, now, &options(&dir)).unwrap();

    assert_eq!(result.as_of.timestamp, now);
    assert!(
        result
            .output_path
            .ends_with("2024-03-10_covid_clade_counts.parquet")
    );
}

#[test]
fn test_today_uses_current_time() {
    let dir = TempDir::new().unwrap();
    let source = single_row_source();
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap();

    let result = run_job(&source, Some(date(2024, 3, 10)), now, &options(&dir)).unwrap();

    assert_eq!(result.as_of.timestamp, now);
}

#[test]
fn test_future_date_fails_before_context() {
    let dir = TempDir::new().unwrap();
    let source = single_row_source();
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();

    let err = run_job(&source, Some(date(2024, 1, 6)), now, &options(&dir)).unwrap_err();

    assert!(matches!(err, Error::AsOfInFuture { .. }));
    assert!(source.calls().is_empty());
    assert!(!dir.path().join("data").exists());
}

#[test]
fn test_operations_called_in_order() {
    let dir = TempDir::new().unwrap();
    let source = single_row_source();
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();

    run_job(&source, Some(date(2024, 1, 1)), now, &options(&dir)).unwrap();

    assert_eq!(
        source.calls(),
        [
            "context",
            "sequence_metadata",
            "filter_metadata",
            "summarize_clades",
            "collect"
        ]
    );
}

#[test]
fn test_rerun_overwrites_with_identical_file() {
    let dir = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();

    let first = run_job(&single_row_source(), Some(date(2024, 1, 1)), now, &options(&dir)).unwrap();
    let first_bytes = std::fs::read(&first.output_path).unwrap();

    let second =
        run_job(&single_row_source(), Some(date(2024, 1, 1)), now, &options(&dir)).unwrap();
    let second_bytes = std::fs::read(&second.output_path).unwrap();

    assert_eq!(first.output_path, second.output_path);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_empty_summary_writes_schema_only_file() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(Vec::new());
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();

    let result = run_job(&source, Some(date(2024, 1, 2)), now, &options(&dir)).unwrap();

    assert_eq!(result.rows, 0);
    assert!(result.output_path.exists());
    assert!(read_clade_counts(&result.output_path).is_empty());
}
