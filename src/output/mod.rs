//! Output types and writers.

pub mod parquet;
pub mod progress;
mod types;

pub use self::parquet::{ParquetWriter, write_clade_counts};
pub use types::{CladeCount, CladeCountTable};
