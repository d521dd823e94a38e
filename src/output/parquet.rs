//! Parquet output format writer.
//!
//! Clade count tables are written in Apache Parquet format for the downstream
//! modelling tools. The schema follows the table's grouping: one column per
//! key, then `count`.

use arrow::array::{ArrayRef, Date32Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Date32Type, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::constants::parquet::BATCH_SIZE;
use crate::error::{Error, Result};
use crate::output::types::{CladeCount, CladeCountTable};
use crate::source::GroupColumn;

/// Parquet writer for clade counts.
///
/// Buffers rows and writes them in batches to a Parquet file.
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    schema: Arc<Schema>,
    rows: Vec<CladeCount>,
    batch_size: usize,
}

impl ParquetWriter {
    /// Create a new Parquet writer.
    ///
    /// # Arguments
    ///
    /// * `output_path` - Path where the Parquet file will be written; an
    ///   existing file is truncated
    /// * `group_by` - Key columns of the table, in output order
    pub fn new(output_path: &Path, group_by: &[GroupColumn]) -> Result<Self> {
        let schema = build_schema(group_by);
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .set_writer_version(parquet::file::properties::WriterVersion::PARQUET_2_0)
            .build();

        let file = File::create(output_path).map_err(|e| Error::ParquetFileCreate {
            path: output_path.to_path_buf(),
            source: e,
        })?;

        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(|e| {
            Error::ParquetWrite {
                context: "Failed to initialize Parquet writer".to_string(),
                source: e,
            }
        })?;

        Ok(Self {
            writer,
            schema,
            rows: Vec::new(),
            batch_size: BATCH_SIZE,
        })
    }

    /// Add a row to the buffer.
    ///
    /// Automatically flushes the batch when `batch_size` is reached.
    pub fn write_row(&mut self, row: CladeCount) -> Result<()> {
        self.rows.push(row);

        if self.rows.len() >= self.batch_size {
            self.flush_batch()?;
        }

        Ok(())
    }

    /// Flush buffered rows to file.
    fn flush_batch(&mut self) -> Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }

        let batch = build_record_batch(&self.rows, &self.schema)?;
        self.writer.write(&batch).map_err(|e| Error::ParquetWrite {
            context: "Failed to write Parquet record batch".to_string(),
            source: e,
        })?;
        self.rows.clear();

        Ok(())
    }

    /// Finalize and close the writer.
    ///
    /// Flushes any remaining buffered rows and closes the file.
    pub fn close(mut self) -> Result<()> {
        self.flush_batch()?;
        self.writer.close().map_err(|e| Error::ParquetWrite {
            context: "Failed to close Parquet writer".to_string(),
            source: e,
        })?;
        Ok(())
    }
}

/// Write a whole table to `output_path`.
pub fn write_clade_counts(table: &CladeCountTable, output_path: &Path) -> Result<()> {
    let mut writer = ParquetWriter::new(output_path, &table.group_by)?;
    for row in &table.rows {
        writer.write_row(row.clone())?;
    }
    writer.close()
}

/// Build Arrow schema for the given key columns.
///
/// Key columns are nullable; `count` is not.
fn build_schema(group_by: &[GroupColumn]) -> Arc<Schema> {
    let mut fields: Vec<Field> = group_by
        .iter()
        .map(|column| match column {
            GroupColumn::Clade | GroupColumn::Country | GroupColumn::Location => {
                Field::new(column.name(), DataType::Utf8, true)
            }
            GroupColumn::Date => Field::new(column.name(), DataType::Date32, true),
        })
        .collect();
    fields.push(Field::new("count", DataType::UInt32, false));

    Arc::new(Schema::new(fields))
}

/// Build Arrow `RecordBatch` from rows.
fn build_record_batch(rows: &[CladeCount], schema: &Arc<Schema>) -> Result<RecordBatch> {
    let columns = schema
        .fields()
        .iter()
        .map(|field| build_column(field, rows))
        .collect::<Result<Vec<ArrayRef>>>()?;

    RecordBatch::try_new(schema.clone(), columns).map_err(|e| Error::ParquetWrite {
        context: format!("Failed to build record batch: {e}"),
        source: parquet::errors::ParquetError::General(e.to_string()),
    })
}

/// Build one column from rows.
fn build_column(field: &Field, rows: &[CladeCount]) -> Result<ArrayRef> {
    match field.name().as_str() {
        "clade" => {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r.clade.as_deref()).collect();
            Ok(Arc::new(StringArray::from(values)))
        }
        "country" => {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r.country.as_deref()).collect();
            Ok(Arc::new(StringArray::from(values)))
        }
        "date" => {
            let values: Vec<Option<i32>> = rows
                .iter()
                .map(|r| r.date.map(Date32Type::from_naive_date))
                .collect();
            Ok(Arc::new(Date32Array::from(values)))
        }
        "location" => {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r.location.as_deref()).collect();
            Ok(Arc::new(StringArray::from(values)))
        }
        "count" => {
            let values: UInt32Array = rows.iter().map(|r| r.count).collect();
            Ok(Arc::new(values))
        }
        name => Err(Error::InvalidColumnName {
            name: name.to_string(),
        }),
    }
}
