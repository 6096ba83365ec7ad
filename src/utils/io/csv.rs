//! CSV file operations
//!
//! CSV inputs are read with every column as a string so identifiers keep
//! their leading zeros.

use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::util::{safe_create_file, safe_open_file};
use crate::error::Result;
use crate::record_set::RecordSet;
use crate::utils::io::parquet::{DEFAULT_BATCH_SIZE, get_batch_size};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a CSV file with a header row, typing every column as `Utf8`
pub fn read_csv_as_strings(path: &Path) -> Result<RecordSet> {
    let start = std::time::Instant::now();
    log_operation_start("Reading csv file", path);

    let mut file = safe_open_file(path, "reading csv data")?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(BufReader::new(&mut file), Some(0))?;
    file.seek(SeekFrom::Start(0))?;

    let schema = Arc::new(Schema::new(
        inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE))
        .build(BufReader::new(file))?;
    let batches: Vec<RecordBatch> = reader.collect::<std::result::Result<_, _>>()?;

    let record_set = RecordSet::from_batches(schema, &batches)?;
    log_operation_complete("read", path, record_set.num_rows(), Some(start.elapsed()));
    Ok(record_set)
}

/// Write a record set as CSV with a header row, replacing any existing file
pub fn write_csv(path: &Path, record_set: &RecordSet) -> Result<()> {
    let start = std::time::Instant::now();
    log_operation_start("Writing csv file", path);

    let file = safe_create_file(path, "writing csv data")?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(record_set.batch())?;

    log_operation_complete("wrote", path, record_set.num_rows(), Some(start.elapsed()));
    Ok(())
}
