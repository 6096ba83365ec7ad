//! Parquet file operations
//!
//! Reading single Parquet files or directories of Parquet parts into record
//! sets, and writing record sets back out.

use std::fs;
use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;
use rayon::prelude::*;

use crate::algorithm::union::union_by_name;
use crate::error::util::{safe_create_file, safe_open_file, validate_directory};
use crate::error::{MasterWellsError, Result};
use crate::record_set::RecordSet;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("PARQUET_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Read a parquet file into a single record set
///
/// # Arguments
/// * `path` - Path to the Parquet file
pub fn read_parquet(path: &Path) -> Result<RecordSet> {
    let start = std::time::Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = safe_open_file(path, "reading parquet data")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE));
    let schema: SchemaRef = builder.schema().clone();
    let batches: Vec<RecordBatch> = builder.build()?.collect::<std::result::Result<_, _>>()?;

    let record_set = RecordSet::from_batches(schema, &batches)?;
    log_operation_complete("read", path, record_set.num_rows(), Some(start.elapsed()));
    Ok(record_set)
}

/// Find all Parquet files in a directory, sorted by file name
///
/// # Arguments
/// * `dir` - Path to the directory to search
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for parquet files in", dir);
    validate_directory(dir, "finding parquet parts")?;

    let parquet_files = fs::read_dir(dir)
        .map_err(|e| MasterWellsError::io_context(format!("Failed to read {}", dir.display()), e))?
        .map(|entry| entry.map(|e| e.path()))
        .filter_ok(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "parquet"))
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if parquet_files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, parquet_files.len(), None);
    }

    Ok(parquet_files)
}

/// Load all parquet parts from a directory in parallel
///
/// Parts are read concurrently and then combined by column name in file-name
/// order, so parts written with slightly different schemas still line up.
pub fn load_parquet_files_parallel(dir: &Path) -> Result<RecordSet> {
    let parquet_files = find_parquet_files(dir)?;

    let parts: Vec<RecordSet> = parquet_files
        .par_iter()
        .map(|path| read_parquet(path.as_path()))
        .collect::<Result<Vec<_>>>()?;

    let combined = parts
        .into_iter()
        .try_fold(None::<RecordSet>, |acc, part| -> Result<Option<RecordSet>> {
            Ok(Some(match acc {
                Some(acc) => union_by_name(&acc, &part)?,
                None => part,
            }))
        })?
        .unwrap_or_else(|| RecordSet::empty(0));

    log::info!(
        "Successfully loaded {} rows from {} Parquet files",
        combined.num_rows(),
        parquet_files.len()
    );

    Ok(combined)
}

/// Write a record set to a parquet file, replacing any existing file
pub fn write_parquet(path: &Path, record_set: &RecordSet) -> Result<()> {
    let start = std::time::Instant::now();
    log_operation_start("Writing parquet file", path);

    let file = safe_create_file(path, "writing parquet data")?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, record_set.schema(), Some(props))?;
    writer.write(record_set.batch())?;
    writer.close()?;

    log_operation_complete("wrote", path, record_set.num_rows(), Some(start.elapsed()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
    use std::sync::Arc;

    #[test]
    fn test_parquet_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wells.parquet");
        let set = RecordSet::from_columns(vec![
            ("API14", Arc::new(StringArray::from(vec!["00000000000001"])) as ArrayRef),
            ("DEPTH", Arc::new(Int64Array::from(vec![Some(5)])) as ArrayRef),
        ])
        .unwrap();

        write_parquet(&path, &set).unwrap();
        let read = read_parquet(&path).unwrap();
        assert_eq!(read.column_names(), set.column_names());
        assert_eq!(read.batch().columns(), set.batch().columns());
    }

    #[test]
    fn test_parts_are_unioned_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = RecordSet::from_columns(vec![(
            "API14",
            Arc::new(StringArray::from(vec!["a"])) as ArrayRef,
        )])
        .unwrap();
        let second = RecordSet::from_columns(vec![
            ("API14", Arc::new(StringArray::from(vec!["b"])) as ArrayRef),
            ("DEPTH", Arc::new(Int64Array::from(vec![7])) as ArrayRef),
        ])
        .unwrap();
        write_parquet(&dir.path().join("part-1.parquet"), &second).unwrap();
        write_parquet(&dir.path().join("part-0.parquet"), &first).unwrap();
        std::fs::write(dir.path().join("_SUCCESS"), b"").unwrap();

        let loaded = load_parquet_files_parallel(dir.path()).unwrap();
        assert_eq!(loaded.num_rows(), 2);
        assert_eq!(loaded.column_names(), vec!["API14", "DEPTH"]);
        let keys = loaded
            .column("API14")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(keys.value(0), "a");
        assert_eq!(keys.value(1), "b");
    }
}
