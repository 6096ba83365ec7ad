//! Directory-backed source and sink
//!
//! Logical table names map to files under a data directory:
//! `<name>.parquet`, `<name>.csv` or a `<name>/` directory of Parquet parts.
//! Dotted names are also looked up as nested paths, and every candidate is
//! retried in lower case.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::common::traits::{Sink, Source, WriteMode};
use crate::config::{OutputFormat, StoreConfig};
use crate::error::util::validate_directory;
use crate::error::{MasterWellsError, Result};
use crate::record_set::RecordSet;
use crate::utils::io::{load_parquet_files_parallel, read_csv_as_strings, read_parquet, write_csv, write_parquet};

/// A resolved on-disk location of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocation {
    ParquetFile(PathBuf),
    CsvFile(PathBuf),
    ParquetDirectory(PathBuf),
}

/// A source and sink rooted at a data directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    output_format: OutputFormat,
}

impl DirectoryStore {
    /// Open a store rooted at an existing directory
    pub fn open(root: impl Into<PathBuf>, output_format: OutputFormat) -> Result<Self> {
        let root = root.into();
        validate_directory(&root, "opening the data directory")?;
        Ok(Self {
            root,
            output_format,
        })
    }

    /// Open a store described by `config`
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Self::open(&config.data_dir, config.output_format)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative path stems tried for a logical name, in order
    fn candidate_stems(logical_name: &str) -> Vec<PathBuf> {
        let mut names = vec![logical_name.to_string()];
        let lower = logical_name.to_lowercase();
        if lower != logical_name {
            names.push(lower);
        }

        let mut stems: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
        for name in &names {
            if name.contains('.') {
                stems.push(name.split('.').collect());
            }
        }
        stems
    }

    /// Find where `logical_name` is stored, if anywhere
    #[must_use]
    pub fn resolve(&self, logical_name: &str) -> Option<TableLocation> {
        Self::candidate_stems(logical_name).into_iter().find_map(|stem| {
            let base = self.root.join(stem);
            let parquet = with_extension(&base, "parquet");
            if parquet.is_file() {
                return Some(TableLocation::ParquetFile(parquet));
            }
            let csv = with_extension(&base, "csv");
            if csv.is_file() {
                return Some(TableLocation::CsvFile(csv));
            }
            base.is_dir().then_some(TableLocation::ParquetDirectory(base))
        })
    }

    /// Path the output table `qualified_name` is written to
    #[must_use]
    pub fn output_path(&self, qualified_name: &str) -> PathBuf {
        with_extension(&self.root.join(qualified_name), self.output_format.extension())
    }
}

/// Append `.ext` without replacing dotted parts of the file name
fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Remove a partially written staging file, if any
fn discard_staging(staging: &Path) {
    if staging.exists() {
        if let Err(e) = fs::remove_file(staging) {
            warn!("Failed to remove staging file {}: {e}", staging.display());
        }
    }
}

impl Source for DirectoryStore {
    fn load(&self, logical_name: &str) -> Result<RecordSet> {
        let location = self
            .resolve(logical_name)
            .ok_or_else(|| MasterWellsError::TableNotFound(logical_name.to_string()))?;
        debug!("Resolved {logical_name} to {location:?}");

        match location {
            TableLocation::ParquetFile(path) => read_parquet(&path),
            TableLocation::CsvFile(path) => read_csv_as_strings(&path),
            TableLocation::ParquetDirectory(path) => load_parquet_files_parallel(&path),
        }
    }
}

impl Sink for DirectoryStore {
    fn materialize(
        &mut self,
        record_set: &RecordSet,
        qualified_name: &str,
        mode: WriteMode,
    ) -> Result<()> {
        let target = self.output_path(qualified_name);
        let staging = with_extension(&target, "tmp");

        let written = match self.output_format {
            OutputFormat::Parquet => write_parquet(&staging, record_set),
            OutputFormat::Csv => write_csv(&staging, record_set),
        }
        .and_then(|()| match mode {
            WriteMode::Overwrite => fs::rename(&staging, &target).map_err(|e| {
                MasterWellsError::io_context(
                    format!("Failed to replace {}", target.display()),
                    e,
                )
            }),
        });

        if let Err(e) = written {
            discard_staging(&staging);
            return Err(e);
        }

        info!(
            "Materialized {qualified_name} ({} rows) to {} ({mode})",
            record_set.num_rows(),
            target.display()
        );
        Ok(())
    }
}
