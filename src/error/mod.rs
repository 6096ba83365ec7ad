//! Error handling for the master wells reconciliation.

pub mod util;

use std::io;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the reconciliation pipeline
///
/// Every variant aborts the run; nothing is retried or recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum MasterWellsError {
    /// A logical table name could not be resolved by the source
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// None of `API14`, `API` or `APINumber` is present
    #[error("No column available to build API14 (looked for {})", .candidates.join(", "))]
    MissingIdentifierColumn {
        /// The identifier columns that were searched, in priority order
        candidates: Vec<String>,
    },

    /// A column required by a derivation step is absent
    #[error("Missing required column '{column}' for {stage}")]
    MissingColumn {
        /// The column that was looked up
        column: String,
        /// The pipeline step that needed it
        stage: String,
    },

    /// A shared column has types with no common representation
    #[error("Cannot union column '{column}': {left:?} and {right:?} have no common representation")]
    SchemaUnion {
        /// The shared column name
        column: String,
        /// Type in the first record set
        left: DataType,
        /// Type in the second record set
        right: DataType,
    },

    /// A column name would appear twice in one record set
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MasterWellsError {
    /// Create a missing column error for the given pipeline step
    pub fn missing_column(column: &str, stage: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Prefix an IO error with context while keeping its kind
    pub fn io_context(context: impl std::fmt::Display, source: io::Error) -> Self {
        Self::Io(io::Error::new(source.kind(), format!("{context}: {source}")))
    }
}

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, MasterWellsError>;
