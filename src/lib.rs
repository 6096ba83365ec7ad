//! Reconciliation of well-identification records from multiple sources into
//! one master wells record set keyed by a normalized `API14` identifier.

pub mod algorithm;
pub mod common;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod record_set;
pub mod schema;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
pub use common::traits::{Sink, Source, WriteMode};
pub use config::{AppConfig, OutputFormat, PipelineConfig, StoreConfig};
pub use error::{MasterWellsError, Result};
pub use pipeline::{MasterWellsPipeline, RunSummary, build_table_name};
pub use record_set::RecordSet;
pub use store::{DirectoryStore, MemoryStore};

// Reconciliation steps
pub use algorithm::{
    API10, API12, API14, Enrichment, derive_standard_columns, enrich, ensure_join_key, left_join,
    normalize_identifiers, suffix_columns, union_by_name, zero_pad_left,
};
