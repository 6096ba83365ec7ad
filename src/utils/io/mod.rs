//! IO utilities for file operations
//!
//! Readers and writers for the file formats a data directory may hold.

pub mod csv;
pub mod parquet;

// Re-export commonly used functions for convenience
pub use csv::{read_csv_as_strings, write_csv};
pub use parquet::{find_parquet_files, load_parquet_files_parallel, read_parquet, write_parquet};
