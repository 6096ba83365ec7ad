//! Utility functions for file IO and logging

pub mod io;
pub mod logging;

pub use io::parquet::DEFAULT_BATCH_SIZE;
