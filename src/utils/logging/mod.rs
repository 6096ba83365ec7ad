//! Logging utilities for file operations and pipeline stages

pub mod log;

// Re-export commonly used functions for convenience
pub use self::log::{log_operation_complete, log_operation_start, log_stage_complete, log_warning};
