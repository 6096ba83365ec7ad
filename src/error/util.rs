//! Utility functions for error handling
//!
//! Filesystem helpers that attach the path and the reason the path was needed
//! to IO failures, so a failed run names what it was trying to read or write.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{MasterWellsError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(MasterWellsError::io_context(
            format!("{} (needed for: {purpose})", path.display()),
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("{}: permission denied - check file permissions", path.display())
            }
            _ => format!("{}: failed to open file for {purpose}", path.display()),
        };
        MasterWellsError::io_context(context, e)
    })
}

/// Create a file for writing, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            MasterWellsError::io_context(
                format!("{}: failed to create directory for {purpose}", parent.display()),
                e,
            )
        })?;
    }

    fs::File::create(path).map_err(|e| {
        MasterWellsError::io_context(
            format!("{}: failed to create file for {purpose}", path.display()),
            e,
        )
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(MasterWellsError::io_context(
            format!("{} (needed for: {purpose})", path.display()),
            io::Error::new(io::ErrorKind::NotFound, "directory not found"),
        ));
    }

    fs::read_dir(path).map(|_| ()).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("{}: permission denied - check directory permissions", path.display())
            }
            _ => format!("{}: failed to access directory for {purpose}", path.display()),
        };
        MasterWellsError::io_context(context, e)
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::InvalidData => {
                format!("{}: file contains invalid UTF-8 data", path.display())
            }
            _ => format!("{}: failed to read file content for {purpose}", path.display()),
        };
        MasterWellsError::io_context(context, e)
    })?;
    Ok(content)
}
