//! Utility functions for error handling
//!
//! This module provides utility functions to make error handling more convenient.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{EhrError, Result};

/// Safely open a source file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a `SourceUnavailable` error
pub fn open_source(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(EhrError::source_unavailable(
            path,
            format!("File not found, needed for: {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    if !path.is_file() {
        return Err(EhrError::source_unavailable(
            path,
            format!("Path is not a file, expected a file for: {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        EhrError::source_unavailable(path, context, e)
    })
}

/// Wrap an I/O error raised mid-read into a `SourceUnavailable` error
pub fn read_failure(path: &Path, line: usize, error: io::Error) -> EhrError {
    EhrError::source_unavailable(path, format!("Failed to read line {line}"), error)
}
