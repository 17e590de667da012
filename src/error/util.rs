//! Utility functions for error handling
//!
//! File helpers that attach the offending path to I/O failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SurveyError};

/// Safely open a file with the path attached to any error
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(SurveyError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a readable file (needed for {purpose})"),
            ),
        });
    }

    fs::File::open(path).map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(SurveyError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found (needed for {purpose})"),
            ),
        });
    }

    fs::read_dir(path).map(|_| ()).map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Safely read a file to string
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;
    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content)
}
