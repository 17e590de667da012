//! Uniform log lines for file and report operations

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
///
/// # Arguments
/// * `operation` - What is being done, e.g. "Reading survey responses from"
/// * `path` - File or directory involved
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the end of a file operation with the number of rows involved
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "read" or "wrote"
/// * `path` - File or directory involved
/// * `rows` - Number of respondent rows
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} rows ({}) in {:?}",
            operation,
            rows,
            path.display(),
            duration
        ),
        None => log::info!("Successfully {} {} rows ({})", operation, rows, path.display()),
    }
}

/// Log a warning, optionally about a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log a report section that could not be computed
pub fn log_section_failed(section: &str, school_id: Option<i64>, error: &impl Display) {
    match school_id {
        Some(school_id) => log::error!("Error processing {section} for school {school_id}: {error}"),
        None => log::error!("Error processing {section}: {error}"),
    }
}
