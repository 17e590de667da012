//! Error handling for the survey engine.
//!
//! Structural problems (absent columns, zero denominators, undefined
//! categories) are reported as explicit variants so the caller can decide
//! whether to skip a report section or abort. Absence of a *value* inside an
//! otherwise valid distribution is never an error.

pub mod util;

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::codebook::Domain;

/// Errors produced while loading survey tables or running aggregations
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// A required field, or a named choice group, is not present
    #[error("Missing column: {column}")]
    MissingColumn {
        /// Name of the absent column
        column: String,
    },

    /// Loading or filtering produced a table without respondents
    #[error("Empty cohort{}", school_id.map(|id| format!(" for school {id}")).unwrap_or_default())]
    EmptyCohort {
        /// School filter that was applied, if any
        school_id: Option<i64>,
    },

    /// One side of a boolean grouping has no respondents, so its rate is undefined
    #[error("No respondents with {field} = {value}")]
    GroupValueMissing {
        /// Grouping field
        field: String,
        /// Group value without respondents
        value: bool,
    },

    /// A category was required but the code book does not define it
    #[error("No category for '{key}' in the {domain} code book")]
    LookupMiss {
        /// Code book domain that was searched
        domain: Domain,
        /// Code or category name that was looked up
        key: String,
    },

    /// A grouping field that must be boolean is something else
    #[error("Field '{field}' is not a boolean flag")]
    NotBoolean {
        /// Offending field
        field: String,
    },

    /// Nothing was left to normalize against
    #[error("Field '{field}' has no answered responses")]
    NoResponses {
        /// Field that was queried
        field: String,
    },

    /// A row without a respondent id
    #[error("Respondent at row {row} has no id")]
    MissingRespondentId {
        /// Zero-based row index in the loaded table
        row: usize,
    },

    /// The code book resource is malformed
    #[error("Invalid code book: {0}")]
    InvalidCodeBook(String),

    /// Error opening or reading a file
    #[error("IO error for {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rows could not be converted to or from Arrow
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),

    /// A blocking load task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SurveyError {
    /// Shorthand for [`SurveyError::MissingColumn`]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Whether the error means "no data" for a query rather than a broken input
    #[must_use]
    pub const fn is_zero_denominator(&self) -> bool {
        matches!(
            self,
            Self::EmptyCohort { .. } | Self::GroupValueMissing { .. } | Self::NoResponses { .. }
        )
    }
}

/// Result type for survey engine operations
pub type Result<T> = std::result::Result<T, SurveyError>;
