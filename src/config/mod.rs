//! Configuration for loading survey tables and running reports.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::algorithm::Rounding;
use crate::error::Result;
use crate::error::util::safe_read_to_string;

/// Reserved numeric answer meaning "no answer"
pub const NO_ANSWER_SENTINEL: f64 = 999.0;

/// Number of metadata lines above the header row in exported sheets
pub const DEFAULT_METADATA_ROWS: usize = 2;

/// Configuration for the survey engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Numeric answer treated as missing in every column
    pub sentinel: f64,
    /// Lines skipped before the header row of CSV exports
    pub metadata_rows: usize,
    /// Keep only respondents of this school
    pub school_id: Option<i64>,
    /// Decimal places of reported shares
    pub precision: u32,
    /// Length of preference rankings
    pub top_k: usize,
    /// Rows per batch when reading CSV exports
    pub csv_batch_size: usize,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            sentinel: NO_ANSWER_SENTINEL,
            metadata_rows: DEFAULT_METADATA_ROWS,
            school_id: None,
            precision: 1,
            top_k: 10,
            csv_batch_size: 8192,
        }
    }
}

impl SurveyConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = safe_read_to_string(path, "loading survey configuration")?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Same configuration restricted to one school
    #[must_use]
    pub fn for_school(&self, school_id: i64) -> Self {
        Self {
            school_id: Some(school_id),
            ..self.clone()
        }
    }

    /// Same configuration without a school filter
    #[must_use]
    pub fn all_schools(&self) -> Self {
        Self {
            school_id: None,
            ..self.clone()
        }
    }

    /// Rounding applied to reported shares
    ///
    /// A precision above [`crate::algorithm::MAX_DECIMALS`] is clamped to it.
    #[must_use]
    pub const fn rounding(&self) -> Rounding {
        Rounding::decimals(self.precision)
    }
}

impl fmt::Display for SurveyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Survey Configuration:")?;
        writeln!(f, "  No-answer Sentinel: {}", self.sentinel)?;
        writeln!(f, "  Metadata Rows: {}", self.metadata_rows)?;
        if let Some(school_id) = self.school_id {
            writeln!(f, "  School: {school_id}")?;
        }
        writeln!(f, "  Precision: {} decimals", self.precision)?;
        writeln!(f, "  Top K: {}", self.top_k)?;
        Ok(())
    }
}
