//! Input sources for survey response tables
//!
//! A source yields one Arrow record batch holding every respondent. Column
//! types are left as found; the response table normalizes them.

pub mod csv;
pub mod parquet;

use std::path::{Path, PathBuf};

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;

use crate::config::SurveyConfig;
use crate::error::{Result, SurveyError};

/// Where survey responses come from
#[derive(Debug, Clone)]
pub enum ResponseSource {
    /// A single parquet file
    Parquet(PathBuf),
    /// A directory of parquet files with a shared schema
    ParquetDir(PathBuf),
    /// A CSV export of the survey sheet
    Csv(PathBuf),
    /// Record batches already in memory
    Batches(Vec<RecordBatch>),
}

impl ResponseSource {
    /// Pick a source kind from the path: directories, `.csv` files, or parquet
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.is_dir() {
            Self::ParquetDir(path.to_path_buf())
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            Self::Csv(path.to_path_buf())
        } else {
            Self::Parquet(path.to_path_buf())
        }
    }

    /// Read the whole source into one record batch
    pub fn read(&self, config: &SurveyConfig) -> Result<RecordBatch> {
        let (schema, batches) = match self {
            Self::Parquet(path) => {
                let (schema, batches) = parquet::read_parquet(path)?;
                (Some(schema), batches)
            }
            Self::ParquetDir(dir) => parquet::read_parquet_dir(dir)?,
            Self::Csv(path) => {
                let (schema, batches) =
                    csv::read_csv(path, config.metadata_rows, config.csv_batch_size)?;
                (Some(schema), batches)
            }
            Self::Batches(batches) => (batches.first().map(RecordBatch::schema), batches.clone()),
        };

        let schema = schema.ok_or(SurveyError::EmptyCohort {
            school_id: config.school_id,
        })?;
        Ok(concat_batches(&schema, &batches)?)
    }
}

impl From<RecordBatch> for ResponseSource {
    fn from(batch: RecordBatch) -> Self {
        Self::Batches(vec![batch])
    }
}
