//! Async parquet file operations

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;
use tokio::fs::{self, File};

use crate::error::util::validate_directory;
use crate::error::{Result, SurveyError};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Find all parquet files in a directory, sorted by name
///
/// # Errors
/// Returns an error if the directory cannot be read
pub async fn find_parquet_files_async(dir: &Path) -> Result<Vec<PathBuf>> {
    validate_directory(dir, "searching for parquet files")?;
    let io_error = |source| SurveyError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await.map_err(io_error)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        let is_file = entry.file_type().await.map_err(io_error)?.is_file();
        if is_file && path.extension().is_some_and(|ext| ext == "parquet") {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    }
    Ok(files)
}

/// Stream a parquet file into record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `batch_size` - Optional rows per batch
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded
pub async fn read_parquet_async(
    path: &Path,
    batch_size: Option<usize>,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let start = Instant::now();
    log_operation_start("Reading survey responses asynchronously from", path);

    let file = File::open(path).await.map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut builder = ParquetRecordBatchStreamBuilder::new(file).await?;
    if let Some(batch_size) = batch_size {
        builder = builder.with_batch_size(batch_size);
    }
    let schema = builder.schema().clone();
    let batches = builder.build()?.try_collect::<Vec<_>>().await?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok((schema, batches))
}
