//! Parquet file operations

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rayon::prelude::*;

use crate::error::util::{safe_open_file, validate_directory};
use crate::error::{Result, SurveyError};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Read a parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
///
/// # Returns
/// The file schema and its record batches
pub fn read_parquet(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let start = Instant::now();
    log_operation_start("Reading survey responses from", path);

    let file = safe_open_file(path, "reading parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let batches = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, ArrowError>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok((schema, batches))
}

/// Find all parquet files in a directory, sorted by name
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    validate_directory(dir, "searching for parquet files")?;

    let entries = fs::read_dir(dir).map_err(|source| SurveyError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| SurveyError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "parquet") {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    }
    Ok(files)
}

/// Load all parquet files of a directory in parallel
///
/// Every file must share the schema of the first one.
pub fn read_parquet_dir(dir: &Path) -> Result<(Option<SchemaRef>, Vec<RecordBatch>)> {
    let files = find_parquet_files(dir)?;

    let per_file = files
        .par_iter()
        .map(|path| read_parquet(path))
        .collect::<Result<Vec<_>>>()?;

    let mut schema = None;
    let mut batches = Vec::new();
    for (file_schema, file_batches) in per_file {
        schema.get_or_insert(file_schema);
        batches.extend(file_batches);
    }
    Ok((schema, batches))
}

/// Write a record batch to a parquet file
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    log_operation_complete("wrote", path, batch.num_rows(), None);
    Ok(())
}
