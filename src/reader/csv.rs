//! CSV exports of the survey spreadsheet
//!
//! Exports carry metadata lines above the header row. Every column is read
//! as text; numeric parsing happens when the response table is built.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read a CSV export, skipping `metadata_rows` lines before the header
pub fn read_csv(
    path: &Path,
    metadata_rows: usize,
    batch_size: usize,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    log_operation_start("Reading survey export", path);

    let content = safe_read_to_string(path, "reading csv export")?;
    let (schema, batches) = parse_csv(&content, metadata_rows, batch_size)?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, None);
    Ok((schema, batches))
}

/// Parse CSV text into all-text record batches
pub fn parse_csv(
    content: &str,
    metadata_rows: usize,
    batch_size: usize,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let body = skip_lines(content.trim_start_matches('\u{feff}'), metadata_rows);

    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(body.as_bytes()), Some(1))?;
    let fields = inferred
        .fields()
        .iter()
        .map(|field| Field::new(field.name().trim(), DataType::Utf8, true))
        .collect::<Vec<_>>();
    let schema: SchemaRef = Arc::new(Schema::new(fields));

    let batches = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(batch_size.max(1))
        .build(Cursor::new(body.as_bytes()))?
        .collect::<std::result::Result<Vec<_>, ArrowError>>()?;

    Ok((schema, batches))
}

fn skip_lines(content: &str, lines: usize) -> &str {
    let mut rest = content;
    for _ in 0..lines {
        match rest.find('\n') {
            Some(idx) => rest = &rest[idx + 1..],
            None => return "",
        }
    }
    rest
}
