//! Numeric normalization of raw input columns
//!
//! After this pass every column is a nullable `Float64` array in which
//! missing answers are uniformly null: unparseable text, NaN and the
//! no-answer sentinel all become null. Respondent and school ids keep the
//! sentinel value, it is a valid id there.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::compute::{can_cast_types, cast, filter_record_batch};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, SurveyError};
use crate::schema::{FieldKind, SurveySchema};

/// Convert one column to numeric codes, with the sentinel removed if given
pub fn to_numeric(column: &ArrayRef, sentinel: Option<f64>) -> Result<Float64Array> {
    let column: ArrayRef = match column.as_any().downcast_ref::<StringArray>() {
        Some(strings) => Arc::new(
            strings
                .iter()
                .map(|value| value.map(str::trim))
                .collect::<StringArray>(),
        ),
        None => column.clone(),
    };

    if !can_cast_types(column.data_type(), &DataType::Float64) {
        return Ok(Float64Array::new_null(column.len()));
    }

    let numeric = cast(&column, &DataType::Float64)?;
    let numeric = numeric
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| {
            arrow::error::ArrowError::CastError(format!(
                "cast of {} did not produce Float64",
                column.data_type()
            ))
        })?;

    Ok(numeric
        .iter()
        .map(|value| value.filter(|v| v.is_finite() && Some(*v) != sentinel))
        .collect())
}

/// Convert every column of a batch to numeric codes
///
/// Columns are renamed to their canonical schema name. A column whose
/// canonical name is also present verbatim keeps its own name.
pub fn numeric_batch(batch: &RecordBatch, schema: &SurveySchema, sentinel: f64) -> Result<RecordBatch> {
    let input = batch.schema();
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());

    for (field, column) in input.fields().iter().zip(batch.columns()) {
        let canonical = schema.canonical_name(field.name());
        let name = if canonical != field.name() && input.index_of(canonical).is_ok() {
            field.name().as_str()
        } else {
            canonical
        };
        let is_id = schema
            .field(name)
            .is_some_and(|spec| matches!(spec.kind, FieldKind::Identifier | FieldKind::School));

        fields.push(Field::new(name, DataType::Float64, true));
        columns.push(Arc::new(to_numeric(column, (!is_id).then_some(sentinel))?));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Keep only rows whose school column equals `school_id`
pub fn filter_school(batch: &RecordBatch, school_field: &str, school_id: i64) -> Result<RecordBatch> {
    let idx = batch
        .schema()
        .index_of(school_field)
        .map_err(|_| SurveyError::missing_column(school_field))?;
    let schools = batch
        .column(idx)
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| SurveyError::missing_column(school_field))?;

    #[allow(clippy::cast_precision_loss)]
    let wanted = school_id as f64;
    let mask = schools
        .iter()
        .map(|school| Some(school == Some(wanted)))
        .collect::<BooleanArray>();

    Ok(filter_record_batch(batch, &mask)?)
}
