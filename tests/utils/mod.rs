use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use survey_engine::synthetic::{CohortSpec, generate_cohort};
use survey_engine::{CodeBook, ResponseTable, SurveyConfig, SurveySchema};

/// Build a batch of nullable integer columns
#[must_use]
pub fn int_batch(columns: Vec<(&str, Vec<Option<i64>>)>) -> RecordBatch {
    let fields = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Int64, true))
        .collect::<Vec<_>>();
    let arrays = columns
        .into_iter()
        .map(|(_, values)| Arc::new(Int64Array::from(values)) as ArrayRef)
        .collect::<Vec<_>>();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

/// Sequential respondent ids `1..=n`
#[must_use]
pub fn ids(n: usize) -> Vec<Option<i64>> {
    (1..=n as i64).map(Some).collect()
}

/// Decode a batch with the builtin code book and default configuration
#[must_use]
pub fn table(batch: &RecordBatch, schema: &SurveySchema) -> ResponseTable {
    ResponseTable::from_batch(batch, schema, &CodeBook::builtin(), &SurveyConfig::default()).unwrap()
}

/// A synthetic cohort in the standard layout
#[must_use]
pub fn cohort(schools: Vec<i64>, respondents_per_school: usize, symmetric: bool) -> RecordBatch {
    let spec = CohortSpec {
        schools,
        respondents_per_school,
        symmetric,
        ..CohortSpec::default()
    };
    generate_cohort(&spec, &CodeBook::builtin()).unwrap()
}

/// The same batch with column `from` renamed to `to`
#[must_use]
pub fn rename_column(batch: &RecordBatch, from: &str, to: &str) -> RecordBatch {
    let fields = batch
        .schema()
        .fields()
        .iter()
        .map(|field| {
            if field.name() == from {
                field.as_ref().clone().with_name(to)
            } else {
                field.as_ref().clone()
            }
        })
        .collect::<Vec<_>>();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), batch.columns().to_vec()).unwrap()
}
