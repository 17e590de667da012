//! Decoded survey response tables
//!
//! A [`ResponseTable`] is built once per input and is read-only afterwards.
//! It keeps two views of every column: the raw numeric codes (missing
//! answers are `None`) and the decoded values (flags, labels, code book
//! labels). Membership tests need the codes, distributions use the decoded
//! values.

pub mod normalize;

use std::collections::BTreeSet;

use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::codebook::CodeBook;
use crate::config::SurveyConfig;
use crate::error::{Result, SurveyError};
use crate::reader::ResponseSource;
use crate::schema::{ChoiceGroup, Code, FieldKind, SurveySchema, Value};

/// Immutable, decoded table of survey respondents
#[derive(Debug, Clone)]
pub struct ResponseTable {
    schema: SurveySchema,
    school_id: Option<i64>,
    ids: Vec<i64>,
    raw: FxHashMap<String, Float64Array>,
    decoded: FxHashMap<String, Vec<Option<Value>>>,
}

impl ResponseTable {
    /// Read a source and build the decoded table
    ///
    /// # Errors
    /// * [`SurveyError::MissingColumn`] if a required field is absent
    /// * [`SurveyError::EmptyCohort`] if no respondents remain after filtering
    pub fn load(
        source: &ResponseSource,
        schema: &SurveySchema,
        codebook: &CodeBook,
        config: &SurveyConfig,
    ) -> Result<Self> {
        let batch = source.read(config)?;
        Self::from_batch(&batch, schema, codebook, config)
    }

    /// Build the decoded table from an in-memory batch
    pub fn from_batch(
        batch: &RecordBatch,
        schema: &SurveySchema,
        codebook: &CodeBook,
        config: &SurveyConfig,
    ) -> Result<Self> {
        let mut numeric = normalize::numeric_batch(batch, schema, config.sentinel)?;
        let input_schema = numeric.schema();
        for spec in schema.required_fields() {
            if input_schema.index_of(&spec.name).is_err() {
                return Err(SurveyError::missing_column(&spec.name));
            }
        }
        if config.school_id.is_some() && input_schema.index_of(schema.school_field()).is_err() {
            return Err(SurveyError::missing_column(schema.school_field()));
        }

        if let Some(school_id) = config.school_id {
            numeric = normalize::filter_school(&numeric, schema.school_field(), school_id)?;
        }
        if numeric.num_rows() == 0 {
            return Err(SurveyError::EmptyCohort {
                school_id: config.school_id,
            });
        }

        let mut schema = schema.clone();
        let mut raw = FxHashMap::default();
        for (field, column) in numeric.schema().fields().iter().zip(numeric.columns()) {
            let column = column
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| SurveyError::missing_column(field.name()))?
                .clone();
            schema.insert_discovered(field.name());
            raw.insert(field.name().clone(), column);
        }

        let id_column = raw
            .get(schema.id_field())
            .ok_or_else(|| SurveyError::missing_column(schema.id_field()))?;
        let ids = id_column
            .iter()
            .enumerate()
            .map(|(row, id)| {
                id.and_then(|id| Code::new(id).as_int())
                    .ok_or(SurveyError::MissingRespondentId { row })
            })
            .collect::<Result<Vec<_>>>()?;

        let decoded = schema
            .fields()
            .iter()
            .filter_map(|spec| {
                raw.get(&spec.name).map(|column| {
                    let values = column
                        .iter()
                        .map(|code| code.map(|code| spec.kind.decode(Code::new(code), codebook)))
                        .collect::<Vec<_>>();
                    (spec.name.clone(), values)
                })
            })
            .collect();

        Ok(Self {
            schema,
            school_id: config.school_id,
            ids,
            raw,
            decoded,
        })
    }

    /// Number of respondents, after any school filter
    #[must_use]
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    /// Respondent ids in row order
    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// School filter the table was loaded with
    #[must_use]
    pub const fn school_id(&self) -> Option<i64> {
        self.school_id
    }

    /// Schema including columns discovered in the input
    #[must_use]
    pub const fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    /// Whether the input contained the column
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.raw.contains_key(name)
    }

    /// Raw numeric codes of a column; missing answers are null
    pub fn raw_field(&self, name: &str) -> Result<&Float64Array> {
        self.raw
            .get(name)
            .ok_or_else(|| SurveyError::missing_column(name))
    }

    /// Raw codes of a column as [`Code`]s
    pub fn raw_codes(&self, name: &str) -> Result<impl Iterator<Item = Option<Code>> + '_> {
        Ok(self.raw_field(name)?.iter().map(|code| code.map(Code::new)))
    }

    /// Decoded values of a column; missing answers are `None`
    pub fn decoded_field(&self, name: &str) -> Result<&[Option<Value>]> {
        self.decoded
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SurveyError::missing_column(name))
    }

    /// Semantic kind of a present column
    pub fn field_kind(&self, name: &str) -> Result<&FieldKind> {
        if !self.has_field(name) {
            return Err(SurveyError::missing_column(name));
        }
        self.schema
            .field(name)
            .map(|spec| &spec.kind)
            .ok_or_else(|| SurveyError::missing_column(name))
    }

    /// A choice group of the schema
    pub fn choice_group(&self, name: &str) -> Result<&ChoiceGroup> {
        self.schema
            .choice_group(name)
            .ok_or_else(|| SurveyError::missing_column(name))
    }

    /// Number of respondents whose flag field equals `value`
    pub fn count_flag(&self, name: &str, value: bool) -> Result<usize> {
        if !self.field_kind(name)?.is_flag() {
            return Err(SurveyError::NotBoolean {
                field: name.to_string(),
            });
        }
        Ok(self
            .decoded_field(name)?
            .iter()
            .filter(|cell| cell.as_ref().and_then(Value::as_flag) == Some(value))
            .count())
    }

    /// Distinct non-missing codes of a column, ascending
    pub fn distinct_codes(&self, name: &str) -> Result<Vec<Code>> {
        Ok(self
            .raw_codes(name)?
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }
}
