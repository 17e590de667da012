//! Long-form reshaping of ranked-choice columns

use smallvec::SmallVec;

use crate::error::{Result, SurveyError};
use crate::schema::{Value, names};
use crate::table::ResponseTable;

/// Covariates carried along by [`combine_group`] in the standard report
pub const DEFAULT_COVARIATES: [&str; 3] = [
    names::GENDER,
    names::GBA_UNDERSTANDING,
    names::STEM_PARTICIPATION,
];

/// One non-missing answer of one respondent
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    /// Respondent id
    pub respondent: i64,
    /// Position of the source column in the combined columns
    pub order: usize,
    /// Decoded answer
    pub value: Value,
    /// Covariate values in the order of [`LongTable::covariates`]
    pub covariates: SmallVec<[Option<Value>; 4]>,
}

/// Answers of several parallel columns stacked into one field
///
/// A respondent appears once per answered column. The table keeps the
/// respondent count of its source so shares stay relative to respondents,
/// not to answers.
#[derive(Debug, Clone)]
pub struct LongTable {
    field: String,
    covariates: Vec<String>,
    source_columns: Vec<String>,
    respondent_count: usize,
    rows: Vec<LongRow>,
}

/// A column of a long table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LongColumn {
    Value,
    Covariate(usize),
}

impl LongTable {
    /// Name of the combined field
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Names of the carried covariates
    #[must_use]
    pub fn covariates(&self) -> &[String] {
        &self.covariates
    }

    /// Columns the answers were taken from, in order
    #[must_use]
    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    /// Respondent count of the source table
    #[must_use]
    pub const fn respondent_count(&self) -> usize {
        self.respondent_count
    }

    #[must_use]
    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn column(&self, name: &str) -> Result<LongColumn> {
        if name == self.field {
            return Ok(LongColumn::Value);
        }
        self.covariates
            .iter()
            .position(|covariate| covariate == name)
            .map(LongColumn::Covariate)
            .ok_or_else(|| SurveyError::missing_column(name))
    }

    pub(crate) fn cell(row: &LongRow, column: LongColumn) -> Option<&Value> {
        match column {
            LongColumn::Value => Some(&row.value),
            LongColumn::Covariate(idx) => row.covariates.get(idx).and_then(Option::as_ref),
        }
    }
}

/// Stack `columns` of `table` into a long table named `field_name`
///
/// Missing answers are dropped. Repeated answers of the same respondent are
/// kept as separate rows.
pub fn combine(
    table: &ResponseTable,
    columns: &[&str],
    field_name: &str,
    covariates: &[&str],
) -> Result<LongTable> {
    let sources = columns
        .iter()
        .map(|column| table.decoded_field(column))
        .collect::<Result<Vec<_>>>()?;
    let carried = covariates
        .iter()
        .map(|covariate| table.decoded_field(covariate))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for (order, values) in sources.iter().enumerate() {
        for (row, value) in values.iter().enumerate() {
            let Some(value) = value else { continue };
            rows.push(LongRow {
                respondent: table.ids()[row],
                order,
                value: value.clone(),
                covariates: carried.iter().map(|column| column[row].clone()).collect(),
            });
        }
    }

    Ok(LongTable {
        field: field_name.to_string(),
        covariates: covariates.iter().map(|name| (*name).to_string()).collect(),
        source_columns: columns.iter().map(|name| (*name).to_string()).collect(),
        respondent_count: table.size(),
        rows,
    })
}

/// Stack the columns of a named choice group
pub fn combine_group(
    table: &ResponseTable,
    group_name: &str,
    covariates: &[&str],
) -> Result<LongTable> {
    let group = table.choice_group(group_name)?;
    combine(table, &group.column_names(), &group.name, covariates)
}
