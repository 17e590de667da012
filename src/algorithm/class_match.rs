//! Category membership of ranked choices, split by a boolean group

use serde::Serialize;

use super::{Rounding, percentage};
use crate::codebook::CodeBook;
use crate::error::{Result, SurveyError};
use crate::schema::{ChoiceGroup, Value};
use crate::table::ResponseTable;

/// Share of matching respondents in each boolean group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchRates {
    pub group_true: f64,
    pub group_false: f64,
}

impl MatchRates {
    /// `group_true - group_false`
    #[must_use]
    pub fn difference(&self) -> f64 {
        self.group_true - self.group_false
    }

    #[must_use]
    pub const fn as_pair(&self) -> (f64, f64) {
        (self.group_true, self.group_false)
    }
}

/// Percentage of respondents with any choice in `target_category`, per value of
/// the flag `group_field`
///
/// Codes without a category never match. Respondents with no answer for
/// `group_field` are left out of both groups rather than counted as true, so
/// rates differ from reports that treated a missing flag as true.
///
/// # Errors
/// * [`SurveyError::LookupMiss`] if the domain does not define the category
/// * [`SurveyError::NotBoolean`] if `group_field` is not a flag
/// * [`SurveyError::GroupValueMissing`] if a group has no respondents
pub fn class_match(
    table: &ResponseTable,
    codebook: &CodeBook,
    group: &ChoiceGroup,
    target_category: &str,
    group_field: &str,
    rounding: Rounding,
) -> Result<MatchRates> {
    if !codebook.has_category(group.domain, target_category) {
        return Err(SurveyError::LookupMiss {
            domain: group.domain,
            key: target_category.to_string(),
        });
    }
    if !table.field_kind(group_field)?.is_flag() {
        return Err(SurveyError::NotBoolean {
            field: group_field.to_string(),
        });
    }

    let mut matched = vec![false; table.size()];
    for column in &group.columns {
        for (row, code) in table.raw_codes(column)?.enumerate() {
            matched[row] |= code
                .and_then(|code| codebook.category_of(group.domain, code))
                .is_some_and(|category| category == target_category);
        }
    }

    // [false, true] indexed by the flag value
    let mut totals = [0_usize; 2];
    let mut hits = [0_usize; 2];
    let flags = table.decoded_field(group_field)?;
    for (flag, is_match) in flags.iter().zip(&matched) {
        let Some(flag) = flag.as_ref().and_then(Value::as_flag) else {
            continue;
        };
        totals[usize::from(flag)] += 1;
        hits[usize::from(flag)] += usize::from(*is_match);
    }

    let rate = |value: bool| {
        let idx = usize::from(value);
        if totals[idx] == 0 {
            return Err(SurveyError::GroupValueMissing {
                field: group_field.to_string(),
                value,
            });
        }
        Ok(rounding.apply(percentage(hits[idx], totals[idx])))
    };

    Ok(MatchRates {
        group_true: rate(true)?,
        group_false: rate(false)?,
    })
}
