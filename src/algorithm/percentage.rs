//! Shares of specific answers within one field

use std::collections::BTreeMap;

use super::Rounding;
use super::distribution::{Observations, raw_shares};
use crate::error::{Result, SurveyError};
use crate::schema::{Value, ZERO_CODE};

/// Share of each target among the answers of `field`
///
/// Shares are renormalized to sum to 100 over the answered values, after
/// removing the zero code when `drop_zero` is set. A target that never
/// occurred reports 0.0.
///
/// # Errors
/// [`SurveyError::NoResponses`] when no answers remain to renormalize.
pub fn percent_of<T: Observations + ?Sized>(
    table: &T,
    field: &str,
    targets: &[Value],
    drop_zero: bool,
    rounding: Rounding,
) -> Result<BTreeMap<Value, f64>> {
    let zero = Value::Code(ZERO_CODE);
    let mut shares = raw_shares(table, field)?;
    if drop_zero {
        shares.remove(&zero);
    }

    let total: f64 = shares.values().sum();
    if total <= 0.0 {
        return Err(SurveyError::NoResponses {
            field: field.to_string(),
        });
    }

    Ok(targets
        .iter()
        .map(|target| {
            let share = shares
                .get(target)
                .map_or(0.0, |share| rounding.apply(share / total * 100.0));
            (target.clone(), share)
        })
        .collect())
}
