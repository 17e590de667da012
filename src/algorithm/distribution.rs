//! Normalized frequency distributions and cross-tabulations
//!
//! Shares are percentages. An ungrouped share divides by the number of
//! respondents of the table, so with multi-answer fields the shares may sum
//! to more than 100. A grouped share divides by the number of distinct
//! respondents in the group among rows where both the field and the group
//! are answered.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::combine::LongTable;
use super::{Rounding, percentage};
use crate::error::Result;
use crate::schema::Value;
use crate::table::ResponseTable;

/// One answered cell, optionally paired with its group value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    pub respondent: i64,
    pub value: &'a Value,
    pub group: Option<&'a Value>,
}

/// Tables that can feed a distribution
pub trait Observations {
    /// Respondents ungrouped shares are relative to
    fn respondent_total(&self) -> usize;

    /// Every non-missing value of `field`, with the `group` value of the same row
    fn observations<'a>(&'a self, field: &str, group: Option<&str>)
    -> Result<Vec<Observation<'a>>>;
}

impl Observations for ResponseTable {
    fn respondent_total(&self) -> usize {
        self.size()
    }

    fn observations<'a>(
        &'a self,
        field: &str,
        group: Option<&str>,
    ) -> Result<Vec<Observation<'a>>> {
        let values = self.decoded_field(field)?;
        let groups = group.map(|group| self.decoded_field(group)).transpose()?;

        Ok(values
            .iter()
            .enumerate()
            .filter_map(|(row, value)| {
                value.as_ref().map(|value| Observation {
                    respondent: self.ids()[row],
                    value,
                    group: groups.and_then(|groups| groups[row].as_ref()),
                })
            })
            .collect())
    }
}

impl Observations for LongTable {
    fn respondent_total(&self) -> usize {
        self.respondent_count()
    }

    fn observations<'a>(
        &'a self,
        field: &str,
        group: Option<&str>,
    ) -> Result<Vec<Observation<'a>>> {
        let value_column = self.column(field)?;
        let group_column = group.map(|group| self.column(group)).transpose()?;

        Ok(self
            .rows()
            .iter()
            .filter_map(|row| {
                Self::cell(row, value_column).map(|value| Observation {
                    respondent: row.respondent,
                    value,
                    group: group_column.and_then(|column| Self::cell(row, column)),
                })
            })
            .collect())
    }
}

/// Share per distinct value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    shares: BTreeMap<Value, f64>,
}

impl Distribution {
    /// Share of `value`, if it occurred
    #[must_use]
    pub fn get(&self, value: &Value) -> Option<f64> {
        self.shares.get(value).copied()
    }

    /// Share of `value`, or 0 when it never occurred
    #[must_use]
    pub fn share(&self, value: &Value) -> f64 {
        self.get(value).unwrap_or(0.0)
    }

    /// Entries in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, f64)> {
        self.shares.iter().map(|(value, share)| (value, *share))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sum of all shares
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.shares.values().sum()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<Value, f64> {
        self.shares
    }
}

impl FromIterator<(Value, f64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (Value, f64)>>(iter: I) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct ShareEntry<'a> {
    value: &'a Value,
    share: f64,
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.shares.len()))?;
        for (value, share) in self.iter() {
            seq.serialize_element(&ShareEntry { value, share })?;
        }
        seq.end()
    }
}

/// One distribution per group value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedDistribution {
    groups: BTreeMap<Value, Distribution>,
}

impl GroupedDistribution {
    /// Distribution of one group value
    #[must_use]
    pub fn group(&self, group: &Value) -> Option<&Distribution> {
        self.groups.get(group)
    }

    /// Groups in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Distribution)> {
        self.groups.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(serde::Serialize)]
struct GroupEntry<'a> {
    group: &'a Value,
    shares: &'a Distribution,
}

impl Serialize for GroupedDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.groups.len()))?;
        for (group, shares) in &self.groups {
            seq.serialize_element(&GroupEntry { group, shares })?;
        }
        seq.end()
    }
}

/// Unrounded shares of every value of `field`
pub(crate) fn raw_shares<T: Observations + ?Sized>(
    table: &T,
    field: &str,
) -> Result<BTreeMap<Value, f64>> {
    let total = table.respondent_total();
    let mut counts: FxHashMap<&Value, usize> = FxHashMap::default();
    let observations = table.observations(field, None)?;
    for observation in &observations {
        *counts.entry(observation.value).or_default() += 1;
    }

    if total == 0 {
        return Ok(BTreeMap::new());
    }
    Ok(counts
        .into_iter()
        .map(|(value, count)| (value.clone(), percentage(count, total)))
        .collect())
}

/// Share of each value of `field` among all respondents
pub fn distribution<T: Observations + ?Sized>(
    table: &T,
    field: &str,
    rounding: Rounding,
) -> Result<Distribution> {
    Ok(raw_shares(table, field)?
        .into_iter()
        .map(|(value, share)| (value, rounding.apply(share)))
        .collect())
}

/// Unrounded shares of every value of `field` per value of `group_field`
pub(crate) fn raw_grouped_shares<T: Observations + ?Sized>(
    table: &T,
    field: &str,
    group_field: &str,
) -> Result<BTreeMap<Value, BTreeMap<Value, f64>>> {
    let observations = table.observations(field, Some(group_field))?;

    let mut counts: FxHashMap<(&Value, &Value), usize> = FxHashMap::default();
    let mut members: FxHashMap<&Value, FxHashSet<i64>> = FxHashMap::default();
    for observation in &observations {
        let Some(group) = observation.group else {
            continue;
        };
        *counts.entry((group, observation.value)).or_default() += 1;
        members.entry(group).or_default().insert(observation.respondent);
    }

    let mut groups: BTreeMap<Value, BTreeMap<Value, f64>> = BTreeMap::new();
    for ((group, value), count) in counts {
        let size = members.get(group).map_or(0, FxHashSet::len);
        groups
            .entry(group.clone())
            .or_default()
            .insert(value.clone(), percentage(count, size));
    }
    Ok(groups)
}

/// Share of each value of `field` within each value of `group_field`
///
/// Only cells that occur are listed; a value never seen in a group is absent
/// from that group's distribution.
pub fn grouped_distribution<T: Observations + ?Sized>(
    table: &T,
    field: &str,
    group_field: &str,
    rounding: Rounding,
) -> Result<GroupedDistribution> {
    Ok(GroupedDistribution {
        groups: raw_grouped_shares(table, field, group_field)?
            .into_iter()
            .map(|(group, shares)| {
                let shares: Distribution = shares
                    .into_iter()
                    .map(|(value, share)| (value, rounding.apply(share)))
                    .collect();
                (group, shares)
            })
            .collect(),
    })
}
