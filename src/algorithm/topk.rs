//! Top-K rankings of distributions

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::combine::LongTable;
use super::distribution::{Distribution, GroupedDistribution, raw_grouped_shares, raw_shares};
use crate::error::Result;
use crate::schema::Value;

/// Rankings over all respondents and per group value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopKResult {
    pub all: Vec<Value>,
    pub groups: BTreeMap<Value, Vec<Value>>,
}

impl TopKResult {
    /// Ranking of one group, if the group occurred
    #[must_use]
    pub fn group(&self, group: &Value) -> Option<&[Value]> {
        self.groups.get(group).map(Vec::as_slice)
    }
}

impl Serialize for TopKResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let groups = self
            .groups
            .iter()
            .map(|(group, ranking)| (group.to_string(), ranking))
            .collect::<BTreeMap<_, _>>();
        let mut state = serializer.serialize_struct("TopKResult", 2)?;
        state.serialize_field("all", &self.all)?;
        state.serialize_field("groups", &groups)?;
        state.end()
    }
}

/// The `k` values with the highest share
///
/// Equal shares are ordered by ascending value. Fewer than `k` values are
/// returned when the distribution is smaller.
#[must_use]
pub fn top_k(distribution: &Distribution, k: usize) -> Vec<Value> {
    distribution
        .iter()
        .sorted_by(|(a_value, a_share), (b_value, b_share)| {
            b_share.total_cmp(a_share).then_with(|| a_value.cmp(b_value))
        })
        .take(k)
        .map(|(value, _)| value.clone())
        .collect()
}

/// [`top_k`] for every group
#[must_use]
pub fn top_k_grouped(grouped: &GroupedDistribution, k: usize) -> BTreeMap<Value, Vec<Value>> {
    grouped
        .iter()
        .map(|(group, shares)| (group.clone(), top_k(shares, k)))
        .collect()
}

/// Rank the answers of a long table overall and within each `group_field` value
///
/// Rankings compare unrounded shares, so answers that only tie after
/// rounding keep their order by count.
pub fn rank(long: &LongTable, group_field: &str, k: usize) -> Result<TopKResult> {
    let all: Distribution = raw_shares(long, long.field())?.into_iter().collect();
    let groups = raw_grouped_shares(long, long.field(), group_field)?
        .into_iter()
        .map(|(group, shares)| {
            let shares: Distribution = shares.into_iter().collect();
            (group, top_k(&shares, k))
        })
        .collect();
    Ok(TopKResult {
        all: top_k(&all, k),
        groups,
    })
}
