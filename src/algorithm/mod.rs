//! Aggregation primitives over decoded survey tables
//!
//! Every function here is a pure transform of an immutable table. None of
//! them performs I/O or logs; failures are returned to the caller.

pub mod class_match;
pub mod combine;
pub mod distribution;
pub mod percentage;
pub mod topk;

pub use class_match::{MatchRates, class_match};
pub use combine::{DEFAULT_COVARIATES, LongRow, LongTable, combine, combine_group};
pub use distribution::{
    Distribution, GroupedDistribution, Observation, Observations, distribution,
    grouped_distribution,
};
pub use percentage::percent_of;
pub use topk::{TopKResult, rank, top_k, top_k_grouped};

/// Most decimal places a share is rounded to
pub const MAX_DECIMALS: u32 = 15;

/// Decimal rounding applied to reported shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rounding {
    decimals: u32,
}

impl Rounding {
    /// Round to `decimals` places, at most [`MAX_DECIMALS`]
    #[must_use]
    pub const fn decimals(decimals: u32) -> Self {
        let decimals = if decimals > MAX_DECIMALS {
            MAX_DECIMALS
        } else {
            decimals
        };
        Self { decimals }
    }

    /// Decimal places
    #[must_use]
    pub const fn places(self) -> u32 {
        self.decimals
    }

    /// Round a share
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let factor = 10_f64.powi(i32::try_from(self.decimals).unwrap_or(0));
        (value * factor).round() / factor
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Self::decimals(1)
    }
}

/// `count / total` as a percentage
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}
