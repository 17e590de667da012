//! Aggregation engine for coded student survey responses.
//!
//! Loads survey exports into decoded response tables and computes
//! normalized distributions, top-K rankings, percentage queries and
//! category membership comparisons, plus the per-school report facts built
//! from them.

pub mod algorithm;
pub mod async_io;
pub mod codebook;
pub mod config;
pub mod error;
pub mod reader;
pub mod report;
pub mod schema;
pub mod synthetic;
pub mod table;
pub mod utils;

// Core types
pub use codebook::{CodeBook, Domain, Label};
pub use config::{NO_ANSWER_SENTINEL, SurveyConfig};
pub use error::{Result, SurveyError};
pub use reader::ResponseSource;
pub use schema::{ChoiceGroup, Code, FieldKind, FieldSpec, SurveySchema, Value, ZERO_CODE};
pub use table::ResponseTable;

// Aggregation
pub use algorithm::{
    Distribution, GroupedDistribution, LongTable, MAX_DECIMALS, MatchRates, Rounding, TopKResult,
    class_match, combine, combine_group, distribution, grouped_distribution, percent_of, rank,
    top_k, top_k_grouped,
};

// Reports
pub use report::{ReportDocument, ReportFacts};
pub use report::batch::{SchoolReport, run_batch};

// Arrow types
pub use arrow::record_batch::RecordBatch;
