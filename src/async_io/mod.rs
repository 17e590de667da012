//! Async loading of survey cohorts
//!
//! Parquet files are streamed with the async parquet reader; other sources
//! and table construction run on tokio's blocking pool.

pub mod file_ops;
pub mod loader;

pub use file_ops::{find_parquet_files_async, read_parquet_async};
pub use loader::{load_cohorts, load_tables, read_source_async};
