//! Concurrent construction of response tables

use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use futures::stream::{self, StreamExt, TryStreamExt};

use super::file_ops::read_parquet_async;
use crate::codebook::CodeBook;
use crate::config::SurveyConfig;
use crate::error::{Result, SurveyError};
use crate::reader::ResponseSource;
use crate::schema::SurveySchema;
use crate::table::ResponseTable;

/// Read a source into one record batch without blocking the runtime
///
/// # Errors
/// Returns an error if the source cannot be read
pub async fn read_source_async(source: ResponseSource, config: &SurveyConfig) -> Result<RecordBatch> {
    match source {
        ResponseSource::Parquet(path) => {
            let (schema, batches) = read_parquet_async(&path, None).await?;
            Ok(concat_batches(&schema, &batches)?)
        }
        other => {
            let config = config.clone();
            tokio::task::spawn_blocking(move || other.read(&config)).await?
        }
    }
}

async fn load_table(
    source: ResponseSource,
    schema: Arc<SurveySchema>,
    codebook: Arc<CodeBook>,
    config: SurveyConfig,
) -> Result<ResponseTable> {
    let batch = read_source_async(source, &config).await?;
    tokio::task::spawn_blocking(move || {
        ResponseTable::from_batch(&batch, &schema, &codebook, &config)
    })
    .await?
}

/// Load the school cohort and the comparison cohort concurrently
///
/// Without a separate `school` source the school cohort is `general`
/// filtered by `config.school_id`. A separate school source is loaded
/// unfiltered.
///
/// # Errors
/// Returns the first error of either load
pub async fn load_cohorts(
    general: ResponseSource,
    school: Option<ResponseSource>,
    schema: Arc<SurveySchema>,
    codebook: Arc<CodeBook>,
    config: &SurveyConfig,
) -> Result<(ResponseTable, ResponseTable)> {
    let (school_source, school_config) = match school {
        Some(source) => (source, config.all_schools()),
        None => (general.clone(), config.clone()),
    };

    let school = load_table(
        school_source,
        Arc::clone(&schema),
        Arc::clone(&codebook),
        school_config,
    );
    let general = load_table(general, schema, codebook, config.all_schools());

    let (school, general) = tokio::try_join!(school, general)?;
    log::info!(
        "Loaded {} school respondents and {} comparison respondents",
        school.size(),
        general.size()
    );
    Ok((school, general))
}

/// Load many sources, at most one per CPU at a time, keeping input order
///
/// # Errors
/// Returns the first load error
pub async fn load_tables(
    sources: Vec<ResponseSource>,
    schema: Arc<SurveySchema>,
    codebook: Arc<CodeBook>,
    config: &SurveyConfig,
) -> Result<Vec<ResponseTable>> {
    if sources.is_empty() {
        return Err(SurveyError::EmptyCohort {
            school_id: config.school_id,
        });
    }

    stream::iter(sources)
        .map(|source| load_table(source, Arc::clone(&schema), Arc::clone(&codebook), config.clone()))
        .buffered(num_cpus::get())
        .try_collect()
        .await
}
