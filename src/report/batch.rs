//! Reports for many schools at once
//!
//! Every school gets its own response table, built and analyzed on a rayon
//! worker. The comparison cohort and the code book are shared read-only.

use std::time::Instant;

use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use super::ReportFacts;
use crate::codebook::CodeBook;
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::schema::SurveySchema;
use crate::table::ResponseTable;
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Outcome of one school
#[derive(Debug)]
pub struct SchoolReport {
    pub school_id: i64,
    pub facts: Result<ReportFacts>,
}

/// Distinct school ids of a table, ascending
pub fn school_ids(table: &ResponseTable) -> Result<Vec<i64>> {
    Ok(table
        .distinct_codes(table.schema().school_field())?
        .into_iter()
        .filter_map(|code| code.as_int())
        .collect())
}

/// Build one report per school of `batch`
///
/// With `schools` unset every school found in the data is reported. A school
/// whose table cannot be built gets an error entry; other schools are
/// unaffected.
///
/// # Errors
/// Fails only if the comparison cohort itself cannot be built
pub fn run_batch(
    batch: &RecordBatch,
    schema: &SurveySchema,
    codebook: &CodeBook,
    config: &SurveyConfig,
    schools: Option<&[i64]>,
) -> Result<Vec<SchoolReport>> {
    let start = Instant::now();
    let general = ResponseTable::from_batch(batch, schema, codebook, &config.all_schools())?;
    let schools = match schools {
        Some(schools) => schools.to_vec(),
        None => school_ids(&general)?,
    };
    log::info!("Building reports for {} schools", schools.len());

    let pb = create_main_progress_bar(schools.len() as u64, Some("Building school reports"));
    let reports = schools
        .par_iter()
        .map(|&school_id| {
            let facts = ResponseTable::from_batch(batch, schema, codebook, &config.for_school(school_id))
                .map(|school| ReportFacts::build(&school, &general, codebook, config));
            if let Err(error) = &facts {
                log::warn!("Skipping school {school_id}: {error}");
            }
            pb.inc(1);
            SchoolReport { school_id, facts }
        })
        .collect::<Vec<_>>();
    finish_progress_bar(&pb, Some("School reports complete"));

    log::info!(
        "Built {} of {} school reports in {:?}",
        reports.iter().filter(|report| report.facts.is_ok()).count(),
        reports.len(),
        start.elapsed()
    );
    Ok(reports)
}
