use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use survey_engine::async_io::load_cohorts;
use survey_engine::reader::parquet::write_parquet;
use survey_engine::synthetic::{CohortSpec, generate_cohort};
use survey_engine::utils::logging::{
    create_spinner, finish_progress_bar, print_batch_summary, print_report_summary,
    print_table_summary,
};
use survey_engine::{
    CodeBook, MAX_DECIMALS, ReportDocument, ReportFacts, ResponseSource, SurveyConfig, SurveySchema,
    run_batch,
};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// JSON code book replacing the builtin tables
    #[arg(long, global = true)]
    codebook: Option<PathBuf>,
    /// Decimal places of reported shares
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_DECIMALS))
    )]
    precision: Option<u32>,
    /// Length of preference rankings
    #[arg(long, global = true)]
    top_k: Option<usize>,
    /// Lines above the header row of CSV exports
    #[arg(long, global = true)]
    metadata_rows: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the report facts of one school
    Report {
        /// Survey export with every school (parquet file, parquet directory or CSV)
        input: PathBuf,
        /// School to report on
        #[arg(long)]
        school: i64,
        /// Separate export holding only the school's respondents
        #[arg(long)]
        school_input: Option<PathBuf>,
        /// Display name of the school
        #[arg(long)]
        school_name: Option<String>,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute report facts for many schools in parallel
    Batch {
        /// Survey export with every school
        input: PathBuf,
        /// Schools to report on; defaults to every school in the export
        #[arg(long, value_delimiter = ',')]
        schools: Vec<i64>,
        /// Directory receiving one JSON file per school
        #[arg(short, long)]
        output_dir: PathBuf,
    },
    /// Write a synthetic cohort as parquet
    Generate {
        output: PathBuf,
        #[arg(long, default_value_t = 3)]
        schools: i64,
        #[arg(long, default_value_t = 100)]
        respondents: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0.05)]
        missing_rate: f64,
        /// Emit male/female pairs with identical answers
        #[arg(long)]
        symmetric: bool,
    },
}

impl Cli {
    fn survey_config(&self) -> Result<SurveyConfig> {
        let mut config = match &self.config {
            Some(path) => SurveyConfig::from_path(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => SurveyConfig::default(),
        };
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if let Some(metadata_rows) = self.metadata_rows {
            config.metadata_rows = metadata_rows;
        }
        Ok(config)
    }

    fn codebook(&self) -> Result<CodeBook> {
        match &self.codebook {
            Some(path) => CodeBook::from_path(path)
                .with_context(|| format!("Failed to load code book {}", path.display())),
            None => Ok(CodeBook::builtin()),
        }
    }
}

fn write_json(value: &impl Serialize, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.survey_config()?;
    let codebook = cli.codebook()?;
    let schema = SurveySchema::standard();
    info!("{config}");

    match cli.command {
        Command::Report {
            input,
            school,
            school_input,
            school_name,
            output,
        } => {
            let start = Instant::now();
            let config = config.for_school(school);
            let codebook = Arc::new(codebook);
            let spinner = create_spinner(Some("Loading survey data"));
            let (school_table, general_table) = load_cohorts(
                ResponseSource::from_path(&input),
                school_input.as_deref().map(ResponseSource::from_path),
                Arc::new(schema),
                Arc::clone(&codebook),
                &config,
            )
            .await
            .with_context(|| format!("Failed to load survey data for school {school}"))?;
            finish_progress_bar(&spinner, Some("Survey data loaded"));
            print_table_summary(&school_table);

            let facts = ReportFacts::build(&school_table, &general_table, &codebook, &config);
            print_report_summary(&facts);
            write_json(
                &ReportDocument::new(&facts, school_name.as_deref()),
                output.as_deref(),
            )?;
            info!("Report for school {school} completed in {:?}", start.elapsed());
        }
        Command::Batch {
            input,
            schools,
            output_dir,
        } => {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
            let reports = tokio::task::spawn_blocking(move || {
                let batch = ResponseSource::from_path(&input).read(&config.all_schools())?;
                let schools = (!schools.is_empty()).then_some(schools.as_slice());
                run_batch(&batch, &schema, &codebook, &config, schools)
            })
            .await
            .context("Batch worker failed")?
            .context("Failed to build school reports")?;

            print_batch_summary(&reports);
            for report in &reports {
                if let Ok(facts) = &report.facts {
                    let path = output_dir.join(format!("school_{}.json", report.school_id));
                    write_json(&ReportDocument::new(facts, None), Some(&path))?;
                }
            }
        }
        Command::Generate {
            output,
            schools,
            respondents,
            seed,
            missing_rate,
            symmetric,
        } => {
            let spec = CohortSpec {
                schools: (1..=schools).collect(),
                respondents_per_school: respondents,
                seed,
                missing_rate,
                symmetric,
            };
            let batch = generate_cohort(&spec, &codebook).context("Failed to generate cohort")?;
            write_parquet(&output, &batch)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "Generated {} respondents across {} schools",
                batch.num_rows(),
                schools
            );
        }
    }
    Ok(())
}
