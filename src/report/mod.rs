//! Report facts for one school
//!
//! Runs the aggregation engine over the standard questionnaire and collects
//! the plain numbers a report template consumes. Nothing here formats text
//! or renders charts. A section that cannot be computed is logged and left
//! `None`; the remaining sections are still produced.

pub mod batch;

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::algorithm::{
    DEFAULT_COVARIATES, MatchRates, Rounding, TopKResult, class_match, combine_group, percent_of,
    rank,
};
use crate::codebook::CodeBook;
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::schema::survey::{
    ENDURANCE_LEVELS, MAJOR_FACTOR_SUFFIX, MAJOR_FACTORS, OCCUPATION_FACTOR_SUFFIX,
    OCCUPATION_FACTORS, RELIEF_METHODS, STEM_SKILLS, STRESS_LEVELS, STRESS_SOURCE_LABELS,
    STRESS_SOURCES,
};
use crate::schema::{Value, names};
use crate::table::ResponseTable;
use crate::utils::logging::log_section_failed;

/// Categories compared between STEM participants and non-participants
pub const STEM_CATEGORIES: [&str; 2] = ["Engineering", "Science"];

/// Major categories compared by Greater Bay Area understanding
pub const GBA_MAJOR_CATEGORIES: [&str; 2] = ["Business", "Science"];

/// Occupation categories compared by Greater Bay Area understanding
pub const GBA_OCCUPATION_CATEGORIES: [&str; 3] = ["Business", "Engineering", "Science"];

/// A pair of group rates with their difference
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub group_true: f64,
    pub group_false: f64,
    pub difference: f64,
}

impl From<MatchRates> for Comparison {
    fn from(rates: MatchRates) -> Self {
        Self {
            group_true: rates.group_true,
            group_false: rates.group_false,
            difference: rates.difference(),
        }
    }
}

/// Preferred and disliked choices of one domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceFacts {
    /// Ranking of preferred choices, overall and by gender
    pub preferred: TopKResult,
    /// Ranking of disliked choices, overall and by gender
    pub disliked: TopKResult,
    /// Share rating each factor important; `None` when the factor was not asked
    pub factors: BTreeMap<String, Option<f64>>,
}

/// Self-rated gain of one skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillGain {
    pub strong: f64,
    pub partial: f64,
}

/// STEM-related category preferences of participants versus non-participants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StemPreference {
    pub engineering: Comparison,
    pub science: Comparison,
    /// Engineering plus science
    pub total: Comparison,
}

impl StemPreference {
    fn new(engineering: MatchRates, science: MatchRates, rounding: Rounding) -> Self {
        let total = MatchRates {
            group_true: rounding.apply(engineering.group_true + science.group_true),
            group_false: rounding.apply(engineering.group_false + science.group_false),
        };
        Self {
            engineering: engineering.into(),
            science: science.into(),
            total: total.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StemFacts {
    pub skills: BTreeMap<String, Option<SkillGain>>,
    pub participants: usize,
    pub non_participants: usize,
    pub majors: StemPreference,
    pub occupations: StemPreference,
}

/// Category preferences by understanding of the Greater Bay Area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GbaFacts {
    pub majors: BTreeMap<String, Comparison>,
    pub occupations: BTreeMap<String, Comparison>,
}

/// The same shares for the school and for the comparison cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortShares {
    pub school: BTreeMap<String, Option<f64>>,
    pub general: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressFacts {
    /// Personal versus external
    pub source: CohortShares,
    /// Share selecting each stress source
    pub sources: CohortShares,
    pub levels: CohortShares,
    pub endurance: CohortShares,
    /// Share selecting each relief method
    pub methods: CohortShares,
}

/// Every aggregate of one school report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportFacts {
    pub school_id: Option<i64>,
    pub respondents: usize,
    pub general_respondents: usize,
    pub majors: Option<PreferenceFacts>,
    pub occupations: Option<PreferenceFacts>,
    pub stem: Option<StemFacts>,
    pub gba: Option<GbaFacts>,
    pub stress: Option<StressFacts>,
}

impl ReportFacts {
    /// Compute the facts of `school`, comparing stress answers against `general`
    #[must_use]
    pub fn build(
        school: &ResponseTable,
        general: &ResponseTable,
        codebook: &CodeBook,
        config: &SurveyConfig,
    ) -> Self {
        let school_id = school.school_id();
        match school_id {
            Some(id) => log::info!("Starting report facts for school {id}"),
            None => log::info!("Starting report facts for all schools"),
        }

        Self {
            school_id,
            respondents: school.size(),
            general_respondents: general.size(),
            majors: section("major preferences", school_id, || {
                preferences(
                    school,
                    names::TARGET_MAJOR,
                    names::DISLIKE_MAJOR,
                    &MAJOR_FACTORS,
                    MAJOR_FACTOR_SUFFIX,
                    config,
                )
            }),
            occupations: section("occupation preferences", school_id, || {
                preferences(
                    school,
                    names::TARGET_OCCUPATION,
                    names::DISLIKE_OCCUPATION,
                    &OCCUPATION_FACTORS,
                    OCCUPATION_FACTOR_SUFFIX,
                    config,
                )
            }),
            stem: section("STEM analysis", school_id, || {
                stem(school, codebook, config.rounding())
            }),
            gba: section("GBA analysis", school_id, || {
                gba(school, codebook, config.rounding())
            }),
            stress: section("stress analysis", school_id, || {
                stress(school, general, config.rounding())
            }),
        }
    }
}

/// Report facts with the context a report template prints around them
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub year: i32,
    pub school_name: Option<&'a str>,
    pub facts: &'a ReportFacts,
}

impl<'a> ReportDocument<'a> {
    /// Wrap facts, stamped with the current time
    #[must_use]
    pub fn new(facts: &'a ReportFacts, school_name: Option<&'a str>) -> Self {
        let generated_at = Utc::now();
        Self {
            generated_at,
            year: generated_at.year(),
            school_name,
            facts,
        }
    }
}

fn section<T>(name: &str, school_id: Option<i64>, compute: impl FnOnce() -> Result<T>) -> Option<T> {
    log::info!("Processing {name}...");
    compute()
        .inspect_err(|error| log_section_failed(name, school_id, error))
        .ok()
}

fn preferences(
    table: &ResponseTable,
    preferred: &str,
    disliked: &str,
    factors: &[&str],
    suffix: &str,
    config: &SurveyConfig,
) -> Result<PreferenceFacts> {
    let rounding = config.rounding();
    let ranking = |group: &str| {
        let long = combine_group(table, group, &DEFAULT_COVARIATES)?;
        rank(&long, names::GENDER, config.top_k)
    };

    let factors = factors
        .iter()
        .map(|factor| {
            let column = format!("{factor}{suffix}");
            let important = optional_shares(
                table,
                &column,
                &[Value::code(1), Value::code(2)],
                false,
                rounding,
            )?
            .map(|shares| rounding.apply(shares.values().sum()));
            Ok(((*factor).to_string(), important))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(PreferenceFacts {
        preferred: ranking(preferred)?,
        disliked: ranking(disliked)?,
        factors,
    })
}

fn stem(table: &ResponseTable, codebook: &CodeBook, rounding: Rounding) -> Result<StemFacts> {
    let strong = Value::code(1);
    let partial = Value::code(2);
    let skills = STEM_SKILLS
        .iter()
        .map(|skill| {
            let gain = optional_shares(table, skill, &[strong.clone(), partial.clone()], true, rounding)?
                .map(|shares| SkillGain {
                    strong: share_of(&shares, &strong),
                    partial: share_of(&shares, &partial),
                });
            Ok(((*skill).to_string(), gain))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    let preference = |group: &str| -> Result<StemPreference> {
        let choices = table.choice_group(group)?;
        let [engineering, science] = STEM_CATEGORIES.map(|category| {
            class_match(
                table,
                codebook,
                choices,
                category,
                names::STEM_PARTICIPATION,
                rounding,
            )
        });
        Ok(StemPreference::new(engineering?, science?, rounding))
    };

    Ok(StemFacts {
        skills,
        participants: table.count_flag(names::STEM_PARTICIPATION, true)?,
        non_participants: table.count_flag(names::STEM_PARTICIPATION, false)?,
        majors: preference(names::TARGET_MAJOR)?,
        occupations: preference(names::TARGET_OCCUPATION)?,
    })
}

fn gba(table: &ResponseTable, codebook: &CodeBook, rounding: Rounding) -> Result<GbaFacts> {
    let compare = |group: &str, categories: &[&str]| -> Result<BTreeMap<String, Comparison>> {
        let choices = table.choice_group(group)?;
        categories
            .iter()
            .map(|category| {
                let rates = class_match(
                    table,
                    codebook,
                    choices,
                    category,
                    names::GBA_UNDERSTANDING,
                    rounding,
                )?;
                Ok(((*category).to_string(), rates.into()))
            })
            .collect()
    };

    Ok(GbaFacts {
        majors: compare(names::TARGET_MAJOR, &GBA_MAJOR_CATEGORIES)?,
        occupations: compare(names::TARGET_OCCUPATION, &GBA_OCCUPATION_CATEGORIES)?,
    })
}

fn stress(school: &ResponseTable, general: &ResponseTable, rounding: Rounding) -> Result<StressFacts> {
    Ok(StressFacts {
        source: cohort_shares(school, general, |table| {
            label_shares(table, names::STRESS_SOURCE, &STRESS_SOURCE_LABELS, true, rounding)
        })?,
        sources: cohort_shares(school, general, |table| {
            selected_shares(table, &STRESS_SOURCES, rounding)
        })?,
        levels: cohort_shares(school, general, |table| {
            label_shares(table, names::STRESS_LEVEL, &STRESS_LEVELS, false, rounding)
        })?,
        endurance: cohort_shares(school, general, |table| {
            label_shares(table, names::ENDURANCE_LEVEL, &ENDURANCE_LEVELS, false, rounding)
        })?,
        methods: cohort_shares(school, general, |table| {
            selected_shares(table, &RELIEF_METHODS, rounding)
        })?,
    })
}

fn cohort_shares(
    school: &ResponseTable,
    general: &ResponseTable,
    shares: impl Fn(&ResponseTable) -> Result<BTreeMap<String, Option<f64>>>,
) -> Result<CohortShares> {
    Ok(CohortShares {
        school: shares(school)?,
        general: shares(general)?,
    })
}

/// [`percent_of`], or `None` when the column is absent or unanswered
fn optional_shares(
    table: &ResponseTable,
    column: &str,
    targets: &[Value],
    drop_zero: bool,
    rounding: Rounding,
) -> Result<Option<BTreeMap<Value, f64>>> {
    if !table.has_field(column) {
        return Ok(None);
    }
    match percent_of(table, column, targets, drop_zero, rounding) {
        Ok(shares) => Ok(Some(shares)),
        Err(error) if error.is_zero_denominator() => Ok(None),
        Err(error) => Err(error),
    }
}

fn share_of(shares: &BTreeMap<Value, f64>, target: &Value) -> f64 {
    shares.get(target).copied().unwrap_or(0.0)
}

/// Share of each label of one ordinal field
fn label_shares(
    table: &ResponseTable,
    column: &str,
    labels: &[&str],
    drop_zero: bool,
    rounding: Rounding,
) -> Result<BTreeMap<String, Option<f64>>> {
    let targets = labels.iter().map(|label| Value::label(*label)).collect::<Vec<_>>();
    let shares = optional_shares(table, column, &targets, drop_zero, rounding)?;
    Ok(labels
        .iter()
        .zip(&targets)
        .map(|(label, target)| {
            let share = shares.as_ref().map(|shares| share_of(shares, target));
            ((*label).to_string(), share)
        })
        .collect())
}

/// Share answering code 1 in each multi-select column
fn selected_shares(
    table: &ResponseTable,
    columns: &[&str],
    rounding: Rounding,
) -> Result<BTreeMap<String, Option<f64>>> {
    let selected = Value::code(1);
    columns
        .iter()
        .map(|column| {
            let share = optional_shares(table, column, std::slice::from_ref(&selected), false, rounding)?
                .map(|shares| share_of(&shares, &selected));
            Ok(((*column).to_string(), share))
        })
        .collect()
}
