//! Seeded synthetic cohorts in the standard questionnaire layout
//!
//! Answers are raw codes as they appear in exported sheets, including the
//! no-answer sentinel, so generated cohorts go through the same
//! normalization as real ones.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array};
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::codebook::{CodeBook, Domain};
use crate::config::NO_ANSWER_SENTINEL;
use crate::error::Result;
use crate::schema::survey::{
    CHOICES_PER_GROUP, ENDURANCE_LEVELS, MAJOR_FACTOR_SUFFIX, MAJOR_FACTORS,
    OCCUPATION_FACTOR_SUFFIX, OCCUPATION_FACTORS, RELIEF_METHODS, STEM_SKILLS, STRESS_LEVELS,
    STRESS_SOURCES,
};

/// Parameters of a synthetic cohort
#[derive(Debug, Clone, PartialEq)]
pub struct CohortSpec {
    /// School ids, respondents are spread evenly across them
    pub schools: Vec<i64>,
    pub respondents_per_school: usize,
    pub seed: u64,
    /// Probability that a single answer is the no-answer sentinel
    pub missing_rate: f64,
    /// Emit respondents in male/female pairs with identical answers
    pub symmetric: bool,
}

impl Default for CohortSpec {
    fn default() -> Self {
        Self {
            schools: vec![1, 2, 3],
            respondents_per_school: 100,
            seed: 42,
            missing_rate: 0.05,
            symmetric: false,
        }
    }
}

/// Core questionnaire answers of one respondent
#[derive(Debug, Clone, Serialize)]
struct Respondent {
    id: i64,
    school_id: i64,
    gender: i64,
    gba_understanding: Option<i64>,
    stem_participation: Option<i64>,
    stress_source: Option<i64>,
    stress_lv: Option<i64>,
    endure_lv: Option<i64>,
    target_major1: Option<i64>,
    target_major2: Option<i64>,
    target_major3: Option<i64>,
    dislike_major1: Option<i64>,
    dislike_major2: Option<i64>,
    dislike_major3: Option<i64>,
    target_occupation1: Option<i64>,
    target_occupation2: Option<i64>,
    target_occupation3: Option<i64>,
    dislike_occupation1: Option<i64>,
    dislike_occupation2: Option<i64>,
    dislike_occupation3: Option<i64>,
}

struct Generator {
    rng: StdRng,
    missing_rate: f64,
    majors: i64,
    occupations: i64,
}

impl Generator {
    #[allow(clippy::cast_possible_truncation)]
    fn answer(&mut self, low: i64, high: i64) -> Option<i64> {
        if self.rng.random_bool(self.missing_rate) {
            Some(NO_ANSWER_SENTINEL as i64)
        } else {
            Some(self.rng.random_range(low..=high))
        }
    }

    fn choices(&mut self, count: i64) -> [Option<i64>; CHOICES_PER_GROUP] {
        [(); CHOICES_PER_GROUP].map(|()| {
            if self.rng.random_bool(0.2) {
                None
            } else {
                self.answer(1, count)
            }
        })
    }

    fn respondent(&mut self, school_id: i64) -> Respondent {
        let [target_major1, target_major2, target_major3] = self.choices(self.majors);
        let [dislike_major1, dislike_major2, dislike_major3] = self.choices(self.majors);
        let [target_occupation1, target_occupation2, target_occupation3] =
            self.choices(self.occupations);
        let [dislike_occupation1, dislike_occupation2, dislike_occupation3] =
            self.choices(self.occupations);
        Respondent {
            id: 0,
            school_id,
            gender: 0,
            gba_understanding: self.answer(1, 4),
            stem_participation: self.answer(1, 2),
            stress_source: self.answer(1, 2),
            stress_lv: self.answer(1, len(&STRESS_LEVELS)),
            endure_lv: self.answer(1, len(&ENDURANCE_LEVELS)),
            target_major1,
            target_major2,
            target_major3,
            dislike_major1,
            dislike_major2,
            dislike_major3,
            target_occupation1,
            target_occupation2,
            target_occupation3,
            dislike_occupation1,
            dislike_occupation2,
            dislike_occupation3,
        }
    }
}

/// Name and code range of every skill, multi-select and factor column
fn coded_columns() -> Vec<(String, i64, i64)> {
    let mut columns = Vec::new();
    columns.extend(STEM_SKILLS.iter().map(|name| ((*name).to_string(), 0, 2)));
    columns.extend(STRESS_SOURCES.iter().map(|name| ((*name).to_string(), 0, 1)));
    columns.extend(RELIEF_METHODS.iter().map(|name| ((*name).to_string(), 0, 1)));
    columns.extend(
        MAJOR_FACTORS
            .iter()
            .map(|name| (format!("{name}{MAJOR_FACTOR_SUFFIX}"), 0, 3)),
    );
    columns.extend(
        OCCUPATION_FACTORS
            .iter()
            .map(|name| (format!("{name}{OCCUPATION_FACTOR_SUFFIX}"), 0, 3)),
    );
    columns
}

#[allow(clippy::cast_possible_wrap)]
const fn len(labels: &[&str]) -> i64 {
    labels.len() as i64
}

/// Generate a cohort as one record batch
///
/// # Errors
/// Returns an error if the rows cannot be converted to Arrow
pub fn generate_cohort(spec: &CohortSpec, codebook: &CodeBook) -> Result<RecordBatch> {
    let mut generator = Generator {
        rng: StdRng::seed_from_u64(spec.seed),
        missing_rate: spec.missing_rate.clamp(0.0, 1.0),
        majors: i64::try_from(codebook.len(Domain::Major)).unwrap_or(i64::MAX),
        occupations: i64::try_from(codebook.len(Domain::Occupation)).unwrap_or(i64::MAX),
    };
    let coded = coded_columns();

    let mut respondents = Vec::new();
    let mut coded_values = vec![Vec::new(); coded.len()];
    let mut next_id = 1_i64;
    for &school_id in &spec.schools {
        let mut emitted = 0;
        while emitted < spec.respondents_per_school {
            let genders: &[i64] = if spec.symmetric {
                &[1, 2]
            } else if generator.rng.random_bool(0.5) {
                &[1]
            } else {
                &[2]
            };
            let template = generator.respondent(school_id);
            let answers = coded
                .iter()
                .map(|(_, low, high)| generator.answer(*low, *high))
                .collect::<Vec<_>>();

            for &gender in genders {
                respondents.push(Respondent {
                    id: next_id,
                    gender,
                    ..template.clone()
                });
                for (column, answer) in coded_values.iter_mut().zip(&answers) {
                    column.push(*answer);
                }
                next_id += 1;
                emitted += 1;
            }
        }
    }

    let fields = Vec::<FieldRef>::from_samples(
        &respondents,
        TracingOptions::default().allow_null_fields(true),
    )?;
    let core = serde_arrow::to_record_batch(&fields, &respondents)?;

    let mut schema_fields = core.schema().fields().iter().cloned().collect::<Vec<_>>();
    let mut columns = core.columns().to_vec();
    for ((name, _, _), values) in coded.into_iter().zip(coded_values) {
        schema_fields.push(Arc::new(Field::new(name, DataType::Int64, true)));
        columns.push(Arc::new(Int64Array::from(values)) as ArrayRef);
    }

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(schema_fields)),
        columns,
    )?)
}
