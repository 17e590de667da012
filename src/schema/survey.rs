//! The survey schema: which columns exist and what they mean.

use rustc_hash::FxHashMap;

use crate::codebook::Domain;
use crate::schema::field::{ChoiceGroup, FieldKind, FieldSpec};

/// Column names of the standard questionnaire
pub mod names {
    /// Respondent id
    pub const ID: &str = "id";
    /// School id
    pub const SCHOOL_ID: &str = "school_id";
    /// Gender (1 = m, 2 = f)
    pub const GENDER: &str = "gender";
    /// Understanding of the Greater Bay Area, collapsed to a flag
    pub const GBA_UNDERSTANDING: &str = "gba_understanding";
    /// Participation in STEM activities
    pub const STEM_PARTICIPATION: &str = "stem_participation";
    /// Main source of stress
    pub const STRESS_SOURCE: &str = "stress_source";
    /// Stress level
    pub const STRESS_LEVEL: &str = "stress_lv";
    /// Ability to endure stress
    pub const ENDURANCE_LEVEL: &str = "endure_lv";
    /// Preferred fields of study
    pub const TARGET_MAJOR: &str = "target_major";
    /// Disliked fields of study
    pub const DISLIKE_MAJOR: &str = "dislike_major";
    /// Preferred occupations
    pub const TARGET_OCCUPATION: &str = "target_occupation";
    /// Disliked occupations
    pub const DISLIKE_OCCUPATION: &str = "dislike_occupation";
}

/// Number of ranked columns per choice group
pub const CHOICES_PER_GROUP: usize = 3;

/// Factors for choosing a field of study, stored as `{factor}_A`
pub const MAJOR_FACTORS: [&str; 10] = [
    "personal_interests",
    "institute",
    "tuition",
    "scholarship",
    "career_prospect",
    "peers_and_teacher",
    "family",
    "salary",
    "DSE_result",
    "high_school_electives",
];

/// Factors for choosing an occupation, stored as `{factor}_B`
pub const OCCUPATION_FACTORS: [&str; 14] = [
    "personal_ability",
    "personal_interest",
    "sense_of_achievement",
    "family",
    "interpersonal_relationship",
    "job_nature",
    "remote_work",
    "workload",
    "working_environment",
    "salary_and_benefit",
    "promotion_opportunities",
    "career_prospect",
    "social_contribution",
    "social_status",
];

/// Suffix of major factor columns
pub const MAJOR_FACTOR_SUFFIX: &str = "_A";
/// Suffix of occupation factor columns
pub const OCCUPATION_FACTOR_SUFFIX: &str = "_B";

/// Skills rated after STEM activities (1 = strong gain, 2 = partial gain)
pub const STEM_SKILLS: [&str; 5] = [
    "leadership",
    "teamwork",
    "creativity",
    "sci_knowledge",
    "problem_solving",
];

/// Multi-select stress sources (1 = selected)
pub const STRESS_SOURCES: [&str; 11] = [
    "family_expectations",
    "comparison",
    "tight_schedule",
    "test_scores",
    "relationships",
    "prospect",
    "expectation",
    "long_term_solitude",
    "covid_19",
    "unstable_class",
    "transfer_exam",
];

/// Multi-select stress relief methods (1 = selected)
pub const RELIEF_METHODS: [&str; 9] = [
    "exercise",
    "family_communication",
    "friends_communication",
    "social_workers",
    "restructuring_ttb",
    "video_games",
    "sleep",
    "music",
    "no_idea",
];

/// Stress level labels in code order
pub const STRESS_LEVELS: [&str; 6] = ["none", "very_low", "low", "moderate", "high", "very_high"];

/// Endurance labels in code order
pub const ENDURANCE_LEVELS: [&str; 4] =
    ["totally_cannot", "mostly_cannot", "mostly_can", "totally_can"];

/// Column spellings of the spreadsheet converter and the names they load as
pub const EXPORT_ALIASES: [(&str, &str); 4] = [
    ("stress_scource", names::STRESS_SOURCE),
    ("interpresonal_relationship_B", "interpersonal_relationship_B"),
    ("worload_B", "workload_B"),
    ("promotion_opportunites_B", "promotion_opportunities_B"),
];

/// Stress source labels in code order
pub const STRESS_SOURCE_LABELS: [&str; 2] = ["personal", "external"];

/// Typed schema of a survey table
///
/// Columns found in the input but not listed here are loaded as optional
/// [`FieldKind::Coded`] fields.
#[derive(Debug, Clone)]
pub struct SurveySchema {
    id_field: String,
    school_field: String,
    fields: Vec<FieldSpec>,
    index: FxHashMap<String, usize>,
    choice_groups: Vec<ChoiceGroup>,
    aliases: FxHashMap<String, String>,
}

impl SurveySchema {
    /// Create a schema holding only the respondent id and school id fields
    pub fn new(id_field: impl Into<String>, school_field: impl Into<String>) -> Self {
        let id_field = id_field.into();
        let school_field = school_field.into();
        let mut schema = Self {
            id_field: id_field.clone(),
            school_field: school_field.clone(),
            fields: Vec::new(),
            index: FxHashMap::default(),
            choice_groups: Vec::new(),
            aliases: FxHashMap::default(),
        };
        schema.insert(FieldSpec::new(id_field, FieldKind::Identifier));
        schema.insert(FieldSpec::new(school_field, FieldKind::School).optional());
        schema
    }

    /// The standard questionnaire
    #[must_use]
    pub fn standard() -> Self {
        let mut schema = Self::new(names::ID, names::SCHOOL_ID)
            .with_field(FieldSpec::new(names::SCHOOL_ID, FieldKind::School))
            .with_field(FieldSpec::ordinal(names::GENDER, &[(1, "m"), (2, "f")]))
            .with_field(FieldSpec::flag(names::GBA_UNDERSTANDING, [3, 4], [1, 2]))
            .with_field(FieldSpec::flag(names::STEM_PARTICIPATION, [1], [2]))
            .with_field(FieldSpec::ordinal(
                names::STRESS_SOURCE,
                &[(1, STRESS_SOURCE_LABELS[0]), (2, STRESS_SOURCE_LABELS[1])],
            ))
            .with_field(FieldSpec::ordinal(
                names::STRESS_LEVEL,
                &labelled(&STRESS_LEVELS),
            ))
            .with_field(FieldSpec::ordinal(
                names::ENDURANCE_LEVEL,
                &labelled(&ENDURANCE_LEVELS),
            ))
            .with_choice_group(ChoiceGroup::numbered(
                names::TARGET_MAJOR,
                Domain::Major,
                CHOICES_PER_GROUP,
            ))
            .with_choice_group(ChoiceGroup::numbered(
                names::DISLIKE_MAJOR,
                Domain::Major,
                CHOICES_PER_GROUP,
            ))
            .with_choice_group(ChoiceGroup::numbered(
                names::TARGET_OCCUPATION,
                Domain::Occupation,
                CHOICES_PER_GROUP,
            ))
            .with_choice_group(ChoiceGroup::numbered(
                names::DISLIKE_OCCUPATION,
                Domain::Occupation,
                CHOICES_PER_GROUP,
            ));

        let optional = STEM_SKILLS
            .iter()
            .chain(STRESS_SOURCES.iter())
            .chain(RELIEF_METHODS.iter())
            .map(|name| (*name).to_string())
            .chain(
                MAJOR_FACTORS
                    .iter()
                    .map(|factor| format!("{factor}{MAJOR_FACTOR_SUFFIX}")),
            )
            .chain(
                OCCUPATION_FACTORS
                    .iter()
                    .map(|factor| format!("{factor}{OCCUPATION_FACTOR_SUFFIX}")),
            )
            .collect::<Vec<_>>();
        for name in optional {
            schema.insert(FieldSpec::coded(name).optional());
        }
        for (alias, canonical) in EXPORT_ALIASES {
            schema.aliases.insert(alias.to_string(), canonical.to_string());
        }
        schema
    }

    /// Add or replace a field
    #[must_use]
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.insert(spec);
        self
    }

    /// Add a choice group and one required choice field per column
    #[must_use]
    pub fn with_choice_group(mut self, group: ChoiceGroup) -> Self {
        for column in &group.columns {
            self.insert(FieldSpec::new(
                column.clone(),
                FieldKind::Choice {
                    domain: group.domain,
                },
            ));
        }
        self.choice_groups.retain(|existing| existing.name != group.name);
        self.choice_groups.push(group);
        self
    }

    /// Accept `alias` as another input name of `canonical`
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Schema name of an input column, resolving aliases
    #[must_use]
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    fn insert(&mut self, spec: FieldSpec) {
        if let Some(&idx) = self.index.get(&spec.name) {
            self.fields[idx] = spec;
        } else {
            self.index.insert(spec.name.clone(), self.fields.len());
            self.fields.push(spec);
        }
    }

    /// Add an unlisted input column as an optional coded field
    pub(crate) fn insert_discovered(&mut self, name: &str) {
        if !self.index.contains_key(name) {
            self.insert(FieldSpec::coded(name).optional());
        }
    }

    /// Name of the respondent id column
    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Name of the school id column
    #[must_use]
    pub fn school_field(&self) -> &str {
        &self.school_field
    }

    /// Look up a field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    /// All fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Fields that must be present in the input
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.required)
    }

    /// Look up a choice group
    #[must_use]
    pub fn choice_group(&self, name: &str) -> Option<&ChoiceGroup> {
        self.choice_groups.iter().find(|group| group.name == name)
    }

    /// All choice groups
    #[must_use]
    pub fn choice_groups(&self) -> &[ChoiceGroup] {
        &self.choice_groups
    }
}

impl Default for SurveySchema {
    fn default() -> Self {
        Self::standard()
    }
}

fn labelled<'a>(labels: &[&'a str]) -> Vec<(i32, &'a str)> {
    (1..).zip(labels.iter().copied()).collect()
}
