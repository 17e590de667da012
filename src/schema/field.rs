//! Field definitions for the typed survey schema
//!
//! Every column the engine reads has a semantic kind that decides how its raw
//! numeric codes are decoded.

use std::fmt;

use smallvec::SmallVec;

use crate::codebook::{CodeBook, Domain};
use crate::schema::value::{Code, Value};

/// Semantic kind of a survey column
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Respondent identifier
    Identifier,
    /// School identifier used for cohort filtering
    School,
    /// Numeric code that is analysed as-is
    Coded,
    /// Code recoded to a boolean
    Flag {
        /// Codes that mean `true`
        truthy: SmallVec<[Code; 4]>,
        /// Codes that mean `false`
        falsy: SmallVec<[Code; 4]>,
    },
    /// Code recoded to a fixed label
    Ordinal {
        /// Label per code
        labels: Vec<(Code, String)>,
    },
    /// One column of a ranked-choice group, decoded through the code book
    Choice {
        /// Code book domain of the answers
        domain: Domain,
    },
}

impl FieldKind {
    /// Decode a non-missing raw code
    ///
    /// Codes a fixed lookup does not list pass through unchanged as
    /// [`Value::Code`]; choice codes missing from the code book become
    /// [`Value::Unknown`].
    #[must_use]
    pub fn decode(&self, code: Code, codebook: &CodeBook) -> Value {
        match self {
            Self::Identifier | Self::School | Self::Coded => Value::Code(code),
            Self::Flag { truthy, falsy } => {
                if truthy.contains(&code) {
                    Value::Flag(true)
                } else if falsy.contains(&code) {
                    Value::Flag(false)
                } else {
                    Value::Code(code)
                }
            }
            Self::Ordinal { labels } => labels
                .iter()
                .find(|(candidate, _)| *candidate == code)
                .map_or(Value::Code(code), |(_, label)| Value::label(label.as_str())),
            Self::Choice { domain } => codebook.label_of(*domain, code).to_value(),
        }
    }

    /// Whether decoded values of this kind are booleans
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag { .. })
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => write!(f, "Identifier"),
            Self::School => write!(f, "School"),
            Self::Coded => write!(f, "Coded"),
            Self::Flag { .. } => write!(f, "Flag"),
            Self::Ordinal { .. } => write!(f, "Ordinal"),
            Self::Choice { domain } => write!(f, "Choice({domain})"),
        }
    }
}

/// A column of the survey schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Column name after conversion
    pub name: String,
    /// Semantic kind
    pub kind: FieldKind,
    /// Whether loading fails when the column is absent
    pub required: bool,
}

impl FieldSpec {
    /// Create a required field
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    /// A plain coded field
    pub fn coded(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Coded)
    }

    /// A boolean recoding of the given codes
    pub fn flag<T, F>(name: impl Into<String>, truthy: T, falsy: F) -> Self
    where
        T: IntoIterator<Item = i32>,
        F: IntoIterator<Item = i32>,
    {
        Self::new(
            name,
            FieldKind::Flag {
                truthy: truthy.into_iter().map(Code::from).collect(),
                falsy: falsy.into_iter().map(Code::from).collect(),
            },
        )
    }

    /// A fixed code→label recoding
    pub fn ordinal(name: impl Into<String>, labels: &[(i32, &str)]) -> Self {
        Self::new(
            name,
            FieldKind::Ordinal {
                labels: labels
                    .iter()
                    .map(|(code, label)| (Code::from(*code), (*label).to_string()))
                    .collect(),
            },
        )
    }

    /// Mark the field as optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A logical multi-select question spread over parallel columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    /// Logical field name
    pub name: String,
    /// Code book domain of the answers
    pub domain: Domain,
    /// Ranked columns, first preference first
    pub columns: SmallVec<[String; 3]>,
}

impl ChoiceGroup {
    /// Create a group from explicit column names
    pub fn new<I, S>(name: impl Into<String>, domain: Domain, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            domain,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a group whose columns are `{name}1..={name}{k}`
    pub fn numbered(name: impl Into<String>, domain: Domain, k: usize) -> Self {
        let name = name.into();
        let columns = (1..=k).map(|i| format!("{name}{i}")).collect::<Vec<_>>();
        Self::new(name, domain, columns)
    }

    /// Column names as string slices
    #[must_use]
    pub fn column_names(&self) -> SmallVec<[&str; 3]> {
        self.columns.iter().map(String::as_str).collect()
    }
}
