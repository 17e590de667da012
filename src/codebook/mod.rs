//! Code book for the two coded answer domains
//!
//! A [`CodeBook`] maps numeric answer codes to labels and to coarse
//! categories for fields of study and occupations. It is built once, either
//! from the standard tables or from a JSON resource, and passed by reference
//! to every query that needs it.

mod builtin;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::util::safe_read_to_string;
use crate::error::{Result, SurveyError};
use crate::schema::value::{Code, Value};

/// Coded answer domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Fields of study
    Major,
    /// Occupations
    Occupation,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Occupation => write!(f, "occupation"),
        }
    }
}

/// Result of a label lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a> {
    /// The code book knows the code
    Known(&'a str),
    /// The code is not in the book
    Unknown,
}

impl Label<'_> {
    /// Convert into a decoded table value
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Label::Known(label) => Value::label(label),
            Label::Unknown => Value::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct DomainTable {
    labels: FxHashMap<i64, String>,
    categories: FxHashMap<i64, String>,
    category_names: BTreeSet<String>,
}

impl DomainTable {
    fn from_static(labels: &[&str], categories: &[(&str, i64, i64)]) -> Self {
        let mut table = Self::default();
        for (code, label) in (1_i64..).zip(labels) {
            table.labels.insert(code, (*label).to_string());
        }
        for (category, first, last) in categories {
            for code in *first..=*last {
                table.categories.insert(code, (*category).to_string());
            }
            table.category_names.insert((*category).to_string());
        }
        table
    }

    fn from_file(domain: Domain, file: DomainFile) -> Result<Self> {
        let parse_code = |key: &str| {
            key.trim().parse::<i64>().map_err(|_| {
                SurveyError::InvalidCodeBook(format!("{domain}: '{key}' is not an integer code"))
            })
        };

        let mut table = Self::default();
        for (key, label) in file.labels {
            table.labels.insert(parse_code(&key)?, label);
        }
        for (key, category) in file.categories {
            let code = parse_code(&key)?;
            if !table.labels.contains_key(&code) {
                return Err(SurveyError::InvalidCodeBook(format!(
                    "{domain}: code {code} has a category but no label"
                )));
            }
            table.category_names.insert(category.clone());
            table.categories.insert(code, category);
        }
        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct DomainFile {
    labels: BTreeMap<String, String>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CodeBookFile {
    major: DomainFile,
    occupation: DomainFile,
}

/// Static code→label and code→category tables
#[derive(Debug, Clone)]
pub struct CodeBook {
    major: DomainTable,
    occupation: DomainTable,
}

impl CodeBook {
    /// The standard tables of the questionnaire
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            major: DomainTable::from_static(builtin::MAJOR_LABELS, builtin::MAJOR_CATEGORIES),
            occupation: DomainTable::from_static(
                builtin::OCCUPATION_LABELS,
                builtin::OCCUPATION_CATEGORIES,
            ),
        }
    }

    /// Parse a code book from JSON
    ///
    /// ```json
    /// {"major": {"labels": {"1": "Law"}, "categories": {"1": "Law"}},
    ///  "occupation": {"labels": {"1": "Legal"}}}
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CodeBookFile = serde_json::from_str(json)?;
        Ok(Self {
            major: DomainTable::from_file(Domain::Major, file.major)?,
            occupation: DomainTable::from_file(Domain::Occupation, file.occupation)?,
        })
    }

    /// Load a JSON code book from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = safe_read_to_string(path, "loading code book")?;
        Self::from_json_str(&json)
    }

    const fn table(&self, domain: Domain) -> &DomainTable {
        match domain {
            Domain::Major => &self.major,
            Domain::Occupation => &self.occupation,
        }
    }

    /// Label of a code; unknown codes degrade to [`Label::Unknown`]
    #[must_use]
    pub fn label_of(&self, domain: Domain, code: Code) -> Label<'_> {
        code.as_int()
            .and_then(|code| self.table(domain).labels.get(&code))
            .map_or(Label::Unknown, |label| Label::Known(label))
    }

    /// Category of a code, if the book defines one
    #[must_use]
    pub fn category_of(&self, domain: Domain, code: Code) -> Option<&str> {
        code.as_int()
            .and_then(|code| self.table(domain).categories.get(&code))
            .map(String::as_str)
    }

    /// Category of a code, failing with [`SurveyError::LookupMiss`] if undefined
    pub fn require_category(&self, domain: Domain, code: Code) -> Result<&str> {
        self.category_of(domain, code)
            .ok_or_else(|| SurveyError::LookupMiss {
                domain,
                key: code.to_string(),
            })
    }

    /// Whether the domain defines the category
    #[must_use]
    pub fn has_category(&self, domain: Domain, category: &str) -> bool {
        self.table(domain).category_names.contains(category)
    }

    /// All categories of a domain, sorted
    pub fn categories(&self, domain: Domain) -> impl Iterator<Item = &str> {
        self.table(domain).category_names.iter().map(String::as_str)
    }

    /// Number of labelled codes in a domain
    #[must_use]
    pub fn len(&self, domain: Domain) -> usize {
        self.table(domain).labels.len()
    }
}

impl Default for CodeBook {
    fn default() -> Self {
        Self::builtin()
    }
}
