//! Cell values of a decoded survey table.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// A numeric answer code
///
/// Codes arrive as floating point numbers from the spreadsheet export. The
/// wrapper gives them a total order and a hash so they can key distributions.
/// Missing answers are never represented as a `Code`.
#[derive(Debug, Clone, Copy)]
pub struct Code(f64);

/// The designated "zero / none" answer code
pub const ZERO_CODE: Code = Code(0.0);

impl Code {
    /// Wrap a numeric code; negative zero is folded into zero
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value == 0.0 { ZERO_CODE } else { Self(value) }
    }

    /// The numeric value of the code
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The code as an integer, if it has no fractional part
    #[must_use]
    pub fn as_int(self) -> Option<i64> {
        #[allow(clippy::cast_possible_truncation)]
        (self.0.is_finite() && self.0.fract() == 0.0).then(|| self.0 as i64)
    }
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Code {}

impl Hash for Code {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Code {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Code {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Code {
    fn from(value: i32) -> Self {
        Self::new(f64::from(value))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_int() {
            Some(int) => write!(f, "{int}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_int() {
            Some(int) => serializer.serialize_i64(int),
            None => serializer.serialize_f64(self.0),
        }
    }
}

/// A decoded, non-missing cell
///
/// Values order as flags, then codes (numerically), then labels
/// (lexically), then `Unknown`. Rankings rely on this order for ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// Boolean recoding of a yes/no or threshold field
    Flag(bool),
    /// Raw code kept as-is
    Code(Code),
    /// Human readable label from a fixed lookup or the code book
    Label(String),
    /// A code the code book has no label for
    Unknown,
}

impl Value {
    /// Build a label value
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Build a code value
    pub fn code(code: impl Into<Code>) -> Self {
        Self::Code(code.into())
    }

    /// The boolean, if this is a flag
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The code, if this is a code
    #[must_use]
    pub const fn as_code(&self) -> Option<Code> {
        match self {
            Self::Code(code) => Some(*code),
            _ => None,
        }
    }

    /// The label text, if this is a label
    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Code> for Value {
    fn from(value: Code) -> Self {
        Self::Code(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Code(code) => write!(f, "{code}"),
            Self::Label(label) => f.write_str(label),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(flag) => serializer.serialize_bool(*flag),
            Self::Code(code) => code.serialize(serializer),
            Self::Label(label) => serializer.serialize_str(label),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}
