//! Typed survey schema
//!
//! Replaces loose column-name indexing with an explicit list of fields and
//! their semantic kinds, checked once when a table is loaded.

pub mod field;
pub mod survey;
pub mod value;

pub use field::{ChoiceGroup, FieldKind, FieldSpec};
pub use survey::{SurveySchema, names};
pub use value::{Code, Value, ZERO_CODE};
