//! Constraint descriptors and their interpreter
//!
//! Every field rule is a tagged [`Constraint`] paired with a message. A
//! single function, [`evaluate`], decides whether a value satisfies a
//! constraint; fields never carry ad-hoc validation code of their own.

use chrono::NaiveDate;
use regex::Regex;

use super::types::{FieldValue, ValueKind};

/// Declarative description of one check on a field value
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Character count of a text value
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Text value must match the regex
    Pattern(Regex),
    /// Inclusive numeric bounds
    Range { min: Option<f64>, max: Option<f64> },
    /// Text value must be one of the listed options
    OneOf(Vec<String>),
    /// Number of selected items in a text list
    Count {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Every selected item must be one of the listed options
    Subset(Vec<String>),
    /// Boolean must be checked
    MustBeTrue,
    /// Inclusive date bounds
    DateRange {
        min: Option<NaiveDate>,
        max: Option<NaiveDate>,
    },
    /// Arbitrary pure predicate
    Custom(fn(&FieldValue) -> bool),
}

impl Constraint {
    /// Returns the constraint name for descriptions and errors
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Length { .. } => "length",
            Constraint::Pattern(_) => "pattern",
            Constraint::Range { .. } => "range",
            Constraint::OneOf(_) => "one_of",
            Constraint::Count { .. } => "count",
            Constraint::Subset(_) => "subset",
            Constraint::MustBeTrue => "must_be_true",
            Constraint::DateRange { .. } => "date_range",
            Constraint::Custom(_) => "custom",
        }
    }

    /// Whether this constraint can be evaluated against values of `kind`
    pub fn applies_to(&self, kind: ValueKind) -> bool {
        match self {
            Constraint::Length { .. } | Constraint::Pattern(_) | Constraint::OneOf(_) => {
                kind == ValueKind::Text
            }
            Constraint::Range { .. } => kind == ValueKind::Number,
            Constraint::Count { .. } | Constraint::Subset(_) => kind == ValueKind::TextList,
            Constraint::MustBeTrue => kind == ValueKind::Boolean,
            Constraint::DateRange { .. } => kind == ValueKind::Date,
            Constraint::Custom(_) => true,
        }
    }
}

/// A constraint and the message shown when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: String,
}

/// Evaluates a constraint against a value.
///
/// A value of the wrong kind never satisfies a kind-specific constraint.
pub fn evaluate(constraint: &Constraint, value: &FieldValue) -> bool {
    match (constraint, value) {
        (Constraint::Length { min, max }, FieldValue::Text(s)) => {
            let len = s.chars().count();
            within(len, *min, *max)
        }
        (Constraint::Pattern(regex), FieldValue::Text(s)) => regex.is_match(s),
        (Constraint::Range { min, max }, FieldValue::Number(n)) => {
            min.map_or(true, |m| *n >= m) && max.map_or(true, |m| *n <= m)
        }
        (Constraint::OneOf(options), FieldValue::Text(s)) => options.iter().any(|o| o == s),
        (Constraint::Count { min, max }, FieldValue::TextList(items)) => {
            within(items.len(), *min, *max)
        }
        (Constraint::Subset(allowed), FieldValue::TextList(items)) => items
            .iter()
            .all(|item| allowed.iter().any(|a| a == item)),
        (Constraint::MustBeTrue, FieldValue::Boolean(b)) => *b,
        (Constraint::DateRange { min, max }, FieldValue::Date(d)) => {
            min.map_or(true, |m| *d >= m) && max.map_or(true, |m| *d <= m)
        }
        (Constraint::Custom(predicate), value) => predicate(value),
        _ => false,
    }
}

fn within(n: usize, min: Option<usize>, max: Option<usize>) -> bool {
    min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m)
}

/// Normalization applied to raw text before any rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Strip leading and trailing whitespace
    Trim,
    /// Unicode lowercase
    Lowercase,
    /// Remove spaces, dashes, dots and parentheses used to format phone numbers
    StripPhoneFormatting,
}

impl Normalizer {
    pub fn apply(&self, input: &str) -> String {
        match self {
            Normalizer::Trim => input.trim().to_string(),
            Normalizer::Lowercase => input.to_lowercase(),
            Normalizer::StripPhoneFormatting => input
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
                .collect(),
        }
    }
}

/// Applies normalizers in order
pub fn normalize(input: &str, normalizers: &[Normalizer]) -> String {
    normalizers
        .iter()
        .fold(input.to_string(), |acc, n| n.apply(&acc))
}
