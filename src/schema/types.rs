//! Value and result types shared by fields and forms
//!
//! Supported value kinds:
//! - text: trimmed/normalized UTF-8 string
//! - boolean: checkbox state
//! - number: 64-bit float
//! - date: calendar date (YYYY-MM-DD)
//! - text list: checkbox group selections

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path used when the submission itself is malformed
pub const ROOT_PATH: &str = "$root";

/// Kind of value a field produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Boolean,
    Number,
    Date,
    TextList,
}

impl ValueKind {
    /// Returns the kind name for messages and descriptions
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::TextList => "text_list",
        }
    }
}

/// A validated, normalized field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Boolean(bool),
    Number(f64),
    Date(NaiveDate),
    TextList(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Boolean(_) => ValueKind::Boolean,
            FieldValue::Number(_) => ValueKind::Number,
            FieldValue::Date(_) => ValueKind::Date,
            FieldValue::TextList(_) => ValueKind::TextList,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::TextList(items) => Some(items),
            _ => None,
        }
    }

    /// Converts back into the raw JSON shape a browser would submit
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::TextList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// A single validation failure keyed by field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Flat field key (or `$root`)
    pub path: String,
    /// Human-readable message
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered, non-empty list of validation failures.
///
/// Only constructible from at least one issue, so a failed parse always
/// carries something to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    /// Wraps the issues, or returns `None` when there are none
    pub fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    /// A failure with exactly one issue
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(path, message)],
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Messages reported against one field, in order
    pub fn messages_for(&self, path: &str) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.path == path)
            .map(|issue| issue.message.as_str())
            .collect()
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.issues.iter().any(|issue| issue.message == message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Normalized values of a successfully parsed form, in declared field order.
///
/// Optional fields that were left blank are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Checkbox state; absent counts as unchecked
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(FieldValue::as_bool).unwrap_or(false)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Text value that the schema guarantees to be present
    pub fn require_text(&self, name: &str) -> Result<String, ValidationErrors> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| missing(name))
    }

    pub fn require_number(&self, name: &str) -> Result<f64, ValidationErrors> {
        self.number(name).ok_or_else(|| missing(name))
    }

    pub fn require_date(&self, name: &str) -> Result<NaiveDate, ValidationErrors> {
        self.date(name).ok_or_else(|| missing(name))
    }

    /// Raw JSON object of the normalized values
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

fn missing(name: &str) -> ValidationErrors {
    ValidationErrors::single(name, format!("{} is missing", name))
}
