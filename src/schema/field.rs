//! Atomic field schema
//!
//! A field turns one raw JSON value into a normalized [`FieldValue`] or a
//! single message. Evaluation order:
//!
//! 1. Coerce the raw value into the field's kind (normalizing text first)
//! 2. Apply the missing-value rule (required / optional)
//! 3. Run rules in declaration order, stopping at the first failure

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::constraint::{evaluate, normalize, Constraint, Normalizer, Rule};
use super::errors::{SchemaDefinitionError, SchemaResult};
use super::types::{FieldValue, ValueKind};

/// Immutable validation rule for one form field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    label: String,
    kind: ValueKind,
    required: bool,
    normalizers: Vec<Normalizer>,
    rules: Vec<Rule>,
    required_message: String,
    type_message: String,
}

impl FieldSchema {
    /// Start a text field
    pub fn text(label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(label.into(), ValueKind::Text)
    }

    /// Start a boolean (checkbox) field
    pub fn boolean(label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(label.into(), ValueKind::Boolean)
    }

    /// Start a numeric field
    pub fn number(label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(label.into(), ValueKind::Number)
    }

    /// Start a date field
    pub fn date(label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(label.into(), ValueKind::Date)
    }

    /// Start a multi-select field
    pub fn text_list(label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(label.into(), ValueKind::TextList)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Same field, but blank input is accepted and omitted from the output
    pub fn into_optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Replaces the message shown when a required value is missing
    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    /// Validates one raw value.
    ///
    /// `Ok(None)` means an optional field was left blank. Boolean and list
    /// fields always produce a value: unchecked and empty respectively.
    pub fn validate(&self, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
        let value = match self.coerce(raw)? {
            Some(value) => value,
            None => match self.kind {
                ValueKind::Boolean => FieldValue::Boolean(false),
                ValueKind::TextList => FieldValue::TextList(Vec::new()),
                _ if self.required => return Err(self.required_message.clone()),
                _ => return Ok(None),
            },
        };

        for rule in &self.rules {
            if !evaluate(&rule.constraint, &value) {
                return Err(rule.message.clone());
            }
        }

        Ok(Some(value))
    }

    /// Converts the raw value into this field's kind. `None` means blank.
    fn coerce(&self, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
        let raw = match raw {
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };

        match self.kind {
            ValueKind::Text => match raw {
                Value::String(s) => {
                    let s = normalize(s, &self.normalizers);
                    Ok((!s.is_empty()).then_some(FieldValue::Text(s)))
                }
                _ => Err(self.type_message.clone()),
            },
            ValueKind::Boolean => match raw {
                Value::Bool(b) => Ok(Some(FieldValue::Boolean(*b))),
                Value::String(s) => match s.trim().to_lowercase().as_str() {
                    "true" | "on" => Ok(Some(FieldValue::Boolean(true))),
                    "false" | "off" | "" => Ok(Some(FieldValue::Boolean(false))),
                    _ => Err(self.type_message.clone()),
                },
                _ => Err(self.type_message.clone()),
            },
            ValueKind::Number => match raw {
                Value::Number(n) => n
                    .as_f64()
                    .map(|n| Some(FieldValue::Number(n)))
                    .ok_or_else(|| self.type_message.clone()),
                Value::String(s) => {
                    let s = s.trim();
                    if s.is_empty() {
                        return Ok(None);
                    }
                    match s.parse::<f64>() {
                        Ok(n) if n.is_finite() => Ok(Some(FieldValue::Number(n))),
                        _ => Err(self.type_message.clone()),
                    }
                }
                _ => Err(self.type_message.clone()),
            },
            ValueKind::Date => match raw {
                Value::String(s) => {
                    let s = normalize(s, &self.normalizers);
                    if s.is_empty() {
                        return Ok(None);
                    }
                    chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                        .map(|d| Some(FieldValue::Date(d)))
                        .map_err(|_| self.type_message.clone())
                }
                _ => Err(self.type_message.clone()),
            },
            ValueKind::TextList => {
                let items: Vec<&str> = match raw {
                    Value::String(s) => vec![s.as_str()],
                    Value::Array(values) => values
                        .iter()
                        .map(|v| v.as_str().ok_or_else(|| self.type_message.clone()))
                        .collect::<Result<_, _>>()?,
                    _ => return Err(self.type_message.clone()),
                };
                let items: Vec<String> = items
                    .into_iter()
                    .map(|s| normalize(s, &self.normalizers))
                    .filter(|s| !s.is_empty())
                    .collect();
                Ok(Some(FieldValue::TextList(items)))
            }
        }
    }

    /// Serializable summary used by form listings
    pub fn describe(&self, name: &str) -> FieldDescription {
        FieldDescription {
            name: name.to_string(),
            label: self.label.clone(),
            kind: self.kind,
            required: self.required,
            rules: self.rules.iter().map(|r| r.constraint.name()).collect(),
        }
    }
}

/// Summary of a field for listings
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescription {
    pub name: String,
    pub label: String,
    pub kind: ValueKind,
    pub required: bool,
    pub rules: Vec<&'static str>,
}

/// Builder for [`FieldSchema`].
///
/// Definition problems (bad regex, a constraint on the wrong kind) are
/// collected and reported by [`FieldBuilder::build`].
#[derive(Debug)]
pub struct FieldBuilder {
    schema: FieldSchema,
    error: Option<SchemaDefinitionError>,
}

impl FieldBuilder {
    fn new(label: String, kind: ValueKind) -> Self {
        let type_message = match kind {
            ValueKind::Text => format!("{} must be text", label),
            ValueKind::Boolean => format!("{} must be checked or unchecked", label),
            ValueKind::Number => format!("{} must be a number", label),
            ValueKind::Date => format!("{} must be a valid date (YYYY-MM-DD)", label),
            ValueKind::TextList => format!("{} must be a list of values", label),
        };
        let error = label.trim().is_empty().then_some(SchemaDefinitionError::EmptyLabel);

        Self {
            schema: FieldSchema {
                required_message: format!("{} is required", label),
                type_message,
                label,
                kind,
                required: true,
                normalizers: Vec::new(),
                rules: Vec::new(),
            },
            error,
        }
    }

    pub fn optional(mut self) -> Self {
        self.schema.required = false;
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.schema.required_message = message.into();
        self
    }

    pub fn type_message(mut self, message: impl Into<String>) -> Self {
        self.schema.type_message = message.into();
        self
    }

    pub fn normalize(mut self, normalizer: Normalizer) -> Self {
        self.schema.normalizers.push(normalizer);
        self
    }

    pub fn rule(mut self, constraint: Constraint, message: impl Into<String>) -> Self {
        if self.error.is_none() && !constraint.applies_to(self.schema.kind) {
            self.error = Some(SchemaDefinitionError::ConstraintKindMismatch {
                label: self.schema.label.clone(),
                constraint: constraint.name(),
                kind: self.schema.kind.type_name(),
            });
        }
        self.schema.rules.push(Rule {
            constraint,
            message: message.into(),
        });
        self
    }

    /// Adds a regex rule; compile errors surface from `build`
    pub fn pattern(self, pattern: &str, message: impl Into<String>) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => self.rule(Constraint::Pattern(regex), message),
            Err(e) => {
                let mut builder = self;
                if builder.error.is_none() {
                    builder.error = Some(SchemaDefinitionError::InvalidPattern {
                        label: builder.schema.label.clone(),
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    });
                }
                builder
            }
        }
    }

    pub fn build(self) -> SchemaResult<FieldSchema> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.schema),
        }
    }
}
