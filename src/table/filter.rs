//! # Column Filters
//!
//! Declarative predicates over JSON records. Each column holds a list of
//! predicates and every predicate of every column must pass.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{TableError, TableResult};

/// Filter actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterAction {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl FilterAction {
    pub const ALL: [FilterAction; 10] = [
        FilterAction::Equals,
        FilterAction::Contains,
        FilterAction::GreaterThan,
        FilterAction::LessThan,
        FilterAction::StartsWith,
        FilterAction::EndsWith,
        FilterAction::In,
        FilterAction::NotIn,
        FilterAction::IsNull,
        FilterAction::IsNotNull,
    ];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAction::Equals => "EQUALS",
            FilterAction::Contains => "CONTAINS",
            FilterAction::GreaterThan => "GREATER_THAN",
            FilterAction::LessThan => "LESS_THAN",
            FilterAction::StartsWith => "STARTS_WITH",
            FilterAction::EndsWith => "ENDS_WITH",
            FilterAction::In => "IN",
            FilterAction::NotIn => "NOT_IN",
            FilterAction::IsNull => "IS_NULL",
            FilterAction::IsNotNull => "IS_NOT_NULL",
        }
    }

    /// Parse a wire name (case-insensitive)
    pub fn parse(s: &str) -> TableResult<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == upper)
            .ok_or_else(|| TableError::UnknownFilterAction(s.to_string()))
    }

    /// Whether the action ignores the filter value
    pub fn is_unary(&self) -> bool {
        matches!(self, FilterAction::IsNull | FilterAction::IsNotNull)
    }
}

/// One predicate on a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub action: FilterAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ColumnFilter {
    pub fn new(action: FilterAction, value: Value) -> Self {
        Self {
            action,
            value: Some(value),
        }
    }

    pub fn is_null() -> Self {
        Self {
            action: FilterAction::IsNull,
            value: None,
        }
    }

    pub fn is_not_null() -> Self {
        Self {
            action: FilterAction::IsNotNull,
            value: None,
        }
    }

    /// Check a cell against this predicate. A missing cell is null.
    pub fn matches(&self, cell: Option<&Value>) -> bool {
        let cell = cell.filter(|v| !v.is_null());
        let target = self.value.as_ref().unwrap_or(&Value::Null);

        match (self.action, cell) {
            (FilterAction::IsNull, cell) => cell.is_none(),
            (FilterAction::IsNotNull, cell) => cell.is_some(),
            (_, None) => false,
            (FilterAction::Equals, Some(cell)) => values_equal(cell, target),
            (FilterAction::Contains, Some(cell)) => lower(cell).contains(&lower(target)),
            (FilterAction::StartsWith, Some(cell)) => lower(cell).starts_with(&lower(target)),
            (FilterAction::EndsWith, Some(cell)) => lower(cell).ends_with(&lower(target)),
            (FilterAction::GreaterThan, Some(cell)) => {
                compare_loose(cell, target) == Ordering::Greater
            }
            (FilterAction::LessThan, Some(cell)) => compare_loose(cell, target) == Ordering::Less,
            (FilterAction::In, Some(cell)) => {
                set_members(target).iter().any(|m| values_equal(cell, m))
            }
            (FilterAction::NotIn, Some(cell)) => {
                !set_members(target).iter().any(|m| values_equal(cell, m))
            }
        }
    }

    /// Parse `ACTION` or `ACTION:value`
    pub fn parse(expr: &str) -> TableResult<Self> {
        let (action, value) = match expr.split_once(':') {
            Some((action, value)) => (FilterAction::parse(action)?, Some(value)),
            None => (FilterAction::parse(expr)?, None),
        };

        match (action.is_unary(), value) {
            (true, _) => Ok(Self {
                action,
                value: None,
            }),
            (false, Some(value)) => Ok(Self::new(action, Value::String(value.to_string()))),
            (false, None) => Err(TableError::InvalidFilter(format!(
                "{} requires a value",
                action.as_str()
            ))),
        }
    }
}

/// Column-keyed filters combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    columns: BTreeMap<String, Vec<ColumnFilter>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style add
    pub fn and(mut self, column: impl Into<String>, filter: ColumnFilter) -> Self {
        self.add(column, filter);
        self
    }

    pub fn add(&mut self, column: impl Into<String>, filter: ColumnFilter) {
        self.columns.entry(column.into()).or_default().push(filter);
    }

    /// Drops every predicate on a column
    pub fn remove_column(&mut self, column: &str) -> bool {
        self.columns.remove(column).is_some()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.columns.values().all(Vec::is_empty)
    }

    pub fn column(&self, column: &str) -> &[ColumnFilter] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parse `column:ACTION[:value]`
    pub fn parse_entry(expr: &str) -> TableResult<(String, ColumnFilter)> {
        let (column, rest) = expr
            .split_once(':')
            .ok_or_else(|| TableError::InvalidFilter(format!("expected column:ACTION, got '{}'", expr)))?;
        if column.trim().is_empty() {
            return Err(TableError::InvalidFilter(format!("missing column in '{}'", expr)));
        }
        Ok((column.trim().to_string(), ColumnFilter::parse(rest)?))
    }

    /// Check if a record matches all filters
    pub fn matches(&self, record: &Value) -> bool {
        self.columns.iter().all(|(column, filters)| {
            let cell = record.get(column);
            filters.iter().all(|f| f.matches(cell))
        })
    }
}

/// Display string of a JSON scalar
pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn lower(value: &Value) -> String {
    display(value).to_lowercase()
}

/// Numeric reading of a number or numeric string
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn values_equal(cell: &Value, target: &Value) -> bool {
    match (as_number(cell), as_number(target)) {
        (Some(a), Some(b)) => a == b,
        _ => display(cell) == display(target),
    }
}

/// Numeric when both sides are numeric, otherwise case-insensitive text order
fn compare_loose(cell: &Value, target: &Value) -> Ordering {
    match (as_number(cell), as_number(target)) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => lower(cell).cmp(&lower(target)),
    }
}

/// Members of an IN set: a JSON array or a comma-separated string
fn set_members(target: &Value) -> Vec<Value> {
    match target {
        Value::Array(items) => items.clone(),
        Value::String(s) => s
            .split(',')
            .map(|part| Value::String(part.trim().to_string()))
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}
