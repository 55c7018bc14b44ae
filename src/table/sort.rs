//! # Sorting
//!
//! Single-key stable sort over JSON records.
//!
//! Ascending puts nulls last; descending reverses non-null order and puts
//! nulls first.
//!
//! Non-null cells order by kind first (numbers, booleans, strings, then
//! arrays and objects), then within the kind. Strings compare after
//! lowercasing and stripping accents, so "Émile" sorts with "emile". This is
//! a fixed folding, not a locale collation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::errors::{TableError, TableResult};
use super::filter::display;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort key and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `key` or `key.asc` / `key.desc`
    pub fn parse(value: &str) -> TableResult<Self> {
        let value = value.trim();
        let (key, direction) = match value.rfind('.') {
            Some(dot_pos) => {
                let direction = match value[dot_pos + 1..].to_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    other => {
                        return Err(TableError::InvalidSort(format!(
                            "Invalid sort direction: {}",
                            other
                        )))
                    }
                };
                (&value[..dot_pos], direction)
            }
            None => (value, SortDirection::Asc),
        };

        if key.is_empty() {
            return Err(TableError::InvalidSort("sort key cannot be empty".to_string()));
        }

        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }

    /// Ordering of two records under this spec
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        compare_cells(a.get(&self.key), b.get(&self.key), self.direction)
    }
}

/// Stable in-place sort
pub fn sort_records(records: &mut [Value], spec: &SortSpec) {
    records.sort_by(|a, b| spec.compare(a, b));
}

/// Compares two cells, placing nulls according to `direction`
pub fn compare_cells(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b, direction) {
        (None, None, _) => Ordering::Equal,
        (None, Some(_), SortDirection::Asc) => Ordering::Greater,
        (Some(_), None, SortDirection::Asc) => Ordering::Less,
        (None, Some(_), SortDirection::Desc) => Ordering::Less,
        (Some(_), None, SortDirection::Desc) => Ordering::Greater,
        (Some(a), Some(b), SortDirection::Asc) => compare_values(a, b),
        (Some(a), Some(b), SortDirection::Desc) => compare_values(a, b).reverse(),
    }
}

/// Ascending order of two non-null values
fn compare_values(a: &Value, b: &Value) -> Ordering {
    kind_rank(a).cmp(&kind_rank(b)).then_with(|| match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => fold(x).cmp(&fold(y)),
        _ => display(a).cmp(&display(b)),
    })
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Bool(_) => 1,
        Value::String(_) => 2,
        _ => 3,
    }
}

/// Lowercased with combining marks removed
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(records: &[Value], key: &str) -> Vec<Value> {
        records.iter().map(|r| r[key].clone()).collect()
    }

    #[test]
    fn test_numeric_sort() {
        let mut rows = vec![json!({"a": 2}), json!({"a": 10}), json!({"a": 1})];
        sort_records(&mut rows, &SortSpec::asc("a"));
        assert_eq!(column(&rows, "a"), vec![json!(1), json!(2), json!(10)]);

        sort_records(&mut rows, &SortSpec::desc("a"));
        assert_eq!(column(&rows, "a"), vec![json!(10), json!(2), json!(1)]);
    }

    #[test]
    fn test_string_sort_ignores_case() {
        let mut rows = vec![json!({"n": "bravo"}), json!({"n": "Alpha"}), json!({"n": "charlie"})];
        sort_records(&mut rows, &SortSpec::asc("n"));
        assert_eq!(
            column(&rows, "n"),
            vec![json!("Alpha"), json!("bravo"), json!("charlie")]
        );
    }

    #[test]
    fn test_nulls_last_ascending_first_descending() {
        let mut rows = vec![json!({"a": null}), json!({"a": 2}), json!({}), json!({"a": 1})];
        sort_records(&mut rows, &SortSpec::asc("a"));
        assert_eq!(rows[0]["a"], json!(1));
        assert_eq!(rows[1]["a"], json!(2));
        assert!(rows[2]["a"].is_null() && rows[3]["a"].is_null());

        sort_records(&mut rows, &SortSpec::desc("a"));
        assert!(rows[0]["a"].is_null() && rows[1]["a"].is_null());
        assert_eq!(rows[2]["a"], json!(2));
        assert_eq!(rows[3]["a"], json!(1));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut rows = vec![
            json!({"k": "x", "id": 1}),
            json!({"k": "X", "id": 2}),
            json!({"k": "a", "id": 3}),
            json!({"k": "x", "id": 4}),
        ];
        sort_records(&mut rows, &SortSpec::asc("k"));
        assert_eq!(column(&rows, "id"), vec![json!(3), json!(1), json!(2), json!(4)]);
    }

    #[test]
    fn test_mixed_kinds_sort_the_same_from_any_input_order() {
        let cells = [json!(2), json!(10), json!("1a")];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

        for spec in [SortSpec::asc("a"), SortSpec::desc("a")] {
            let results: Vec<Vec<Value>> = orders
                .iter()
                .map(|order| {
                    let mut rows: Vec<Value> =
                        order.iter().map(|&i| json!({"a": cells[i].clone()})).collect();
                    sort_records(&mut rows, &spec);
                    column(&rows, "a")
                })
                .collect();
            assert!(results.iter().all(|r| r == &results[0]), "{:?}", results);
        }

        let mut rows = vec![
            json!({"a": "1a"}),
            json!({"a": true}),
            json!({"a": 10}),
            json!({"a": 2}),
        ];
        sort_records(&mut rows, &SortSpec::asc("a"));
        assert_eq!(
            column(&rows, "a"),
            vec![json!(2), json!(10), json!(true), json!("1a")]
        );
    }

    #[test]
    fn test_accents_fold_before_comparing() {
        let mut rows = vec![json!({"n": "zeta"}), json!({"n": "Émile"}), json!({"n": "eve"})];
        sort_records(&mut rows, &SortSpec::asc("n"));
        assert_eq!(
            column(&rows, "n"),
            vec![json!("Émile"), json!("eve"), json!("zeta")]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(SortSpec::parse("created_at.desc").unwrap(), SortSpec::desc("created_at"));
        assert_eq!(SortSpec::parse("name").unwrap(), SortSpec::asc("name"));
        assert_eq!(SortSpec::parse("name.ASC").unwrap(), SortSpec::asc("name"));
        assert!(SortSpec::parse("name.sideways").is_err());
        assert!(SortSpec::parse(".desc").is_err());
    }
}
