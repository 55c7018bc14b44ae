//! Free text, numbers, dates and colors

use chrono::NaiveDate;

use crate::schema::{Constraint, FieldSchema, Normalizer, SchemaDefinitionError, SchemaResult};

const COLOR_PATTERN: &str = r"^#([0-9a-f]{3}|[0-9a-f]{6})$";

/// Trimmed free text with a character-count range.
///
/// # Errors
///
/// `InvalidBounds` if `max == 0` or `min > max`.
pub fn text(label: &str, min: usize, max: usize) -> SchemaResult<FieldSchema> {
    if max == 0 || min > max {
        return Err(SchemaDefinitionError::invalid_bounds(
            label,
            format!("length {}..={}", min, max),
        ));
    }

    let mut builder = FieldSchema::text(label).normalize(Normalizer::Trim);
    if min > 1 {
        builder = builder.rule(
            Constraint::Length {
                min: Some(min),
                max: None,
            },
            format!("{} must be at least {} characters", label, min),
        );
    }
    builder
        .rule(
            Constraint::Length {
                min: None,
                max: Some(max),
            },
            format!("{} must be {} characters or fewer", label, max),
        )
        .build()
}

/// Number with optional inclusive bounds
pub fn number(label: &str, min: Option<f64>, max: Option<f64>) -> SchemaResult<FieldSchema> {
    if min.is_some_and(|m| !m.is_finite()) || max.is_some_and(|m| !m.is_finite()) {
        return Err(SchemaDefinitionError::invalid_bounds(label, "bounds must be finite"));
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(SchemaDefinitionError::invalid_bounds(
                label,
                format!("range {}..={}", lo, hi),
            ));
        }
    }

    let mut builder = FieldSchema::number(label);
    if let Some(lo) = min {
        builder = builder.rule(
            Constraint::Range {
                min: Some(lo),
                max: None,
            },
            format!("{} must be at least {}", label, lo),
        );
    }
    if let Some(hi) = max {
        builder = builder.rule(
            Constraint::Range {
                min: None,
                max: Some(hi),
            },
            format!("{} must be at most {}", label, hi),
        );
    }
    builder.build()
}

/// ISO date (`YYYY-MM-DD`) with optional inclusive bounds
pub fn date(
    label: &str,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> SchemaResult<FieldSchema> {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(SchemaDefinitionError::invalid_bounds(
                label,
                format!("dates {}..={}", lo, hi),
            ));
        }
    }

    let mut builder = FieldSchema::date(label)
        .normalize(Normalizer::Trim)
        .type_message(format!("Please enter a valid {}", label.to_lowercase()));
    if let Some(lo) = min {
        builder = builder.rule(
            Constraint::DateRange {
                min: Some(lo),
                max: None,
            },
            format!("{} cannot be before {}", label, lo),
        );
    }
    if let Some(hi) = max {
        builder = builder.rule(
            Constraint::DateRange {
                min: None,
                max: Some(hi),
            },
            format!("{} cannot be after {}", label, hi),
        );
    }
    builder.build()
}

/// Hex color (`#rgb` or `#rrggbb`), lowercased
pub fn color(label: &str) -> SchemaResult<FieldSchema> {
    FieldSchema::text(label)
        .normalize(Normalizer::Trim)
        .normalize(Normalizer::Lowercase)
        .pattern(
            COLOR_PATTERN,
            format!("{} must be a hex color like #1a2b3c", label),
        )
        .build()
}
