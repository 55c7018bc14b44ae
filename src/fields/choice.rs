//! Choice fields: select, radio group, checkbox, checkbox group
//!
//! The option-taking factories check their parameters up front; a bad
//! option list is a definition error, not a validation failure.

use crate::schema::{Constraint, FieldSchema, Normalizer, SchemaDefinitionError, SchemaResult};

/// Single choice from a dropdown
pub fn select(label: &str, options: &[&str]) -> SchemaResult<FieldSchema> {
    let options = checked_options(label, options)?;
    FieldSchema::text(label)
        .normalize(Normalizer::Trim)
        .required_message(format!("Please select a {}", label.to_lowercase()))
        .type_message(format!("Please select a {}", label.to_lowercase()))
        .rule(
            Constraint::OneOf(options),
            format!("Please select a {}", label.to_lowercase()),
        )
        .build()
}

/// Single choice from a radio group
pub fn radio(label: &str, options: &[&str]) -> SchemaResult<FieldSchema> {
    let options = checked_options(label, options)?;
    let message = format!("Please select a valid {}", label.to_lowercase());
    FieldSchema::text(label)
        .normalize(Normalizer::Trim)
        .required_message(format!("Please select a {}", label.to_lowercase()))
        .type_message(message.clone())
        .rule(Constraint::OneOf(options), message)
        .build()
}

/// Plain on/off checkbox; unchecked is valid
pub fn checkbox(label: &str) -> SchemaResult<FieldSchema> {
    FieldSchema::boolean(label).build()
}

/// Checkbox that must be checked, such as policy acceptance
pub fn consent(message: &str) -> SchemaResult<FieldSchema> {
    FieldSchema::boolean("Consent")
        .type_message(message)
        .rule(Constraint::MustBeTrue, message)
        .build()
}

/// Selection bounds for [`checkbox_group`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection<'a> {
    pub min: usize,
    pub max: Option<usize>,
    /// Restricts selections to these values; free values when `None`
    pub allowed: Option<&'a [&'a str]>,
}

/// Multi-select checkbox group.
///
/// # Errors
///
/// - `max` of zero, or `min > max`
/// - `max` larger than the allowed set
/// - an empty, blank or duplicated allowed set
pub fn checkbox_group(label: &str, selection: Selection<'_>) -> SchemaResult<FieldSchema> {
    if let Some(max) = selection.max {
        if max == 0 || selection.min > max {
            return Err(SchemaDefinitionError::invalid_bounds(
                label,
                format!("selection {}..={}", selection.min, max),
            ));
        }
    }

    let allowed = selection
        .allowed
        .map(|options| checked_options(label, options))
        .transpose()?;

    if let Some(allowed) = &allowed {
        let limit = selection.max.unwrap_or(selection.min);
        if limit > allowed.len() {
            return Err(SchemaDefinitionError::invalid_bounds(
                label,
                format!("cannot select {} of {} options", limit, allowed.len()),
            ));
        }
    }

    let lower = label.to_lowercase();
    let mut builder = FieldSchema::text_list(label).normalize(Normalizer::Trim);
    if let Some(allowed) = allowed {
        builder = builder.rule(
            Constraint::Subset(allowed),
            format!("Please select only valid {}", lower),
        );
    }
    if selection.min > 0 {
        builder = builder.rule(
            Constraint::Count {
                min: Some(selection.min),
                max: None,
            },
            format!("Select at least {} {}", selection.min, lower),
        );
    }
    if let Some(max) = selection.max {
        builder = builder.rule(
            Constraint::Count {
                min: None,
                max: Some(max),
            },
            format!("Select at most {} {}", max, lower),
        );
    }
    builder.build()
}

fn checked_options(label: &str, options: &[&str]) -> SchemaResult<Vec<String>> {
    if options.is_empty() {
        return Err(SchemaDefinitionError::EmptyOptions {
            label: label.to_string(),
        });
    }

    let mut seen: Vec<String> = Vec::with_capacity(options.len());
    for option in options {
        if option.trim().is_empty() {
            return Err(SchemaDefinitionError::BlankOption {
                label: label.to_string(),
            });
        }
        if seen.iter().any(|s| s == option) {
            return Err(SchemaDefinitionError::DuplicateOption {
                label: label.to_string(),
                option: option.to_string(),
            });
        }
        seen.push(option.to_string());
    }
    Ok(seen)
}
