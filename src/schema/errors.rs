//! Schema definition errors
//!
//! These are raised while fields and forms are being built, never while a
//! submission is validated. They indicate a programming error in a form
//! definition and abort startup.
//!
//! Error codes:
//! - FORM_EMPTY_LABEL
//! - FORM_EMPTY_OPTIONS
//! - FORM_BLANK_OPTION
//! - FORM_DUPLICATE_OPTION
//! - FORM_INVALID_BOUNDS
//! - FORM_INVALID_PATTERN
//! - FORM_CONSTRAINT_KIND_MISMATCH
//! - FORM_EMPTY_NAME
//! - FORM_EMPTY_FIELD_NAME
//! - FORM_DUPLICATE_FIELD
//! - FORM_UNKNOWN_REFINEMENT_FIELD
//! - FORM_DUPLICATE_FORM

use thiserror::Error;

/// Errors detected while defining a field or form schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaDefinitionError {
    /// Field label is blank
    #[error("Field label must not be empty")]
    EmptyLabel,

    /// Choice field was given no options
    #[error("{label}: option list must not be empty")]
    EmptyOptions { label: String },

    /// Choice field was given a blank option
    #[error("{label}: options must not be blank")]
    BlankOption { label: String },

    /// Choice field was given the same option twice
    #[error("{label}: duplicate option '{option}'")]
    DuplicateOption { label: String, option: String },

    /// Length, count, numeric or date bounds are degenerate
    #[error("{label}: invalid bounds ({detail})")]
    InvalidBounds { label: String, detail: String },

    /// Regex failed to compile
    #[error("{label}: invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        label: String,
        pattern: String,
        reason: String,
    },

    /// Constraint cannot apply to the field's value kind
    #[error("{label}: constraint '{constraint}' does not apply to {kind} fields")]
    ConstraintKindMismatch {
        label: String,
        constraint: &'static str,
        kind: &'static str,
    },

    /// Form name is blank
    #[error("Form name must not be empty")]
    EmptyFormName,

    /// Field key is blank
    #[error("Form '{form}': field name must not be empty")]
    EmptyFieldName { form: String },

    /// Field key declared twice
    #[error("Form '{form}': field '{field}' declared more than once")]
    DuplicateField { form: String, field: String },

    /// Refinement refers to a field the form does not declare
    #[error("Form '{form}': refinement '{refinement}' references unknown field '{field}'")]
    UnknownRefinementField {
        form: String,
        refinement: String,
        field: String,
    },

    /// Registry already holds a form with this name
    #[error("Form '{form}' is already registered")]
    DuplicateForm { form: String },
}

impl SchemaDefinitionError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyLabel => "FORM_EMPTY_LABEL",
            Self::EmptyOptions { .. } => "FORM_EMPTY_OPTIONS",
            Self::BlankOption { .. } => "FORM_BLANK_OPTION",
            Self::DuplicateOption { .. } => "FORM_DUPLICATE_OPTION",
            Self::InvalidBounds { .. } => "FORM_INVALID_BOUNDS",
            Self::InvalidPattern { .. } => "FORM_INVALID_PATTERN",
            Self::ConstraintKindMismatch { .. } => "FORM_CONSTRAINT_KIND_MISMATCH",
            Self::EmptyFormName => "FORM_EMPTY_NAME",
            Self::EmptyFieldName { .. } => "FORM_EMPTY_FIELD_NAME",
            Self::DuplicateField { .. } => "FORM_DUPLICATE_FIELD",
            Self::UnknownRefinementField { .. } => "FORM_UNKNOWN_REFINEMENT_FIELD",
            Self::DuplicateForm { .. } => "FORM_DUPLICATE_FORM",
        }
    }

    pub(crate) fn invalid_bounds(label: &str, detail: impl Into<String>) -> Self {
        Self::InvalidBounds {
            label: label.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type for schema definition
pub type SchemaResult<T> = Result<T, SchemaDefinitionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaDefinitionError::EmptyLabel.code(), "FORM_EMPTY_LABEL");
        assert_eq!(
            SchemaDefinitionError::DuplicateField {
                form: "contact".into(),
                field: "email".into(),
            }
            .code(),
            "FORM_DUPLICATE_FIELD"
        );
    }

    #[test]
    fn test_display_names_offending_field() {
        let err = SchemaDefinitionError::UnknownRefinementField {
            form: "contact".into(),
            refinement: "location_for_recruiters".into(),
            field: "city".into(),
        };
        let display = err.to_string();
        assert!(display.contains("contact"));
        assert!(display.contains("city"));
    }
}
