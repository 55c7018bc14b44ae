//! Form schema: ordered fields plus cross-field refinements
//!
//! Parse semantics:
//! - The submission must be a JSON object
//! - Every field is validated independently; issues accumulate in field order
//! - Refinements run only once every field has passed, and all of them run
//! - Undeclared keys are dropped
//! - A form either fully validates or fully fails

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::errors::{SchemaDefinitionError, SchemaResult};
use super::field::{FieldDescription, FieldSchema};
use super::refinement::Refinement;
use super::types::{FieldIssue, FormValues, ValidationErrors, ROOT_PATH};

/// Immutable form definition
#[derive(Debug)]
pub struct FormSchema {
    name: String,
    fields: Vec<(String, FieldSchema)>,
    refinements: Vec<Refinement>,
}

impl FormSchema {
    /// Start defining a form
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            refinements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    /// Validates a raw submission.
    pub fn parse(&self, input: &Value) -> Result<FormValues, ValidationErrors> {
        let Some(obj) = input.as_object() else {
            debug!(form = %self.name, "submission is not an object");
            return Err(ValidationErrors::single(
                ROOT_PATH,
                "Submission must be a JSON object",
            ));
        };

        for key in obj.keys() {
            if self.field(key).is_none() {
                debug!(form = %self.name, field = %key, "dropping undeclared field");
            }
        }

        let mut values = FormValues::new();
        let mut issues = Vec::new();

        for (name, field) in &self.fields {
            match field.validate(obj.get(name)) {
                Ok(Some(value)) => values.insert(name.clone(), value),
                Ok(None) => {}
                Err(message) => issues.push(FieldIssue::new(name.clone(), message)),
            }
        }

        if issues.is_empty() {
            for refinement in &self.refinements {
                issues.extend(refinement.check(&values));
            }
        }

        match ValidationErrors::from_issues(issues) {
            Some(errors) => {
                debug!(form = %self.name, issues = errors.len(), "submission rejected");
                Err(errors)
            }
            None => {
                debug!(form = %self.name, fields = values.len(), "submission accepted");
                Ok(values)
            }
        }
    }

    /// Serializable summary of the form
    pub fn describe(&self) -> FormDescription {
        FormDescription {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, field)| field.describe(name))
                .collect(),
            refinements: self
                .refinements
                .iter()
                .map(|r| r.name().to_string())
                .collect(),
        }
    }
}

/// Summary of a form for listings
#[derive(Debug, Clone, Serialize)]
pub struct FormDescription {
    pub name: String,
    pub fields: Vec<FieldDescription>,
    pub refinements: Vec<String>,
}

/// Builder for [`FormSchema`]
#[derive(Debug)]
pub struct FormSchemaBuilder {
    name: String,
    fields: Vec<(String, FieldSchema)>,
    refinements: Vec<Refinement>,
}

impl FormSchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Checks the definition and freezes it.
    ///
    /// # Errors
    ///
    /// - empty form or field name
    /// - a field declared twice
    /// - a refinement referencing an undeclared field
    pub fn build(self) -> SchemaResult<FormSchema> {
        if self.name.trim().is_empty() {
            return Err(SchemaDefinitionError::EmptyFormName);
        }

        for (i, (name, _)) in self.fields.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaDefinitionError::EmptyFieldName {
                    form: self.name.clone(),
                });
            }
            if self.fields[..i].iter().any(|(other, _)| other == name) {
                return Err(SchemaDefinitionError::DuplicateField {
                    form: self.name.clone(),
                    field: name.clone(),
                });
            }
        }

        for refinement in &self.refinements {
            for field in refinement.references() {
                if !self.fields.iter().any(|(name, _)| name == field) {
                    return Err(SchemaDefinitionError::UnknownRefinementField {
                        form: self.name.clone(),
                        refinement: refinement.name().to_string(),
                        field: field.clone(),
                    });
                }
            }
        }

        Ok(FormSchema {
            name: self.name,
            fields: self.fields,
            refinements: self.refinements,
        })
    }
}
