//! Form registry
//!
//! Holds every form schema the site serves, built once at startup. A
//! definition error in any built-in form aborts construction.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::schema::{
    FormDescription, FormSchema, FormValues, SchemaDefinitionError, SchemaResult,
    ValidationErrors,
};

use super::{account, contact, resume};

/// Immutable set of named form schemas
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: BTreeMap<String, FormSchema>,
}

impl FormRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry holding every built-in form
    pub fn with_builtin_forms() -> SchemaResult<Self> {
        let mut registry = Self::new();
        registry.register(contact::schema()?)?;
        registry.register(account::login_schema()?)?;
        registry.register(account::account_schema()?)?;
        registry.register(resume::skill_schema()?)?;
        registry.register(resume::experience_schema()?)?;

        info!(forms = registry.len(), "form registry ready");
        Ok(registry)
    }

    /// Adds a form.
    ///
    /// # Errors
    ///
    /// `DuplicateForm` if the name is taken.
    pub fn register(&mut self, schema: FormSchema) -> SchemaResult<()> {
        if self.forms.contains_key(schema.name()) {
            return Err(SchemaDefinitionError::DuplicateForm {
                form: schema.name().to_string(),
            });
        }
        debug!(form = %schema.name(), "registered form");
        self.forms.insert(schema.name().to_string(), schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FormSchema> {
        self.forms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forms.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Validates `input` against the named form; `None` if the form is unknown
    pub fn validate(
        &self,
        name: &str,
        input: &Value,
    ) -> Option<Result<FormValues, ValidationErrors>> {
        self.get(name).map(|schema| schema.parse(input))
    }

    /// Descriptions of every form, sorted by name
    pub fn describe(&self) -> Vec<FormDescription> {
        self.forms.values().map(FormSchema::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_forms_build() {
        let registry = FormRegistry::with_builtin_forms().unwrap();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["account", "contact", "experience", "login", "skill"]
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = FormRegistry::new();
        registry.register(account::login_schema().unwrap()).unwrap();
        let err = registry
            .register(account::login_schema().unwrap())
            .unwrap_err();
        assert_eq!(err.code(), "FORM_DUPLICATE_FORM");
    }

    #[test]
    fn test_validate_unknown_form() {
        let registry = FormRegistry::with_builtin_forms().unwrap();
        assert!(registry.validate("newsletter", &json!({})).is_none());
        assert!(matches!(
            registry.validate("login", &json!({})),
            Some(Err(_))
        ));
    }

    #[test]
    fn test_describe_covers_all_forms() {
        let registry = FormRegistry::with_builtin_forms().unwrap();
        let descriptions = registry.describe();
        assert_eq!(descriptions.len(), registry.len());
        let contact = descriptions.iter().find(|d| d.name == "contact").unwrap();
        assert_eq!(contact.refinements.len(), 3);
    }
}
