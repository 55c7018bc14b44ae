//! Cross-field refinement rules
//!
//! A refinement is a pure function over the fully parsed form that returns
//! zero or more issues. Each refinement declares the fields it reads so the
//! form builder can reject references to undeclared fields.

use std::fmt;

use super::types::{FieldIssue, FormValues};

type Check = Box<dyn Fn(&FormValues) -> Vec<FieldIssue> + Send + Sync>;

/// Named cross-field rule
pub struct Refinement {
    name: String,
    fields: Vec<String>,
    check: Check,
}

impl Refinement {
    /// Creates a refinement reading `fields`
    pub fn new<F>(name: impl Into<String>, fields: &[&str], check: F) -> Self
    where
        F: Fn(&FormValues) -> Vec<FieldIssue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names this refinement reads or reports against
    pub fn references(&self) -> &[String] {
        &self.fields
    }

    pub fn check(&self, values: &FormValues) -> Vec<FieldIssue> {
        (self.check)(values)
    }

    /// `target` must be present unless `discriminator` equals `sentinel`
    pub fn required_unless(
        target: &str,
        discriminator: &str,
        sentinel: &str,
        message: impl Into<String>,
    ) -> Self {
        let (t, d, s, message) = owned(target, discriminator, sentinel, message);
        Self::new(
            format!("{}_required_unless_{}", target, sentinel),
            &[target, discriminator],
            move |values| {
                if values.text(&d) != Some(s.as_str()) && !values.is_present(&t) {
                    vec![FieldIssue::new(&t, &message)]
                } else {
                    Vec::new()
                }
            },
        )
    }

    /// `target` must be present when `discriminator` equals `sentinel`
    pub fn required_when(
        target: &str,
        discriminator: &str,
        sentinel: &str,
        message: impl Into<String>,
    ) -> Self {
        let (t, d, s, message) = owned(target, discriminator, sentinel, message);
        Self::new(
            format!("{}_required_when_{}", target, sentinel),
            &[target, discriminator],
            move |values| {
                if values.text(&d) == Some(s.as_str()) && !values.is_present(&t) {
                    vec![FieldIssue::new(&t, &message)]
                } else {
                    Vec::new()
                }
            },
        )
    }

    /// `target` must be present when every field in `others` is present
    pub fn required_when_all_present(
        target: &str,
        others: &[&str],
        message: impl Into<String>,
    ) -> Self {
        let t = target.to_string();
        let deps: Vec<String> = others.iter().map(|o| o.to_string()).collect();
        let message = message.into();
        let mut fields = vec![target];
        fields.extend_from_slice(others);

        Self::new(
            format!("{}_required_with_{}", target, others.join("_")),
            &fields,
            move |values| {
                let all_present = deps.iter().all(|d| values.is_present(d));
                if all_present && !values.is_present(&t) {
                    vec![FieldIssue::new(&t, &message)]
                } else {
                    Vec::new()
                }
            },
        )
    }

    /// `target` must be present unless the `flag` checkbox is checked
    pub fn required_unless_checked(target: &str, flag: &str, message: impl Into<String>) -> Self {
        let t = target.to_string();
        let f = flag.to_string();
        let message = message.into();
        Self::new(
            format!("{}_required_unless_{}", target, flag),
            &[target, flag],
            move |values| {
                if !values.flag(&f) && !values.is_present(&t) {
                    vec![FieldIssue::new(&t, &message)]
                } else {
                    Vec::new()
                }
            },
        )
    }

    /// `target` must equal `other` when both are present
    pub fn fields_match(target: &str, other: &str, message: impl Into<String>) -> Self {
        let t = target.to_string();
        let o = other.to_string();
        let message = message.into();
        Self::new(
            format!("{}_matches_{}", target, other),
            &[target, other],
            move |values| match (values.get(&t), values.get(&o)) {
                (Some(a), Some(b)) if a != b => vec![FieldIssue::new(&t, &message)],
                _ => Vec::new(),
            },
        )
    }

    /// Date `target` must not fall before date `other` when both are present
    pub fn date_not_before(target: &str, other: &str, message: impl Into<String>) -> Self {
        let t = target.to_string();
        let o = other.to_string();
        let message = message.into();
        Self::new(
            format!("{}_not_before_{}", target, other),
            &[target, other],
            move |values| match (values.date(&t), values.date(&o)) {
                (Some(end), Some(start)) if end < start => vec![FieldIssue::new(&t, &message)],
                _ => Vec::new(),
            },
        )
    }
}

fn owned(
    target: &str,
    discriminator: &str,
    sentinel: &str,
    message: impl Into<String>,
) -> (String, String, String, String) {
    (
        target.to_string(),
        discriminator.to_string(),
        sentinel.to_string(),
        message.into(),
    )
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
