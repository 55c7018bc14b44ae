//! Contact form
//!
//! Who the visitor says they are (`iAmA`) decides which other fields are
//! required:
//! - email is required for everyone except casual users
//! - location is required for recruiters
//! - a preferred contact method is required once both email and phone are given

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields;
use crate::schema::{FormSchema, FormValues, Refinement, SchemaResult, ValidationErrors};

pub const NAME: &str = "contact";

pub const EMAIL_REQUIRED_FOR_USER: &str = "Email is required for this user type";
pub const LOCATION_REQUIRED_FOR_RECRUITERS: &str =
    "Location (city, state) is required for recruiters";
pub const CONTACT_METHOD_REQUIRED: &str = "Please select your preferred contact method";
pub const POLICIES_REQUIRED: &str = "You must accept the privacy policy and terms of use";

pub const MESSAGE_MIN_LEN: usize = 20;
pub const MESSAGE_MAX_LEN: usize = 2000;

/// Who is reaching out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserContext {
    Recruiter,
    HiringManager,
    BusinessOwner,
    Developer,
    CasualUser,
}

impl UserContext {
    pub const ALL: [UserContext; 5] = [
        UserContext::Recruiter,
        UserContext::HiringManager,
        UserContext::BusinessOwner,
        UserContext::Developer,
        UserContext::CasualUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserContext::Recruiter => "recruiter",
            UserContext::HiringManager => "hiring-manager",
            UserContext::BusinessOwner => "business-owner",
            UserContext::Developer => "developer",
            UserContext::CasualUser => "casual-user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the visitor prefers to be contacted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
}

impl ContactMethod {
    pub const ALL: [ContactMethod; 2] = [ContactMethod::Email, ContactMethod::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

/// Validated contact submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub i_am_a: UserContext,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<ContactMethod>,
    pub message: String,
    pub accepted_policies: bool,
}

impl ContactSubmission {
    /// Builds the typed submission from values the contact schema accepted
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationErrors> {
        let i_am_a = values
            .text("iAmA")
            .and_then(UserContext::parse)
            .ok_or_else(|| ValidationErrors::single("iAmA", "Please select who you are"))?;

        Ok(Self {
            i_am_a,
            first_name: values.require_text("firstName")?,
            last_name: values.require_text("lastName")?,
            email: values.text("email").map(str::to_string),
            phone: values.text("phone").map(str::to_string),
            location: values.text("location").map(str::to_string),
            preferred_contact_method: values
                .text("preferredContactMethod")
                .and_then(ContactMethod::parse),
            message: values.require_text("message")?,
            accepted_policies: values.flag("acceptedPolicies"),
        })
    }
}

/// Builds the contact form schema
pub fn schema() -> SchemaResult<FormSchema> {
    let contexts: Vec<&str> = UserContext::ALL.iter().map(|c| c.as_str()).collect();
    let methods: Vec<&str> = ContactMethod::ALL.iter().map(|m| m.as_str()).collect();

    FormSchema::builder(NAME)
        .field(
            "iAmA",
            fields::radio("User type", &contexts)?
                .with_required_message("Please select who you are"),
        )
        .field("firstName", fields::person_name("First name")?)
        .field("lastName", fields::person_name("Last name")?)
        .field("email", fields::email()?.into_optional())
        .field("phone", fields::phone()?.into_optional())
        .field("location", fields::text("Location", 2, 100)?.into_optional())
        .field(
            "preferredContactMethod",
            fields::radio("Contact method", &methods)?.into_optional(),
        )
        .field(
            "message",
            fields::text("Message", MESSAGE_MIN_LEN, MESSAGE_MAX_LEN)?,
        )
        .field("acceptedPolicies", fields::consent(POLICIES_REQUIRED)?)
        .refine(Refinement::required_unless(
            "email",
            "iAmA",
            UserContext::CasualUser.as_str(),
            EMAIL_REQUIRED_FOR_USER,
        ))
        .refine(Refinement::required_when(
            "location",
            "iAmA",
            UserContext::Recruiter.as_str(),
            LOCATION_REQUIRED_FOR_RECRUITERS,
        ))
        .refine(Refinement::required_when_all_present(
            "preferredContactMethod",
            &["email", "phone"],
            CONTACT_METHOD_REQUIRED,
        ))
        .build()
}

/// Validates a raw submission into a [`ContactSubmission`]
pub fn parse(schema: &FormSchema, input: &Value) -> Result<ContactSubmission, ValidationErrors> {
    let values = schema.parse(input)?;
    ContactSubmission::from_values(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_context_round_trip_names() {
        for context in UserContext::ALL {
            assert_eq!(UserContext::parse(context.as_str()), Some(context));
            assert_eq!(
                serde_json::to_value(context).unwrap(),
                json!(context.as_str())
            );
        }
        assert_eq!(UserContext::parse("student"), None);
    }

    #[test]
    fn test_schema_builds() {
        let schema = schema().unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(
            names,
            vec![
                "iAmA",
                "firstName",
                "lastName",
                "email",
                "phone",
                "location",
                "preferredContactMethod",
                "message",
                "acceptedPolicies"
            ]
        );
        assert_eq!(schema.refinements().len(), 3);
    }

    #[test]
    fn test_missing_user_type() {
        let schema = schema().unwrap();
        let errors = parse(
            &schema,
            &json!({
                "firstName": "John",
                "lastName": "Doe",
                "message": "Hello there, nice portfolio!",
                "acceptedPolicies": true
            }),
        )
        .unwrap_err();
        assert_eq!(errors.messages_for("iAmA"), vec!["Please select who you are"]);
    }

    #[test]
    fn test_typed_submission_serializes_camel_case() {
        let schema = schema().unwrap();
        let submission = parse(
            &schema,
            &json!({
                "iAmA": "developer",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ADA@example.com",
                "message": "Let's collaborate on something!",
                "acceptedPolicies": "on"
            }),
        )
        .unwrap();

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["iAmA"], "developer");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["acceptedPolicies"], true);
        assert!(json.get("phone").is_none());
    }
}
