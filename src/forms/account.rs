//! Sign-in and account creation forms

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields;
use crate::schema::{FormSchema, FormValues, Refinement, SchemaResult, ValidationErrors};

pub const LOGIN: &str = "login";
pub const ACCOUNT: &str = "account";

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Validated sign-in request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSubmission {
    pub email: String,
    pub password: String,
}

impl LoginSubmission {
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationErrors> {
        Ok(Self {
            email: values.require_text("email")?,
            password: values.require_text("password")?,
        })
    }
}

/// Validated account creation request. The confirmation is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSubmission {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AccountSubmission {
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationErrors> {
        Ok(Self {
            name: values.require_text("name")?,
            email: values.require_text("email")?,
            password: values.require_text("password")?,
        })
    }
}

pub fn login_schema() -> SchemaResult<FormSchema> {
    FormSchema::builder(LOGIN)
        .field("email", fields::email()?)
        .field("password", fields::login_password()?)
        .build()
}

pub fn account_schema() -> SchemaResult<FormSchema> {
    FormSchema::builder(ACCOUNT)
        .field("name", fields::person_name("Name")?)
        .field("email", fields::email()?)
        .field("password", fields::password()?)
        .field(
            "confirmPassword",
            fields::login_password()?.with_required_message("Please confirm your password"),
        )
        .refine(Refinement::fields_match(
            "confirmPassword",
            "password",
            PASSWORDS_DO_NOT_MATCH,
        ))
        .build()
}

pub fn parse_login(schema: &FormSchema, input: &Value) -> Result<LoginSubmission, ValidationErrors> {
    LoginSubmission::from_values(&schema.parse(input)?)
}

pub fn parse_account(
    schema: &FormSchema,
    input: &Value,
) -> Result<AccountSubmission, ValidationErrors> {
    AccountSubmission::from_values(&schema.parse(input)?)
}
