//! Form Catalog Tests
//!
//! The non-contact forms and the registry that serves them:
//! - Account creation with password strength and confirmation
//! - Skill and experience entries for the resume section
//! - Registry listing and lookup

use chrono::NaiveDate;
use folio_forms::fields::PASSWORD_REQUIRED;
use folio_forms::forms::account::{self, PASSWORDS_DO_NOT_MATCH};
use folio_forms::forms::resume::{self, END_BEFORE_START, END_DATE_REQUIRED};
use folio_forms::forms::FormRegistry;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn account_input(password: &str, confirm: &str) -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "Grace@Navy.mil",
        "password": password,
        "confirmPassword": confirm,
    })
}

fn experience_input(start: &str, end: Option<&str>, current: bool) -> Value {
    let mut value = json!({
        "title": "Staff Engineer",
        "company": "Initech",
        "startDate": start,
        "current": current,
    });
    if let Some(end) = end {
        value["endDate"] = json!(end);
    }
    value
}

// =============================================================================
// Account Tests
// =============================================================================

#[test]
fn test_account_accepts_strong_matching_password() {
    let schema = account::account_schema().unwrap();
    let submission =
        account::parse_account(&schema, &account_input("C0bol!Rules", "C0bol!Rules")).unwrap();
    assert_eq!(submission.email, "grace@navy.mil");
    assert_eq!(submission.password, "C0bol!Rules");
}

#[test]
fn test_account_mismatched_confirmation() {
    let schema = account::account_schema().unwrap();
    let errors = schema
        .parse(&account_input("C0bol!Rules", "C0bol!Rulez"))
        .unwrap_err();
    assert_eq!(errors.messages_for("confirmPassword"), vec![PASSWORDS_DO_NOT_MATCH]);
    assert_eq!(errors.len(), 1);
}

/// A weak password reports its first unmet requirement only.
#[test]
fn test_weak_password_single_issue() {
    let schema = account::account_schema().unwrap();
    let errors = schema.parse(&account_input("password", "password")).unwrap_err();
    assert_eq!(
        errors.messages_for("password"),
        vec!["Password must contain at least one uppercase letter"]
    );
    assert!(!errors.contains_message(PASSWORDS_DO_NOT_MATCH));
}

#[test]
fn test_login_requires_password() {
    let schema = account::login_schema().unwrap();
    let errors = schema.parse(&json!({"email": "a@b.co"})).unwrap_err();
    assert_eq!(errors.messages_for("password"), vec![PASSWORD_REQUIRED]);
}

// =============================================================================
// Resume Tests
// =============================================================================

#[test]
fn test_skill_entry() {
    let schema = resume::skill_schema().unwrap();
    let skill = resume::parse_skill(
        &schema,
        &json!({
            "name": "Rust",
            "category": "backend",
            "proficiency": "8",
            "color": "#dea584",
            "tags": ["systems", "", "async"],
        }),
    )
    .unwrap();
    assert_eq!(skill.proficiency, 8.0);
    assert_eq!(skill.tags, vec!["systems", "async"]);
}

#[test]
fn test_skill_limits() {
    let schema = resume::skill_schema().unwrap();
    let errors = schema
        .parse(&json!({
            "name": "Rust",
            "category": "embedded",
            "proficiency": 11,
            "tags": ["a", "b", "c", "d", "e", "f"],
        }))
        .unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.messages_for("category").len(), 1);
    assert_eq!(errors.messages_for("proficiency").len(), 1);
    assert_eq!(errors.messages_for("tags").len(), 1);
}

#[test]
fn test_current_role_needs_no_end_date() {
    let schema = resume::experience_schema().unwrap();
    let entry =
        resume::parse_experience(&schema, &experience_input("2021-03-01", None, true)).unwrap();
    assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
    assert_eq!(entry.end_date, None);
    assert!(entry.current);
}

#[test]
fn test_past_role_needs_end_date() {
    let schema = resume::experience_schema().unwrap();
    let errors = schema
        .parse(&experience_input("2021-03-01", None, false))
        .unwrap_err();
    assert_eq!(errors.messages_for("endDate"), vec![END_DATE_REQUIRED]);
}

#[test]
fn test_end_date_not_before_start() {
    let schema = resume::experience_schema().unwrap();
    let errors = schema
        .parse(&experience_input("2021-03-01", Some("2020-12-31"), false))
        .unwrap_err();
    assert_eq!(errors.messages_for("endDate"), vec![END_BEFORE_START]);

    assert!(schema
        .parse(&experience_input("2021-03-01", Some("2021-03-01"), false))
        .is_ok());
}

#[test]
fn test_malformed_date() {
    let schema = resume::experience_schema().unwrap();
    let errors = schema
        .parse(&experience_input("03/01/2021", None, true))
        .unwrap_err();
    assert_eq!(errors.issues()[0].path, "startDate");
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_registry_lists_builtin_forms() {
    let registry = FormRegistry::with_builtin_forms().unwrap();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["account", "contact", "experience", "login", "skill"]);

    let described = registry.describe();
    let contact = described.iter().find(|f| f.name == "contact").unwrap();
    assert_eq!(contact.refinements.len(), 3);
}

#[test]
fn test_registry_unknown_form() {
    let registry = FormRegistry::with_builtin_forms().unwrap();
    assert!(registry.validate("newsletter", &json!({})).is_none());
}
