//! Person-identifying fields: email, phone, names

use crate::schema::{Constraint, FieldSchema, Normalizer, SchemaResult};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_TOO_LONG: &str = "Email must be 255 characters or fewer";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const EMAIL_MAX_LEN: usize = 255;

pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Phone number must be exactly 10 digits";

pub const NAME_MAX_LEN: usize = 50;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[0-9]{10}$";
const NAME_PATTERN: &str = r"^[\p{L}\s'-]+$";

/// Required email address, trimmed and lowercased
pub fn email() -> SchemaResult<FieldSchema> {
    FieldSchema::text("Email")
        .normalize(Normalizer::Trim)
        .normalize(Normalizer::Lowercase)
        .required_message(EMAIL_REQUIRED)
        .type_message(EMAIL_INVALID)
        .rule(
            Constraint::Length {
                min: None,
                max: Some(EMAIL_MAX_LEN),
            },
            EMAIL_TOO_LONG,
        )
        .pattern(EMAIL_PATTERN, EMAIL_INVALID)
        .build()
}

/// Required 10-digit phone number; common formatting characters are stripped
pub fn phone() -> SchemaResult<FieldSchema> {
    FieldSchema::text("Phone number")
        .normalize(Normalizer::Trim)
        .normalize(Normalizer::StripPhoneFormatting)
        .required_message(PHONE_REQUIRED)
        .type_message(PHONE_INVALID)
        .pattern(PHONE_PATTERN, PHONE_INVALID)
        .build()
}

/// Required person name: 1-50 letters, spaces, hyphens or apostrophes
pub fn person_name(label: &str) -> SchemaResult<FieldSchema> {
    FieldSchema::text(label)
        .normalize(Normalizer::Trim)
        .rule(
            Constraint::Length {
                min: Some(1),
                max: Some(NAME_MAX_LEN),
            },
            format!("{} must be {} characters or fewer", label, NAME_MAX_LEN),
        )
        .pattern(
            NAME_PATTERN,
            format!(
                "{} can only contain letters, spaces, hyphens, and apostrophes",
                label
            ),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldValue;
    use serde_json::json;

    fn text(s: &str) -> Option<FieldValue> {
        Some(FieldValue::Text(s.to_string()))
    }

    #[test]
    fn test_email_normalizes() {
        let field = email().unwrap();
        assert_eq!(
            field.validate(Some(&json!("  User@EXAMPLE.COM "))),
            Ok(text("user@example.com"))
        );
    }

    #[test]
    fn test_email_rejections() {
        let field = email().unwrap();
        assert_eq!(field.validate(None), Err(EMAIL_REQUIRED.to_string()));
        assert_eq!(
            field.validate(Some(&json!("not-an-email"))),
            Err(EMAIL_INVALID.to_string())
        );
        assert_eq!(
            field.validate(Some(&json!("a b@c.de"))),
            Err(EMAIL_INVALID.to_string())
        );

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            field.validate(Some(&json!(long))),
            Err(EMAIL_TOO_LONG.to_string())
        );
    }

    #[test]
    fn test_phone_strips_formatting() {
        let field = phone().unwrap();
        assert_eq!(
            field.validate(Some(&json!("(555) 123-4567"))),
            Ok(text("5551234567"))
        );
        assert_eq!(
            field.validate(Some(&json!("555.123.4567"))),
            Ok(text("5551234567"))
        );
    }

    #[test]
    fn test_phone_requires_ten_digits() {
        let field = phone().unwrap();
        for bad in ["555123456", "55512345678", "555-abc-4567"] {
            assert_eq!(
                field.validate(Some(&json!(bad))),
                Err(PHONE_INVALID.to_string()),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_person_name() {
        let field = person_name("First name").unwrap();
        assert_eq!(field.validate(Some(&json!("  Mary-Jane "))), Ok(text("Mary-Jane")));
        assert_eq!(field.validate(Some(&json!("O'Brien"))), Ok(text("O'Brien")));
        assert_eq!(field.validate(Some(&json!("José"))), Ok(text("José")));
        assert_eq!(
            field.validate(Some(&json!("R2D2"))),
            Err("First name can only contain letters, spaces, hyphens, and apostrophes".into())
        );
        assert_eq!(
            field.validate(Some(&json!("a".repeat(51)))),
            Err("First name must be 50 characters or fewer".into())
        );
        assert_eq!(
            field.validate(Some(&json!(""))),
            Err("First name is required".into())
        );
    }
}
