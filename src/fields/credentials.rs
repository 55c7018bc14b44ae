//! Password fields

use crate::schema::{Constraint, FieldSchema, SchemaResult};

pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

/// New password with strength rules. Not trimmed.
pub fn password() -> SchemaResult<FieldSchema> {
    FieldSchema::text("Password")
        .required_message(PASSWORD_REQUIRED)
        .rule(
            Constraint::Length {
                min: Some(PASSWORD_MIN_LEN),
                max: None,
            },
            format!("Password must be at least {} characters", PASSWORD_MIN_LEN),
        )
        .rule(
            Constraint::Length {
                min: None,
                max: Some(PASSWORD_MAX_LEN),
            },
            format!("Password must be {} characters or fewer", PASSWORD_MAX_LEN),
        )
        .pattern("[A-Z]", "Password must contain at least one uppercase letter")
        .pattern("[a-z]", "Password must contain at least one lowercase letter")
        .pattern("[0-9]", "Password must contain at least one number")
        .pattern(
            "[^A-Za-z0-9]",
            "Password must contain at least one special character",
        )
        .build()
}

/// Existing password at sign-in: only presence is checked
pub fn login_password() -> SchemaResult<FieldSchema> {
    FieldSchema::text("Password")
        .required_message(PASSWORD_REQUIRED)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldValue;
    use serde_json::json;

    #[test]
    fn test_strong_password_passes_untrimmed() {
        let field = password().unwrap();
        assert_eq!(
            field.validate(Some(&json!(" Secr3t!pass"))),
            Ok(Some(FieldValue::Text(" Secr3t!pass".into())))
        );
    }

    #[test]
    fn test_each_strength_rule() {
        let field = password().unwrap();
        let cases = [
            ("Sh0rt!", "Password must be at least 8 characters"),
            ("lowercase1!", "Password must contain at least one uppercase letter"),
            ("UPPERCASE1!", "Password must contain at least one lowercase letter"),
            ("NoDigits!!", "Password must contain at least one number"),
            ("NoSpecial1", "Password must contain at least one special character"),
        ];
        for (input, message) in cases {
            assert_eq!(
                field.validate(Some(&json!(input))),
                Err(message.to_string()),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_login_password_only_requires_presence() {
        let field = login_password().unwrap();
        assert!(field.validate(Some(&json!("x"))).is_ok());
        assert_eq!(field.validate(Some(&json!(""))), Err(PASSWORD_REQUIRED.into()));
    }
}
