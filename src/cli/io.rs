//! JSON I/O handling for CLI
//!
//! - Input: one JSON document from a file or stdin
//! - Output: one JSON object on stdout, `status` is "ok" or "invalid"

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::schema::ValidationErrors;

/// Read a JSON document from `path`, or stdin when `None`
pub fn read_json(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty input",
        )));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Build the success envelope
pub fn ok_envelope<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(serde_json::json!({
        "status": "ok",
        "data": serde_json::to_value(data)?,
    }))
}

/// Build the validation failure envelope
pub fn invalid_envelope(errors: &ValidationErrors) -> Value {
    serde_json::json!({
        "status": "invalid",
        "errors": errors,
    })
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_value(&ok_envelope(data)?)
}

/// Write a validation failure to stdout
pub fn write_invalid(errors: &ValidationErrors) -> CliResult<()> {
    write_value(&invalid_envelope(errors))
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldValue, FormValues};
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_json_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"email": "a@b.co"}}"#).unwrap();
        let value = read_json(Some(file.path())).unwrap();
        assert_eq!(value, json!({"email": "a@b.co"}));
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(read_json(Some(file.path())), Err(CliError::Io(_))));
    }

    #[test]
    fn test_ok_envelope_keeps_field_order() {
        let mut values = FormValues::new();
        values.insert("userType", FieldValue::Text("developer".into()));
        values.insert("email", FieldValue::Text("a@b.co".into()));
        let ok = ok_envelope(&values).unwrap();
        assert_eq!(
            ok.to_string(),
            r#"{"status":"ok","data":{"userType":"developer","email":"a@b.co"}}"#
        );
    }

    #[test]
    fn test_envelopes() {
        let ok = ok_envelope(&json!({"a": 1})).unwrap();
        assert_eq!(ok, json!({"status": "ok", "data": {"a": 1}}));

        let errors = ValidationErrors::single("email", "Email is required");
        assert_eq!(
            invalid_envelope(&errors),
            json!({
                "status": "invalid",
                "errors": [{"path": "email", "message": "Email is required"}]
            })
        );
    }
}
