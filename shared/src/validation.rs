//! Input coercion and validation rules
//!
//! Request bodies arrive as loosely typed JSON. Numeric fields accept JSON
//! numbers and numeric strings, which is what the web forms send.

use serde_json::{Map, Value};
use thiserror::Error;

/// A field-level problem with a request body
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("could not convert {field} to float: {value}")]
    NotNumeric { field: String, value: String },

    #[error("{field} must be a string")]
    NotText { field: String },
}

/// Coerce a JSON value to a finite `f64`
pub fn coerce_f64(field: &str, value: &Value) -> Result<f64, FieldError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite());

    parsed.ok_or_else(|| FieldError::NotNumeric {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Read and coerce a required numeric field from a JSON object
pub fn require_f64(body: &Map<String, Value>, field: &str) -> Result<f64, FieldError> {
    let value = body
        .get(field)
        .ok_or_else(|| FieldError::Missing(vec![field.to_string()]))?;
    coerce_f64(field, value)
}

/// Read a required string field from a JSON object
pub fn require_text(body: &Map<String, Value>, field: &str) -> Result<String, FieldError> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(FieldError::NotText {
            field: field.to_string(),
        }),
        None => Err(FieldError::Missing(vec![field.to_string()])),
    }
}

/// Names from `required` that are absent from `body`, in `required` order
pub fn missing_fields(body: &Map<String, Value>, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !body.contains_key(**key))
        .map(|key| key.to_string())
        .collect()
}

/// Fail with every missing field at once
pub fn ensure_fields(body: &Map<String, Value>, required: &[&str]) -> Result<(), FieldError> {
    let missing = missing_fields(body, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FieldError::Missing(missing))
    }
}

/// Remove emphasis markup (`*`) from model output
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| *c != '*').collect()
}

/// Validate a language code such as `en`, `te` or `te-IN`
pub fn validate_language_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 || code.len() > 10 {
        return Err("Language code must be 2-10 characters");
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return Err("Language code must contain only letters and '-'");
    }
    Ok(())
}
