//! Error types for the diff crate.

use serde_json::Value;

/// Errors that can occur during comparison calls.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Serialized tree text was not well-formed.
    #[error("failed to parse tree `{side}`: {message}")]
    Parse { side: String, message: String },

    /// A required argument was missing or had the wrong shape.
    #[error("argument `{field}` must be {expected}, got {actual}")]
    Type {
        field: String,
        expected: String,
        actual: String,
    },

    /// Configuration could not be read or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A result could not be converted to its JSON form.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DiffError {
    pub(crate) fn missing(field: &str, expected: &str) -> Self {
        Self::Type {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: "nothing".to_string(),
        }
    }

    pub(crate) fn mismatch(field: &str, expected: &str, actual: &Value) -> Self {
        Self::Type {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: value_kind(actual).to_string(),
        }
    }
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
