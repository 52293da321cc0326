//! Format-specific loaders that turn file content into a [`Document`].
//!
//! - `yaml`: single-document YAML via `serde-saphyr`
//! - `json`: JSON via `serde_json`
//!
//! Both produce the same in-memory shape so the field check is format-agnostic.

pub mod json;
pub mod yaml;

use serde_json::{Map, Value};

use crate::error::{CheckError, CheckErrorKind};

/// A parsed control: top-level field name to arbitrary structured value.
pub type Document = Map<String, Value>;

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Accept a parsed value only if it is a key-value mapping.
///
/// # Errors
///
/// Returns a [`CheckErrorKind::NotAMapping`] error naming the actual kind of value.
pub fn into_document(value: Value) -> Result<Document, CheckError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CheckError::new(
            CheckErrorKind::NotAMapping,
            format!(
                "expected a mapping at the top level, found {}",
                kind_name(&other)
            ),
        )),
    }
}
