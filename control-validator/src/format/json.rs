//! JSON control loader.

use serde_json::Value;

use crate::error::{CheckError, CheckErrorKind};
use crate::format::{Document, into_document};

/// Parse JSON content into a [`Document`].
///
/// # Errors
///
/// Returns a [`CheckError`] if the content is not valid JSON or the top-level
/// value is not an object.
pub fn parse_json_document(content: &str) -> Result<Document, CheckError> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        CheckError::new(CheckErrorKind::JsonParse, format!("JSON parse error: {e}"))
    })?;
    into_document(value)
}
