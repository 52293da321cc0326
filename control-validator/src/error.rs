//! Error types for control validation.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The kind of failure that prevented a document from being checked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckErrorKind {
    /// The file could not be opened or read.
    Io,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The content is not syntactically valid YAML.
    YamlParse,
    /// The content is not syntactically valid JSON.
    JsonParse,
    /// The file contains no YAML document at all.
    EmptyDocument,
    /// The file is a stream of more than one YAML document.
    MultipleDocuments,
    /// The top-level value is a scalar or a sequence instead of a mapping.
    NotAMapping,
}

/// A per-file failure: the document could not be loaded as a key-value mapping.
///
/// This is an outcome, not an abort. The run records it against the file and
/// moves on to the next one.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[error("{message}")]
#[non_exhaustive]
pub struct CheckError {
    /// The kind of failure.
    pub kind: CheckErrorKind,
    /// Human-readable description, including the underlying cause.
    pub message: String,
}

impl CheckError {
    #[must_use]
    pub fn new(kind: CheckErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A run-level failure while enumerating candidate files.
///
/// Unlike [`CheckError`], this ends the run: the set of documents is unknown.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// Directory traversal failed (permission denied, symlink loop, ...).
    #[error("directory traversal failed at {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// An exclude glob could not be compiled.
    #[error("invalid exclude glob pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_error_displays_message() {
        let err = CheckError::new(CheckErrorKind::YamlParse, "YAML parse error: bad indent");
        assert_eq!(err.to_string(), "YAML parse error: bad indent");
        assert_eq!(err.kind, CheckErrorKind::YamlParse);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_invalid_pattern_display() {
        let source = glob::Pattern::new("[").unwrap_err();
        let err = DiscoveryError::InvalidExcludePattern {
            pattern: "[".to_owned(),
            source,
        };
        assert!(err.to_string().starts_with("invalid exclude glob pattern '['"));
    }
}
