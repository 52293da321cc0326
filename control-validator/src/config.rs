//! Configuration types for control validation.
//!
//! Split into the check itself (which fields, how to report them) and the
//! filesystem source (where documents come from). The check does not know
//! about directories.

use std::path::PathBuf;

use crate::fields::RequiredFieldSet;

/// Default scan root, resolved against the working directory.
pub const DEFAULT_ROOT: &str = "framework";

/// How many missing fields a single file reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum MissingFieldMode {
    /// List every required field the document lacks (default).
    #[default]
    All,
    /// Stop at the first missing field, in required-field order.
    FirstOnly,
}

/// Check configuration, independent of where documents come from.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Keys every document must contain.
    pub required_fields: RequiredFieldSet,
    /// Whether to enumerate all missing fields or only the first.
    pub missing_field_mode: MissingFieldMode,
}

/// Filesystem source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Roots to scan (directories or single files). Must be non-empty.
    /// A root that does not exist contributes no files.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the path and the file name.
    pub exclude: Vec<String>,
    /// File extensions (without the dot) treated as control documents.
    pub extensions: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(DEFAULT_ROOT)],
            exclude: Vec::new(),
            extensions: vec!["yaml".to_owned(), "yml".to_owned()],
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}
