//! # control-validator
//!
//! Batch validator for compliance control documents.
//!
//! Every YAML file under the scan roots (by default `framework/`) must parse
//! as a single mapping containing the required top-level keys `control_id`,
//! `control_name`, `pillar` and `description`. Each file yields exactly one
//! [`ValidationResult`]; read and parse failures are results too, never aborts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use control_validator::{validate_fs, FsSourceConfig, ValidationConfig};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("framework")];
//!
//! let report = validate_fs(&fs_config, &ValidationConfig::default()).unwrap();
//! println!("{}/{} controls are valid", report.summary.valid, report.summary.total);
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod fields;
mod format;
pub mod output;
mod report;
mod strategy;
mod validator;

pub use config::{DEFAULT_ROOT, FsSourceConfig, MissingFieldMode, ValidationConfig};
pub use error::{CheckError, CheckErrorKind, DiscoveryError};
pub use fields::{DEFAULT_REQUIRED_FIELDS, RequiredFieldSet};
pub use format::Document;
pub use report::{RunSummary, ValidationReport, ValidationResult, Verdict};
pub use validator::{check_document, missing_fields, validate_file};

use tracing::{debug, info};

use strategy::fs::find_files;

/// Validate control documents on disk.
///
/// Equivalent to [`validate_fs_with`] with a sink that ignores results.
///
/// # Errors
///
/// See [`validate_fs_with`].
pub fn validate_fs(
    fs_config: &FsSourceConfig,
    validation_config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    validate_fs_with(fs_config, validation_config, |_| Ok(()))
}

/// Validate control documents on disk, handing each result to `on_result`
/// as soon as its file has been checked.
///
/// Files are processed one at a time and all of them are checked regardless
/// of earlier failures. Returns `Ok` with an empty, passing report if the
/// roots contain no matching files.
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty, if discovery fails
/// (bad exclude pattern, traversal error), or if `on_result` fails.
/// Per-file read and parse failures are never errors here: they are
/// reported as [`Verdict::Error`].
pub fn validate_fs_with<F>(
    fs_config: &FsSourceConfig,
    validation_config: &ValidationConfig,
    mut on_result: F,
) -> anyhow::Result<ValidationReport>
where
    F: FnMut(&ValidationResult) -> anyhow::Result<()>,
{
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for validation");
    }

    let files = find_files(fs_config)?;
    debug!(count = files.len(), "discovered control documents");

    let mut results = Vec::with_capacity(files.len());
    for file_path in &files {
        let result = validate_file(file_path, fs_config, validation_config);
        debug!(file = %result.file.display(), verdict = %result.verdict, "checked");
        on_result(&result)?;
        results.push(result);
    }

    let report = ValidationReport::from_results(results);
    info!(
        total = report.summary.total,
        valid = report.summary.valid,
        invalid = report.summary.invalid,
        errored = report.summary.errored,
        "validation finished"
    );
    Ok(report)
}
