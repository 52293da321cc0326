//! Shared output formatting for validation results.
//!
//! Plain-text verdict lines, the run summary, and a JSON report writer.
//! Terminal colour is left to the CLI layer, which supplies its own marker.

use std::fmt::Display;
use std::io::Write;

use crate::report::{RunSummary, ValidationReport, ValidationResult, Verdict};

/// Line marker for a verdict.
#[must_use]
pub fn marker(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::Valid => "\u{2713}",
        Verdict::Invalid { .. } => "\u{2717}",
        Verdict::Error(_) => "\u{26a0}",
    }
}

/// Write `<marker> <file_path>: <verdict>` with a caller-supplied marker.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_marked_line(
    marker: &dyn Display,
    result: &ValidationResult,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    writeln!(
        writer,
        "{marker} {}: {}",
        result.file.display(),
        result.verdict
    )?;
    Ok(())
}

/// Write the trailing summary: an empty line, then `<valid>/<total> controls are valid`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary(summary: &RunSummary, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}/{} controls are valid",
        summary.valid, summary.total
    )?;
    Ok(())
}

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
