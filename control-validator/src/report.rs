//! Validation result and report types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::CheckError;

/// Outcome of checking one document. Terminal: a file is checked once.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Every required field is present.
    Valid,
    /// The document parsed but lacks required fields, listed in required order.
    Invalid { missing: Vec<String> },
    /// The document could not be loaded as a mapping.
    Error(CheckError),
}

impl Verdict {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("Valid"),
            Self::Invalid { missing } => {
                let quoted = missing
                    .iter()
                    .map(|name| format!("'{name}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                if missing.len() == 1 {
                    write!(f, "Missing required field {quoted}")
                } else {
                    write!(f, "Missing required fields {quoted}")
                }
            }
            Self::Error(err) => write!(f, "Error - {err}"),
        }
    }
}

/// Per-file outcome.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationResult {
    /// The file that was checked, as discovered.
    pub file: PathBuf,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl ValidationResult {
    #[must_use]
    pub fn new(file: PathBuf, verdict: Verdict) -> Self {
        Self { file, verdict }
    }
}

/// Aggregate counts for one run.
///
/// `valid == total - (invalid + errored)` holds for every summary built
/// through [`RunSummary::record`].
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct RunSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub errored: usize,
}

impl RunSummary {
    /// Count one verdict.
    pub fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Valid => self.valid += 1,
            Verdict::Invalid { .. } => self.invalid += 1,
            Verdict::Error(_) => self.errored += 1,
        }
    }

    /// Whether the run passes: every discovered file is valid. `0/0` passes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.valid == self.total
    }
}

/// Result of a validation run.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Aggregate counts.
    pub summary: RunSummary,
    /// Whether every discovered file is valid.
    pub ok: bool,
    /// One entry per discovered file, in processing order.
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Build a report from results, computing the summary.
    #[must_use]
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let mut summary = RunSummary::default();
        for result in &results {
            summary.record(&result.verdict);
        }
        Self {
            ok: summary.is_success(),
            summary,
            results,
        }
    }
}
