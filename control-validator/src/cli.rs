use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;

use control_validator::{
    DEFAULT_ROOT, FsSourceConfig, MissingFieldMode, RequiredFieldSet, ValidationConfig,
    ValidationReport, ValidationResult, Verdict, output, validate_fs, validate_fs_with,
};

use crate::logging;

/// At least one control is invalid or could not be loaded.
pub const EXIT_INVALID: u8 = 1;
/// The run itself failed (bad arguments, discovery failure, broken stdout).
pub const EXIT_RUN_FAILURE: u8 = 2;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One verdict line per file, then a summary line.
    Human,
    /// A single JSON report after all files are checked.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "control-validator",
    version,
    about = "Validate compliance control documents for required fields"
)]
struct Cli {
    /// Directory or file to scan (repeatable).
    #[arg(long = "root", value_name = "PATH", default_value = DEFAULT_ROOT)]
    roots: Vec<PathBuf>,

    /// Glob of files to skip, matched against the path or file name (repeatable).
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// File extension treated as a control document (repeatable).
    #[arg(long = "ext", value_name = "EXT", default_values = ["yaml", "yml"])]
    extensions: Vec<String>,

    /// Required top-level field (repeatable); replaces the default set.
    #[arg(long = "require", value_name = "FIELD")]
    required: Vec<String>,

    /// Report only the first missing field per file.
    #[arg(long)]
    first_missing_only: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Maximum size of a single file in bytes.
    #[arg(long, value_name = "BYTES")]
    max_file_size: Option<u64>,

    /// Follow symbolic links while scanning.
    #[arg(long)]
    follow_links: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn fs_config(&self) -> FsSourceConfig {
        let mut cfg = FsSourceConfig::default();
        cfg.paths.clone_from(&self.roots);
        cfg.exclude.clone_from(&self.exclude);
        cfg.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_owned())
            .collect();
        if let Some(max) = self.max_file_size {
            cfg.max_file_size = max;
        }
        cfg.follow_links = self.follow_links;
        cfg
    }

    fn validation_config(&self) -> ValidationConfig {
        let mut cfg = ValidationConfig::default();
        if !self.required.is_empty() {
            cfg.required_fields = RequiredFieldSet::new(self.required.iter().cloned());
        }
        if self.first_missing_only {
            cfg.missing_field_mode = MissingFieldMode::FirstOnly;
        }
        cfg
    }
}

fn painted_marker(verdict: &Verdict) -> colored::ColoredString {
    let marker = output::marker(verdict);
    match verdict {
        Verdict::Valid => marker.green(),
        Verdict::Invalid { .. } => marker.red(),
        Verdict::Error(_) => marker.yellow(),
    }
}

fn run_human(
    fs_config: &FsSourceConfig,
    config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = validate_fs_with(fs_config, config, |result: &ValidationResult| {
        output::write_marked_line(&painted_marker(&result.verdict), result, &mut out)?;
        out.flush()?;
        Ok(())
    })?;
    output::write_summary(&report.summary, &mut out)?;
    out.flush()?;
    Ok(report)
}

fn run_json(
    fs_config: &FsSourceConfig,
    config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    let report = validate_fs(fs_config, config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_json(&report, &mut out)?;
    Ok(report)
}

/// Parse arguments, run the validator, and map the outcome to an exit status.
///
/// # Errors
///
/// Returns an error if discovery fails or output cannot be written.
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let fs_config = cli.fs_config();
    let config = cli.validation_config();

    let report = match cli.format {
        OutputFormat::Human => run_human(&fs_config, &config),
        OutputFormat::Json => run_json(&fs_config, &config),
    }
    .context("control validation did not complete")?;

    Ok(if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}
