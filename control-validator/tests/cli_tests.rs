#![allow(clippy::unwrap_used)]
//! End-to-end tests for the `control-validator` binary.
//!
//! Each test lays out a `framework/` tree in a temp directory and runs the
//! binary there with no arguments. Assertions never depend on file order.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const VALID_CONTROL: &str = "\
control_id: IAM-001
control_name: Enforce MFA for console access
pillar: identity
description: Every interactive login requires a second factor.
";

const MISSING_PILLAR: &str = "\
control_id: NET-004
control_name: Default-deny ingress
description: Security groups deny inbound traffic unless allow-listed.
";

fn write_control(workdir: &Path, rel: &str, content: &str) {
    let path = workdir.join("framework").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run_in(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_control-validator"))
        .args(args)
        .current_dir(workdir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_single_valid_control_exits_zero() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "identity/mfa.yaml", VALID_CONTROL);

    let output = run_in(tmp.path(), &[]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    let first = stdout.lines().next().unwrap();
    assert!(first.ends_with("mfa.yaml: Valid"), "got: {first}");
    assert!(stdout.ends_with("\n\n1/1 controls are valid\n"), "got: {stdout}");
}

#[test]
fn test_missing_pillar_exits_one() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "network/ingress.yaml", MISSING_PILLAR);

    let output = run_in(tmp.path(), &[]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout.contains("ingress.yaml: Missing required field 'pillar'"),
        "got: {stdout}"
    );
    assert!(stdout.contains("0/1 controls are valid"));
}

#[test]
fn test_malformed_yaml_reports_parse_reason() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "broken.yaml", "key: [unclosed bracket");

    let output = run_in(tmp.path(), &[]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout.contains("broken.yaml: Error - YAML parse error: "),
        "got: {stdout}"
    );
}

#[test]
fn test_one_valid_one_invalid() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "a.yaml", VALID_CONTROL);
    write_control(tmp.path(), "b.yaml", MISSING_PILLAR);

    let output = run_in(tmp.path(), &[]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("a.yaml: Valid"));
    assert!(stdout.contains("b.yaml: Missing required field 'pillar'"));
    assert!(stdout.ends_with("\n1/2 controls are valid\n"), "got: {stdout}");
}

#[test]
fn test_empty_framework_is_vacuous_success() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("framework")).unwrap();

    let output = run_in(tmp.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "\n0/0 controls are valid\n");
}

#[test]
fn test_first_missing_only_flag() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "stub.yaml", "control_id: X-1\n");

    let all = stdout_of(&run_in(tmp.path(), &[]));
    assert!(
        all.contains("Missing required fields 'control_name', 'pillar', 'description'"),
        "got: {all}"
    );

    let first = stdout_of(&run_in(tmp.path(), &["--first-missing-only"]));
    assert!(
        first.contains("stub.yaml: Missing required field 'control_name'\n"),
        "got: {first}"
    );
}

#[test]
fn test_json_format() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "a.yaml", VALID_CONTROL);

    let output = run_in(tmp.path(), &["--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], serde_json::json!(true));
    assert_eq!(json["summary"]["total"], serde_json::json!(1));
}

#[test]
fn test_invalid_exclude_glob_is_run_failure() {
    let tmp = TempDir::new().unwrap();
    write_control(tmp.path(), "a.yaml", VALID_CONTROL);

    let output = run_in(tmp.path(), &["--exclude", "["]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid exclude glob pattern"), "got: {stderr}");
}
