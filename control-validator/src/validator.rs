//! Required-field check and per-file validation.

use std::path::Path;

use crate::config::{FsSourceConfig, MissingFieldMode, ValidationConfig};
use crate::error::CheckError;
use crate::fields::RequiredFieldSet;
use crate::format::{self, Document};
use crate::report::{ValidationResult, Verdict};
use crate::strategy::ContentFormat;
use crate::strategy::fs::{content_format_for, read_file_bounded};

/// Required fields absent from `document`, in required-field order.
///
/// With [`MissingFieldMode::FirstOnly`] at most one name is returned.
#[must_use]
pub fn missing_fields(
    document: &Document,
    required: &RequiredFieldSet,
    mode: MissingFieldMode,
) -> Vec<String> {
    let absent = required
        .names()
        .filter(|field| !document.contains_key(*field))
        .map(str::to_owned);
    match mode {
        MissingFieldMode::All => absent.collect(),
        MissingFieldMode::FirstOnly => absent.take(1).collect(),
    }
}

/// Verdict for an already-parsed document.
#[must_use]
pub fn check_document(document: &Document, config: &ValidationConfig) -> Verdict {
    let missing = missing_fields(
        document,
        &config.required_fields,
        config.missing_field_mode,
    );
    if missing.is_empty() {
        Verdict::Valid
    } else {
        Verdict::Invalid { missing }
    }
}

fn load_document(path: &Path, max_file_size: u64) -> Result<Document, CheckError> {
    let content = read_file_bounded(path, max_file_size)?;
    match content_format_for(path) {
        ContentFormat::Yaml => format::yaml::parse_yaml_document(&content),
        ContentFormat::Json => format::json::parse_json_document(&content),
    }
}

/// Load and check one file. Every failure is folded into the verdict, so
/// this always yields exactly one result.
#[must_use]
pub fn validate_file(
    path: &Path,
    fs_config: &FsSourceConfig,
    config: &ValidationConfig,
) -> ValidationResult {
    let verdict = match load_document(path, fs_config.max_file_size) {
        Ok(document) => check_document(&document, config),
        Err(err) => Verdict::Error(err),
    };
    ValidationResult::new(path.to_path_buf(), verdict)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CheckErrorKind;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_all_missing_fields_reported_in_order() {
        let document = doc(json!({"description": "x", "control_id": "AC-1"}));
        let missing = missing_fields(
            &document,
            &RequiredFieldSet::default(),
            MissingFieldMode::All,
        );
        assert_eq!(missing, vec!["control_name", "pillar"]);
    }

    #[test]
    fn test_first_only_stops_at_first_missing() {
        let document = doc(json!({"description": "x", "control_id": "AC-1"}));
        let missing = missing_fields(
            &document,
            &RequiredFieldSet::default(),
            MissingFieldMode::FirstOnly,
        );
        assert_eq!(missing, vec!["control_name"]);
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let document = doc(json!({
            "control_id": null,
            "control_name": "n",
            "pillar": [],
            "description": {}
        }));
        assert_eq!(
            check_document(&document, &ValidationConfig::default()),
            Verdict::Valid
        );
    }

    #[test]
    fn test_extra_fields_do_not_matter() {
        let document = doc(json!({
            "control_id": "AC-1",
            "control_name": "n",
            "pillar": "p",
            "description": "d",
            "owner": "secops"
        }));
        assert!(check_document(&document, &ValidationConfig::default()).is_valid());
    }

    #[test]
    fn test_custom_required_set() {
        let mut config = ValidationConfig::default();
        config.required_fields = RequiredFieldSet::new(["owner"]);
        let document = doc(json!({"control_id": "AC-1"}));
        assert_eq!(
            check_document(&document, &config),
            Verdict::Invalid {
                missing: vec!["owner".to_owned()]
            }
        );
    }

    #[test]
    fn test_validate_file_parse_failure_is_error_verdict() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "key: [unclosed bracket").unwrap();

        let result = validate_file(
            &path,
            &FsSourceConfig::default(),
            &ValidationConfig::default(),
        );
        assert_eq!(result.file, path);
        match result.verdict {
            Verdict::Error(err) => assert_eq!(err.kind, CheckErrorKind::YamlParse),
            other => panic!("expected error verdict, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_file_json_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ctl.json");
        fs::write(
            &path,
            r#"{"control_id": "AC-1", "control_name": "n", "pillar": "p", "description": "d"}"#,
        )
        .unwrap();

        let result = validate_file(
            &path,
            &FsSourceConfig::default(),
            &ValidationConfig::default(),
        );
        assert!(result.verdict.is_valid());
    }
}
