//! Integration tests: validate on-disk fields directories end to end.
//!
//! Each test lays out a fields directory in a temp dir with a
//! `field-registry.json`, a `field-exports.json`, and module files, then runs
//! [`validate_field_registry`] against it.

use std::path::Path;

use fieldreg_registry::{
    validate_field_registry, IssueKind, RegistryError, DEFAULT_MANIFEST_FILE,
    DEFAULT_REGISTRY_FILE,
};
use serde_json::json;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct FieldsDir {
    dir: TempDir,
}

impl FieldsDir {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn registry(self, registry: serde_json::Value) -> Self {
        std::fs::write(
            self.path().join(DEFAULT_REGISTRY_FILE),
            serde_json::to_string_pretty(&registry).unwrap(),
        )
        .unwrap();
        self
    }

    fn manifest(self, manifest: serde_json::Value) -> Self {
        std::fs::write(
            self.path().join(DEFAULT_MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();
        self
    }

    fn module(self, file: &str) -> Self {
        std::fs::write(self.path().join(file), b"module.exports = {};\n").unwrap();
        self
    }
}

fn standard_manifest() -> serde_json::Value {
    json!({
        "modules": {
            "createText.js": { "functions": ["createText"] },
            "createNumber.js": { "functions": ["createNumber"], "values": ["NUMBER_DEFAULTS"] }
        }
    })
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn single_valid_entry_passes() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "text", "function": "createText", "file": "createText.js"}
        ]))
        .manifest(standard_manifest())
        .module("createText.js");

    let report = validate_field_registry(fields.path()).unwrap();
    assert!(report.is_valid(), "unexpected issues: {:?}", report.issues());
    assert_eq!(report.entries_checked(), 1);
    assert_eq!(report.summary(), "field-registry.json is valid.");
}

#[test]
fn missing_module_file_is_one_issue() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "text", "function": "createText", "file": "missing.js"}
        ]))
        .manifest(standard_manifest());

    let report = validate_field_registry(fields.path()).unwrap();
    assert_eq!(report.issues().len(), 1);
    assert_eq!(
        report.issues()[0].kind,
        IssueKind::FileNotFound {
            file: "missing.js".into()
        }
    );
    assert_eq!(report.summary(), "field-registry.json validation failed.");
}

#[test]
fn duplicate_type_flags_second_entry_only() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "text", "function": "createText", "file": "createText.js"},
            {"type": "text", "function": "createNumber", "file": "createNumber.js"}
        ]))
        .manifest(standard_manifest())
        .module("createText.js")
        .module("createNumber.js");

    let report = validate_field_registry(fields.path()).unwrap();
    assert_eq!(report.issues().len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.index, 2);
    assert_eq!(
        issue.to_string(),
        "Entry 2 (text): Duplicate type \"text\" (first declared by entry 1)."
    );
}

#[test]
fn missing_keys_do_not_stop_iteration() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "text", "function": "createText"},
            {"function": "createNumber", "file": "createNumber.js"},
            {"type": "number", "function": "createNumber", "file": "createNumber.js"},
            {"type": "date", "function": "createDate", "file": "createDate.js"}
        ]))
        .manifest(standard_manifest())
        .module("createNumber.js");

    let report = validate_field_registry(fields.path()).unwrap();
    let indices: Vec<usize> = report.issues().iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![1, 2, 4]);
    assert_eq!(report.entries_checked(), 4);
    assert!(report.issues_for(3).next().is_none());
}

#[test]
fn missing_file_skips_function_check() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "text", "function": "notExported", "file": "gone.js"}
        ]))
        .manifest(standard_manifest());

    let report = validate_field_registry(fields.path()).unwrap();
    assert_eq!(report.issues().len(), 1);
    assert!(matches!(
        report.issues()[0].kind,
        IssueKind::FileNotFound { .. }
    ));
}

#[test]
fn unexported_function_is_reported() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "text", "function": "makeText", "file": "createText.js"}
        ]))
        .manifest(standard_manifest())
        .module("createText.js");

    let report = validate_field_registry(fields.path()).unwrap();
    assert_eq!(
        report.issues()[0].to_string(),
        "Entry 1 (text): Function \"makeText\" not found in file: createText.js"
    );
}

#[test]
fn module_absent_from_manifest_exports_nothing() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "date", "function": "createDate", "file": "createDate.js"}
        ]))
        .manifest(standard_manifest())
        .module("createDate.js");

    let report = validate_field_registry(fields.path()).unwrap();
    assert!(matches!(
        report.issues()[0].kind,
        IssueKind::FunctionNotFound { .. }
    ));
}

#[test]
fn non_callable_export_is_reported() {
    let fields = FieldsDir::new()
        .registry(json!([
            {"type": "number", "function": "NUMBER_DEFAULTS", "file": "createNumber.js"}
        ]))
        .manifest(standard_manifest())
        .module("createNumber.js");

    let report = validate_field_registry(fields.path()).unwrap();
    assert_eq!(
        report.issues()[0].kind,
        IssueKind::NotCallable {
            function: "NUMBER_DEFAULTS".into(),
            file: "createNumber.js".into()
        }
    );
}

#[test]
fn empty_registry_is_valid() {
    let fields = FieldsDir::new()
        .registry(json!([]))
        .manifest(standard_manifest());

    let report = validate_field_registry(fields.path()).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.entries_checked(), 0);
}

// ---------------------------------------------------------------------------
// Fatal setup errors
// ---------------------------------------------------------------------------

#[test]
fn absent_registry_is_fatal() {
    let fields = FieldsDir::new().manifest(standard_manifest());
    let err = validate_field_registry(fields.path()).unwrap_err();
    assert!(matches!(err, RegistryError::RegistryNotFound { .. }));
}

#[test]
fn malformed_registry_is_fatal() {
    let fields = FieldsDir::new().manifest(standard_manifest());
    std::fs::write(
        fields.path().join(DEFAULT_REGISTRY_FILE),
        r#"[{"type": "text""#,
    )
    .unwrap();
    let err = validate_field_registry(fields.path()).unwrap_err();
    assert!(matches!(err, RegistryError::Parse { .. }));
}

#[test]
fn object_root_is_fatal() {
    let fields = FieldsDir::new()
        .registry(json!({"text": {"function": "createText", "file": "createText.js"}}))
        .manifest(standard_manifest());
    let err = validate_field_registry(fields.path()).unwrap_err();
    assert!(matches!(err, RegistryError::NotAnArray { .. }));
}

#[test]
fn malformed_manifest_is_fatal() {
    let fields = FieldsDir::new().registry(json!([]));
    std::fs::write(fields.path().join(DEFAULT_MANIFEST_FILE), "{ modules: }").unwrap();
    let err = validate_field_registry(fields.path()).unwrap_err();
    assert!(matches!(err, RegistryError::ManifestParse { .. }));
}
