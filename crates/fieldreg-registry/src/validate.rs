//! # Registry Validator
//!
//! Single forward pass over a loaded registry. Each entry is checked in order:
//!
//! 1. Required keys — on failure the entry is skipped.
//! 2. Type uniqueness — a repeat is flagged on the later entry, checks continue.
//! 3. Module file exists — on failure the export check is skipped.
//! 4. Function export — must be present and callable in the export catalog.
//!
//! The validator returns a [`ValidationReport`] and never exits the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::{ExportCatalog, ExportKind, ExportManifest};
use crate::entry::Registry;
use crate::error::RegistryError;
use crate::report::{EntryIssue, IssueKind, ValidationReport};

/// Registry file name inside the fields directory.
pub const DEFAULT_REGISTRY_FILE: &str = "field-registry.json";

/// Export manifest file name inside the fields directory.
pub const DEFAULT_MANIFEST_FILE: &str = "field-exports.json";

/// Validates registries rooted at one fields directory against one export catalog.
#[derive(Debug, Clone)]
pub struct RegistryValidator<C> {
    fields_dir: PathBuf,
    registry_file: String,
    catalog: C,
}

impl<C: ExportCatalog> RegistryValidator<C> {
    /// Create a validator for `fields_dir` using the default registry file name.
    pub fn new(fields_dir: impl Into<PathBuf>, catalog: C) -> Self {
        Self {
            fields_dir: fields_dir.into(),
            registry_file: DEFAULT_REGISTRY_FILE.to_string(),
            catalog,
        }
    }

    /// Override the registry file name.
    pub fn with_registry_file(mut self, registry_file: impl Into<String>) -> Self {
        self.registry_file = registry_file.into();
        self
    }

    pub fn fields_dir(&self) -> &Path {
        &self.fields_dir
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Full path of the registry file.
    pub fn registry_path(&self) -> PathBuf {
        self.fields_dir.join(&self.registry_file)
    }

    /// Resolve an entry's `file` against the fields directory.
    ///
    /// A leading `/` is treated as relative to the fields directory rather
    /// than the filesystem root.
    pub fn resolve_file(&self, file: &str) -> PathBuf {
        let relative = file.trim_start_matches(['/', '\\']);
        self.fields_dir.join(relative)
    }

    /// Load the registry file and validate it.
    pub fn validate(&self) -> Result<ValidationReport, RegistryError> {
        let registry = Registry::load(&self.registry_path())?;
        Ok(self.validate_registry(&registry))
    }

    /// Validate an already-loaded registry.
    pub fn validate_registry(&self, registry: &Registry) -> ValidationReport {
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut issues = Vec::new();

        for raw in registry.entries() {
            tracing::debug!(
                index = raw.index,
                type_name = raw.field_type.as_deref().unwrap_or(""),
                file = raw.file.as_deref().unwrap_or(""),
                "checking registry entry"
            );

            let mut record = |kind: IssueKind| {
                let issue = EntryIssue {
                    index: raw.index,
                    type_name: raw.field_type.clone(),
                    kind,
                };
                tracing::debug!(index = issue.index, "{issue}");
                issues.push(issue);
            };

            let Some(entry) = raw.complete() else {
                record(IssueKind::MissingFields {
                    missing: raw.missing_keys(),
                });
                continue;
            };

            if let Some(&first_index) = first_seen.get(&entry.field_type) {
                record(IssueKind::DuplicateType {
                    field_type: entry.field_type.clone(),
                    first_index,
                });
            } else {
                first_seen.insert(entry.field_type.clone(), raw.index);
            }

            let module_path = self.resolve_file(&entry.file);
            if !module_path.exists() {
                tracing::debug!(path = %module_path.display(), "module file missing");
                record(IssueKind::FileNotFound { file: entry.file });
                continue;
            }

            match self.catalog.lookup(&entry.file, &entry.function) {
                ExportKind::Function => {}
                ExportKind::Value => record(IssueKind::NotCallable {
                    function: entry.function,
                    file: entry.file,
                }),
                ExportKind::Missing => record(IssueKind::FunctionNotFound {
                    function: entry.function,
                    file: entry.file,
                }),
            }
        }

        tracing::info!(
            entries = registry.len(),
            issues = issues.len(),
            "registry validation complete"
        );

        ValidationReport::new(registry.path().to_path_buf(), registry.len(), issues)
    }
}

/// Validate `field-registry.json` in `fields_dir` against `field-exports.json`.
///
/// The registry is loaded first, so a missing registry is reported as
/// [`RegistryError::RegistryNotFound`] even when the manifest is also absent.
pub fn validate_field_registry(fields_dir: &Path) -> Result<ValidationReport, RegistryError> {
    let registry = Registry::load(&fields_dir.join(DEFAULT_REGISTRY_FILE))?;
    let manifest = ExportManifest::load(&fields_dir.join(DEFAULT_MANIFEST_FILE))?;
    let validator = RegistryValidator::new(fields_dir, manifest);
    Ok(validator.validate_registry(&registry))
}
