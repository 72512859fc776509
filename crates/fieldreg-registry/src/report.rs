//! # Validation Report
//!
//! Structured result of one validation pass: every entry-level issue in
//! registry order, plus enough context for a caller to render or serialize it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Value};

/// What is wrong with a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// One or more of `type`, `function`, `file` is absent or empty.
    MissingFields { missing: Vec<&'static str> },
    /// `type` was already declared by an earlier entry.
    DuplicateType { field_type: String, first_index: usize },
    /// `file` does not exist relative to the fields directory.
    FileNotFound { file: String },
    /// `file` has no export named `function`.
    FunctionNotFound { function: String, file: String },
    /// `file` exports `function`, but not as a callable.
    NotCallable { function: String, file: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields { missing } => write!(
                f,
                "Missing required field(s): {}. Each entry must include 'type', 'function', and 'file'.",
                missing.join(", ")
            ),
            Self::DuplicateType {
                field_type,
                first_index,
            } => write!(
                f,
                "Duplicate type \"{field_type}\" (first declared by entry {first_index})."
            ),
            Self::FileNotFound { file } => write!(f, "File not found: {file}"),
            Self::FunctionNotFound { function, file } => {
                write!(f, "Function \"{function}\" not found in file: {file}")
            }
            Self::NotCallable { function, file } => {
                write!(f, "Export \"{function}\" in file: {file} is not a function")
            }
        }
    }
}

/// An issue attached to a specific registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryIssue {
    /// 1-based position of the entry.
    pub index: usize,
    /// The entry's `type`, when it has one.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl fmt::Display for EntryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.type_name.as_deref().unwrap_or("untyped");
        write!(f, "Entry {} ({type_name}): {}", self.index, self.kind)
    }
}

/// Outcome of validating one registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    registry_path: PathBuf,
    entries_checked: usize,
    issues: Vec<EntryIssue>,
}

impl ValidationReport {
    pub fn new(registry_path: PathBuf, entries_checked: usize, issues: Vec<EntryIssue>) -> Self {
        Self {
            registry_path,
            entries_checked,
            issues,
        }
    }

    /// True when no entry-level issue was recorded.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    pub fn entries_checked(&self) -> usize {
        self.entries_checked
    }

    /// Issues in registry order.
    pub fn issues(&self) -> &[EntryIssue] {
        &self.issues
    }

    /// Issues recorded against the entry at 1-based `index`.
    pub fn issues_for(&self, index: usize) -> impl Iterator<Item = &EntryIssue> {
        self.issues.iter().filter(move |issue| issue.index == index)
    }

    /// One-line verdict naming the registry file.
    pub fn summary(&self) -> String {
        let name = self
            .registry_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.registry_path.display().to_string());
        if self.is_valid() {
            format!("{name} is valid.")
        } else {
            format!("{name} validation failed.")
        }
    }

    /// Machine-readable form, including the verdict.
    pub fn to_json(&self) -> Value {
        json!({
            "valid": self.is_valid(),
            "registry": self.registry_path.display().to_string(),
            "entries_checked": self.entries_checked,
            "issues": self.issues,
        })
    }
}
