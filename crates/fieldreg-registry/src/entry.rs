//! # Registry Entries
//!
//! Loading of `field-registry.json` into an ordered list of entries.
//!
//! Entries are read leniently: a key that is absent, `null`, not a string, or
//! empty is recorded as missing rather than failing the whole document. Only
//! a malformed document or a non-array root is fatal.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::RegistryError;

/// Keys every registry entry must carry, in the order they are reported.
pub const REQUIRED_KEYS: [&str; 3] = ["type", "function", "file"];

/// A registry entry with all required keys present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Field-type identifier (`type` in the registry).
    pub field_type: String,
    /// Exported function expected in `file`.
    pub function: String,
    /// Module path relative to the fields directory.
    pub file: String,
}

/// A registry entry as read from the document, before shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEntry {
    /// 1-based position in the registry array.
    pub index: usize,
    /// `type`, if present and non-empty.
    pub field_type: Option<String>,
    /// `function`, if present and non-empty.
    pub function: Option<String>,
    /// `file`, if present and non-empty.
    pub file: Option<String>,
}

impl RawEntry {
    /// Extract an entry from one element of the registry array.
    ///
    /// Non-object elements yield an entry with every key missing.
    pub fn from_value(index: usize, value: &Value) -> Self {
        let key = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Self {
            index,
            field_type: key("type"),
            function: key("function"),
            file: key("file"),
        }
    }

    /// Required keys absent from this entry, in [`REQUIRED_KEYS`] order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let present = [
            self.field_type.is_some(),
            self.function.is_some(),
            self.file.is_some(),
        ];
        REQUIRED_KEYS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Returns the complete entry, or `None` if any required key is missing.
    pub fn complete(&self) -> Option<Entry> {
        Some(Entry {
            field_type: self.field_type.clone()?,
            function: self.function.clone()?,
            file: self.file.clone()?,
        })
    }
}

/// An ordered registry loaded from disk.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    entries: Vec<RawEntry>,
}

impl Registry {
    /// Load and parse a registry file.
    ///
    /// Fails with [`RegistryError::RegistryNotFound`] before any read is
    /// attempted if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Err(RegistryError::RegistryNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(path, &content)
    }

    /// Parse registry JSON. `path` is only used for error context.
    pub fn from_json_str(path: &Path, content: &str) -> Result<Self, RegistryError> {
        let document: Value =
            serde_json::from_str(content).map_err(|source| RegistryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let items = match document {
            Value::Array(items) => items,
            other => {
                return Err(RegistryError::NotAnArray {
                    path: path.to_path_buf(),
                    found: json_kind(&other),
                })
            }
        };

        let entries = items
            .iter()
            .enumerate()
            .map(|(i, value)| RawEntry::from_value(i + 1, value))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Path the registry was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in registry order.
    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    /// Number of entries, including incomplete ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the registry array is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
