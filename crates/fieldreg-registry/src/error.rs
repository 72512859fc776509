//! # Setup Errors
//!
//! Failures that prevent validation from starting. Entry-level problems are
//! not errors in this sense; they are collected as
//! [`EntryIssue`](crate::EntryIssue)s in the report.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal error raised before or while loading the registry or manifest.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry file does not exist at the resolved path.
    #[error("registry file not found: {}", path.display())]
    RegistryNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The registry or manifest exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The registry file is not valid JSON.
    #[error("malformed registry JSON in {}: {source}", path.display())]
    Parse {
        /// Path to the registry file.
        path: PathBuf,
        /// Parser error with line/column.
        #[source]
        source: serde_json::Error,
    },

    /// The registry root is valid JSON but not an array of entries.
    #[error("registry root in {} must be a JSON array, found {found}", path.display())]
    NotAnArray {
        /// Path to the registry file.
        path: PathBuf,
        /// JSON kind actually found at the root.
        found: &'static str,
    },

    /// The export manifest does not exist at the resolved path.
    #[error("export manifest not found: {}", path.display())]
    ManifestNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The export manifest is not valid JSON or does not match the manifest shape.
    #[error("malformed export manifest {}: {source}", path.display())]
    ManifestParse {
        /// Path to the manifest file.
        path: PathBuf,
        /// Parser error with line/column.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_path() {
        let err = RegistryError::RegistryNotFound {
            path: PathBuf::from("fields/field-registry.json"),
        };
        assert_eq!(
            err.to_string(),
            "registry file not found: fields/field-registry.json"
        );
    }

    #[test]
    fn not_an_array_reports_found_kind() {
        let err = RegistryError::NotAnArray {
            path: PathBuf::from("r.json"),
            found: "object",
        };
        assert!(err.to_string().contains("found object"));
    }

    #[test]
    fn parse_error_exposes_source() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = RegistryError::Parse {
            path: PathBuf::from("r.json"),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
