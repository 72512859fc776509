//! # fieldreg-cli — Field Registry Validator CLI
//!
//! Provides the `fieldreg` command. Run with no arguments from anywhere
//! inside a fields directory tree:
//!
//! ```bash
//! fieldreg
//! fieldreg --fields-dir packages/fields
//! fieldreg --config fieldreg.yaml --format json
//! ```
//!
//! Exit code 0 means the registry is valid; 1 means it is invalid or could
//! not be validated at all (registry missing, malformed JSON, missing
//! manifest, bad configuration).
//!
//! Argument parsing and rendering live here. Validation itself is
//! [`fieldreg_registry`], which never exits the process.

pub mod config;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a possibly relative path against `base`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Walk up from `start` to the first directory containing `registry_file`.
pub fn discover_fields_dir(start: &Path, registry_file: &str) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(registry_file).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
