//! # Configuration
//!
//! Optional YAML configuration for `fieldreg`:
//!
//! ```yaml
//! fields_dir: packages/fields
//! registry_file: field-registry.json
//! manifest_file: field-exports.json
//! ```
//!
//! A relative `fields_dir` is resolved against the directory holding the
//! configuration file. Command-line flags override the file, and the file
//! overrides built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use fieldreg_registry::{DEFAULT_MANIFEST_FILE, DEFAULT_REGISTRY_FILE};

use crate::validate::ValidateArgs;

/// Contents of a `fieldreg` YAML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Directory holding the registry, the manifest, and module files.
    pub fields_dir: Option<PathBuf>,
    /// Registry file name inside `fields_dir`.
    pub registry_file: Option<String>,
    /// Export manifest file name inside `fields_dir`.
    pub manifest_file: Option<String>,
}

impl CliConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        if let (Some(dir), Some(base)) = (&config.fields_dir, path.parent()) {
            if dir.is_relative() {
                config.fields_dir = Some(base.join(dir));
            }
        }

        Ok(config)
    }
}

/// Fully resolved settings for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fields_dir: PathBuf,
    pub registry_file: String,
    pub manifest_file: String,
}

impl Settings {
    /// Merge flags, configuration, and defaults.
    ///
    /// When no fields directory is given anywhere, walk up from `cwd` to the
    /// first directory containing the registry file, falling back to `cwd`.
    pub fn resolve(args: &ValidateArgs, config: &CliConfig, cwd: &Path) -> Self {
        let registry_file = args
            .registry
            .clone()
            .or_else(|| config.registry_file.clone())
            .unwrap_or_else(|| DEFAULT_REGISTRY_FILE.to_string());

        let manifest_file = args
            .manifest
            .clone()
            .or_else(|| config.manifest_file.clone())
            .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string());

        let fields_dir = match args.fields_dir.as_ref().or(config.fields_dir.as_ref()) {
            Some(dir) => crate::resolve_path(dir, cwd),
            None => crate::discover_fields_dir(cwd, &registry_file).unwrap_or_else(|| {
                tracing::debug!(
                    cwd = %cwd.display(),
                    "no {registry_file} found in any parent directory; using current directory"
                );
                cwd.to_path_buf()
            }),
        };

        Self {
            fields_dir,
            registry_file,
            manifest_file,
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.fields_dir.join(&self.registry_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.fields_dir.join(&self.manifest_file)
    }
}
