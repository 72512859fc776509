//! # Export Catalogs
//!
//! Answers whether a module exports a symbol, and whether that export is
//! callable, without loading the module.
//!
//! Two catalogs are provided:
//!
//! - [`ExportManifest`] — the static `field-exports.json` file that ships
//!   beside the registry.
//! - [`StaticExports`] — a table registered in code by a host tool that
//!   already knows its field constructors.
//!
//! ## Manifest Format
//!
//! ```json
//! {
//!   "modules": {
//!     "createText.js": { "functions": ["createText"], "values": ["TEXT_DEFAULTS"] }
//!   }
//! }
//! ```
//!
//! Module keys are compared after [`normalize_module_path`], so `./createText.js`
//! in the registry matches `createText.js` in the manifest.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// What a module exports under a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// A callable export.
    Function,
    /// An export that exists but is not callable.
    Value,
    /// No export with that name (or the module is unknown).
    Missing,
}

/// Source of truth for module exports.
pub trait ExportCatalog {
    /// Look up `symbol` in `module`, where `module` is the registry's `file`.
    fn lookup(&self, module: &str, symbol: &str) -> ExportKind;
}

impl<T: ExportCatalog + ?Sized> ExportCatalog for &T {
    fn lookup(&self, module: &str, symbol: &str) -> ExportKind {
        (**self).lookup(module, symbol)
    }
}

/// Normalise a module path for comparison.
///
/// Converts `\` to `/`, drops empty and `.` segments, strips any leading
/// `/`, and folds each `segment/..` pair. A leading `..` with nothing left
/// to cancel is kept.
pub fn normalize_module_path(module: &str) -> String {
    let unified = module.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|last| *last != "..") => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Declared exports of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleExports {
    /// Callable exports.
    #[serde(default)]
    pub functions: BTreeSet<String>,
    /// Non-callable exports (constants, objects, classes used as data).
    #[serde(default)]
    pub values: BTreeSet<String>,
}

impl ModuleExports {
    /// Classify `symbol`. A name listed as both a function and a value is a function.
    pub fn kind_of(&self, symbol: &str) -> ExportKind {
        if self.functions.contains(symbol) {
            ExportKind::Function
        } else if self.values.contains(symbol) {
            ExportKind::Value
        } else {
            ExportKind::Missing
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDocument {
    #[serde(default)]
    modules: BTreeMap<String, ModuleExports>,
}

/// Export catalog backed by `field-exports.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportManifest {
    modules: BTreeMap<String, ModuleExports>,
}

impl ExportManifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Err(RegistryError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(path, &content)
    }

    /// Parse manifest JSON. `path` is only used for error context.
    pub fn from_json_str(path: &Path, content: &str) -> Result<Self, RegistryError> {
        let document: ManifestDocument =
            serde_json::from_str(content).map_err(|source| RegistryError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut modules: BTreeMap<String, ModuleExports> = BTreeMap::new();
        for (module, exports) in document.modules {
            // `./a.js` and `a.js` may both appear; merge rather than overwrite.
            let merged = modules.entry(normalize_module_path(&module)).or_default();
            merged.functions.extend(exports.functions);
            merged.values.extend(exports.values);
        }

        Ok(Self { modules })
    }

    /// Number of modules declared.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Exports declared for `module`, if any.
    pub fn module(&self, module: &str) -> Option<&ModuleExports> {
        self.modules.get(&normalize_module_path(module))
    }
}

impl ExportCatalog for ExportManifest {
    fn lookup(&self, module: &str, symbol: &str) -> ExportKind {
        self.module(module)
            .map_or(ExportKind::Missing, |exports| exports.kind_of(symbol))
    }
}

/// Export catalog registered in code.
///
/// ```
/// use fieldreg_registry::{ExportCatalog, ExportKind, StaticExports};
///
/// let exports = StaticExports::new()
///     .function("createText.js", "createText")
///     .value("createText.js", "TEXT_DEFAULTS");
///
/// assert_eq!(exports.lookup("./createText.js", "createText"), ExportKind::Function);
/// assert_eq!(exports.lookup("createText.js", "TEXT_DEFAULTS"), ExportKind::Value);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticExports {
    modules: BTreeMap<String, ModuleExports>,
}

impl StaticExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable export.
    pub fn function(mut self, module: &str, name: &str) -> Self {
        self.entry(module).functions.insert(name.to_string());
        self
    }

    /// Register a non-callable export.
    pub fn value(mut self, module: &str, name: &str) -> Self {
        self.entry(module).values.insert(name.to_string());
        self
    }

    fn entry(&mut self, module: &str) -> &mut ModuleExports {
        self.modules
            .entry(normalize_module_path(module))
            .or_default()
    }
}

impl ExportCatalog for StaticExports {
    fn lookup(&self, module: &str, symbol: &str) -> ExportKind {
        self.modules
            .get(&normalize_module_path(module))
            .map_or(ExportKind::Missing, |exports| exports.kind_of(symbol))
    }
}
