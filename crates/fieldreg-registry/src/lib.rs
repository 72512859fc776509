//! # fieldreg-registry — Field Registry Validation
//!
//! A field registry (`field-registry.json`) maps declared field types to the
//! functions that create them and the module files those functions live in:
//!
//! ```json
//! [
//!   { "type": "text",   "function": "createText",   "file": "createText.js" },
//!   { "type": "number", "function": "createNumber", "file": "createNumber.js" }
//! ]
//! ```
//!
//! This crate checks every entry of such a registry in a single forward pass:
//!
//! 1. `type`, `function`, and `file` are all present and non-empty.
//! 2. `type` has not been declared by an earlier entry.
//! 3. `file` exists relative to the fields directory.
//! 4. `function` is a callable export of `file`.
//!
//! ## Export Resolution
//!
//! Module code is never executed. Exports are answered by an
//! [`ExportCatalog`]: either the static [`ExportManifest`]
//! (`field-exports.json`, shipped beside the registry) or a
//! [`StaticExports`] table registered in code by a host tool.
//!
//! ## Error Tiers
//!
//! - Setup failures (registry missing, malformed JSON, manifest missing) are
//!   returned as [`RegistryError`] and stop validation before any entry is read.
//! - Entry problems are collected into a [`ValidationReport`]; iteration never
//!   stops early.
//!
//! Nothing in this crate terminates the process. Deciding an exit status is
//! left to the caller.

pub mod catalog;
pub mod entry;
pub mod error;
pub mod report;
pub mod validate;

pub use catalog::{
    normalize_module_path, ExportCatalog, ExportKind, ExportManifest, ModuleExports, StaticExports,
};
pub use entry::{Entry, RawEntry, Registry, REQUIRED_KEYS};
pub use error::RegistryError;
pub use report::{EntryIssue, IssueKind, ValidationReport};
pub use validate::{
    validate_field_registry, RegistryValidator, DEFAULT_MANIFEST_FILE, DEFAULT_REGISTRY_FILE,
};
