//! # Validate Command
//!
//! Loads the registry and export manifest named by [`Settings`], runs the
//! validator, and renders the report as text lines or a JSON document.
//!
//! Setup failures are returned as errors with context; the caller decides the
//! exit status. Entry-level issues produce exit code 1 through the return
//! value.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use fieldreg_registry::{ExportManifest, Registry, RegistryValidator, ValidationReport};

use crate::config::Settings;

/// Output format for the validation report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per issue plus a summary.
    #[default]
    Text,
    /// A single JSON document on stdout.
    Json,
}

/// Arguments controlling what is validated and how it is reported.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Directory containing the registry, manifest, and field modules.
    /// Defaults to the nearest ancestor holding the registry file.
    #[arg(long, value_name = "DIR")]
    pub fields_dir: Option<PathBuf>,

    /// Registry file name inside the fields directory.
    #[arg(long, value_name = "FILE")]
    pub registry: Option<String>,

    /// Export manifest file name inside the fields directory.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<String>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute a validation run.
///
/// Returns exit code: 0 when the registry is valid, 1 when any entry has an issue.
pub fn run_validate(args: &ValidateArgs, settings: &Settings, out: &mut impl Write) -> Result<u8> {
    tracing::info!(
        fields_dir = %settings.fields_dir.display(),
        registry = %settings.registry_file,
        manifest = %settings.manifest_file,
        "validating field registry"
    );

    let registry = Registry::load(&settings.registry_path())
        .with_context(|| format!("{} could not be loaded", settings.registry_file))?;
    let manifest = ExportManifest::load(&settings.manifest_path())
        .with_context(|| format!("{} could not be loaded", settings.manifest_file))?;

    tracing::debug!(
        entries = registry.len(),
        modules = manifest.module_count(),
        "loaded registry and export manifest"
    );

    let validator = RegistryValidator::new(&settings.fields_dir, manifest)
        .with_registry_file(settings.registry_file.clone());
    let report = validator.validate_registry(&registry);

    match args.format {
        OutputFormat::Text => render_text(&report, out)?,
        OutputFormat::Json => render_json(&report, out)?,
    }

    Ok(if report.is_valid() { 0 } else { 1 })
}

/// Write one `FAIL:` line per issue followed by the summary.
pub fn render_text(report: &ValidationReport, out: &mut impl Write) -> Result<()> {
    for issue in report.issues() {
        writeln!(out, "FAIL: {issue}")?;
    }

    if report.is_valid() {
        writeln!(
            out,
            "OK: {} ({} entries checked)",
            report.summary(),
            report.entries_checked()
        )?;
    } else {
        writeln!(
            out,
            "\n{} issue(s) in {} entries. {}",
            report.issues().len(),
            report.entries_checked(),
            report.summary()
        )?;
    }
    Ok(())
}

/// Write the report as pretty-printed JSON.
pub fn render_json(report: &ValidationReport, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &report.to_json())
        .context("failed to serialize validation report")?;
    writeln!(out)?;
    Ok(())
}
