//! # fieldreg entry point
//!
//! Parses arguments, initializes tracing, resolves settings, and maps the
//! validation outcome to a process exit code. This is the only place the
//! process exit status is decided.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fieldreg_cli::config::{CliConfig, Settings};
use fieldreg_cli::validate::{run_validate, ValidateArgs};

/// Field registry validator.
///
/// Checks that every entry in field-registry.json declares a unique type,
/// points at an existing module file, and names a function that module
/// exports according to field-exports.json.
#[derive(Parser, Debug)]
#[command(name = "fieldreg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("fieldreg v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    let config = match &cli.config {
        Some(path) => CliConfig::load(&fieldreg_cli::resolve_path(path, &cwd))?,
        None => CliConfig::default(),
    };

    let settings = Settings::resolve(&cli.validate, &config, &cwd);
    tracing::debug!(fields_dir = %settings.fields_dir.display(), "resolved fields directory");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate(&cli.validate, &settings, &mut out)
}
