// firegate-cli/src/bin/fgpack_export.rs
// ============================================================================
// Module: Fgpack Export Entry Point
// Description: Command-line export of content-addressed vault packages.
// Purpose: Write a new fgpack package from a vault root, atomically or not at all.
// Dependencies: clap, firegate-cli, firegate-core
// ============================================================================

//! ## Overview
//! Exports the vault's file set into a new fgpack package. The destination
//! defaults to a timestamped directory under `exports/fgpack`; a failed export
//! leaves no partial package behind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use firegate_cli::FilePackSink;
use firegate_cli::FileVaultSource;
use firegate_cli::now_timestamp;
use firegate_cli::timestamp_slug;
use firegate_cli::write_stderr_line;
use firegate_cli::write_stdout_line;
use firegate_core::FgpackExporter;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Stderr prefix for export errors.
const ERROR_PREFIX: &str = "[fgpack-export]";

/// Command-line definition for `fgpack-export`.
#[derive(Parser, Debug)]
#[command(name = "fgpack-export", disable_help_subcommand = true)]
struct Cli {
    /// Vault root directory containing `vault_map.json`.
    #[arg(long, value_name = "DIR")]
    vault_root: PathBuf,
    /// Output package directory (defaults to `exports/fgpack/<utc>.fgpack`).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

/// CLI error wrapper carrying a printable message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&format!("{ERROR_PREFIX} {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Executes the export and reports the destination and file count.
fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let out = cli.out.unwrap_or_else(|| {
        PathBuf::from("exports/fgpack").join(format!("{}.fgpack", timestamp_slug()))
    });

    let source = FileVaultSource::new(cli.vault_root);
    let mut sink = FilePackSink::create(&out).map_err(|err| CliError::new(err.to_string()))?;
    let manifest = FgpackExporter
        .export(&source, &mut sink, now_timestamp())
        .map_err(|err| CliError::new(err.to_string()))?;

    write_stdout_line(&format!("fgpack exported -> {}", out.display()))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    write_stdout_line(&format!("files: {}", manifest.files.len()))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}
