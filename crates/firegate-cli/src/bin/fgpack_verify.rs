// firegate-cli/src/bin/fgpack_verify.rs
// ============================================================================
// Module: Fgpack Verify Entry Point
// Description: Command-line verification of exported fgpack packages.
// Purpose: Recompute and diff every hash in a package, reporting all mismatches.
// Dependencies: clap, firegate-cli, firegate-core
// ============================================================================

//! ## Overview
//! Verifies a previously exported package: the snapshot hash over the exact
//! event-log bytes and every per-file hash. All mismatches are itemized; the
//! exit code is nonzero when any check fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use firegate_cli::FilePackReader;
use firegate_cli::write_stderr_line;
use firegate_cli::write_stdout_line;
use firegate_core::FgpackVerifier;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Stderr prefix for verification errors.
const ERROR_PREFIX: &str = "[fgpack-verify]";

/// Command-line definition for `fgpack-verify`.
#[derive(Parser, Debug)]
#[command(name = "fgpack-verify", disable_help_subcommand = true)]
struct Cli {
    /// Package directory to verify.
    #[arg(long, value_name = "DIR")]
    pack: PathBuf,
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

/// Executes verification and renders the report.
fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let reader = FilePackReader::new(cli.pack);
    let report = FgpackVerifier.verify(&reader).map_err(|err| CliError::new(err.to_string()))?;

    if report.ok {
        write_stdout_line("fgpack verification OK")
            .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
        write_stdout_line(&format!("files verified: {}", report.checked_files))
            .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
        return Ok(ExitCode::SUCCESS);
    }

    write_stderr_line("fgpack verification failed")
        .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
    for error in &report.errors {
        write_stderr_line(&format!("- {error}"))
            .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
    }
    Ok(ExitCode::FAILURE)
}
