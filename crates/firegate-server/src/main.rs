// firegate-server/src/main.rs
// ============================================================================
// Module: Firegate Server Entry Point
// Description: Binary entry point for the Firegate HTTP server.
// Purpose: Load configuration and serve /api/vault/resolve.
// Dependencies: firegate-server, tokio
// ============================================================================

//! ## Overview
//! Starts the resolve server from `firegate.toml` (or the `FIREGATE_CONFIG`
//! override). Errors are printed to stderr with a stable prefix and map to a
//! nonzero exit code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use firegate_server::FiregateConfig;
use firegate_server::FiregateServer;
use firegate_server::ServerError;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Stderr prefix for server errors.
const ERROR_PREFIX: &str = "[firegate-server]";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = std::io::stderr();
            let _ = writeln!(&mut stderr, "{ERROR_PREFIX} {err}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and serves until the listener fails.
async fn run() -> Result<(), ServerError> {
    let config = FiregateConfig::load(None)?;
    FiregateServer::from_config(config)?.serve().await
}
