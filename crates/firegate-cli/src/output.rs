// firegate-cli/src/output.rs
// ============================================================================
// Module: Firegate CLI Output
// Description: Line-oriented stdout/stderr helpers for the fgpack binaries.
// Purpose: Keep user-facing output on explicit writers with checked errors.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Output helpers write single lines to explicit stdout/stderr handles so the
//! binaries report write failures instead of panicking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

// ============================================================================
// SECTION: Writers
// ============================================================================

/// Writes one line to stdout.
///
/// # Errors
///
/// Returns the underlying I/O error when the write fails.
pub fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes one line to stderr.
///
/// # Errors
///
/// Returns the underlying I/O error when the write fails.
pub fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
