// firegate-cli/src/lib.rs
// ============================================================================
// Module: Firegate CLI Library
// Description: File-backed packaging hosts shared by the fgpack binaries.
// Purpose: Provide filesystem sources, sinks, and output helpers for the CLI.
// Dependencies: firegate-core, time
// ============================================================================

//! ## Overview
//! The CLI library hosts the filesystem side of fgpack: a vault source rooted
//! at a directory, a pack sink that stages into a temporary directory and
//! renames on success so a failed export leaves nothing behind, and a pack
//! reader for verification. The binaries stay thin; all packaging semantics
//! live in `firegate-core`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clock;
pub mod output;
pub mod pack_fs;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clock::now_timestamp;
pub use clock::timestamp_slug;
pub use output::write_stderr_line;
pub use output::write_stdout_line;
pub use pack_fs::FilePackReader;
pub use pack_fs::FilePackSink;
pub use pack_fs::FileVaultSource;
