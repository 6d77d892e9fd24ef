// firegate-core/src/fgpack/manifest.rs
// ============================================================================
// Module: Firegate Fgpack Manifest Types
// Description: Manifest, file record, and snapshot event structures.
// Purpose: Define the canonical on-disk fgpack package format.
// Dependencies: crate::time, serde, thiserror
// ============================================================================

//! ## Overview
//! Manifest types mirror the fgpack wire format exactly: `manifest.json`
//! carries format metadata, the snapshot hash, and the per-file hash list;
//! `events.ndjson` carries one `file_snapshot` event per exported file in
//! discovery order. The identity and signature slots are reserved for a
//! future signing step and are always null today.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::time::Timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Manifest format identifier.
pub const FGPACK_FORMAT: &str = "fgpack";
/// Manifest format version.
pub const FGPACK_VERSION: &str = "0.1";
/// Manifest filename inside a package.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
/// Event log filename inside a package.
pub const EVENTS_FILE_NAME: &str = "events.ndjson";
/// Vault map filename at the vault root; always part of the file set.
pub const VAULT_MAP_FILE_NAME: &str = "vault_map.json";
/// Directory holding verbatim file copies inside a package.
pub const FILES_DIR_NAME: &str = "files";

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// Hash and size record for one exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Vault-relative path of the file.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 of the file bytes.
    pub sha256: String,
}

/// The fgpack package manifest.
///
/// # Invariants
/// - `snapshot_hash` is the SHA-256 of the exact `events.ndjson` bytes.
/// - `identity_pubkey` and `signature` are reserved null slots; no signing
///   behavior exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FgpackManifest {
    /// Format identifier, always `fgpack`.
    pub format: String,
    /// Format version, currently `0.1`.
    pub version: String,
    /// Export timestamp supplied by the host.
    pub generated_at: Timestamp,
    /// Label of the vault root the package was exported from.
    pub vault_root: String,
    /// Schema version of the exported vault map, when present.
    pub schema_version: Option<String>,
    /// SHA-256 of the exact serialized event log bytes.
    pub snapshot_hash: String,
    /// Reserved slot for a future identity public key.
    pub identity_pubkey: Option<String>,
    /// Reserved slot for a future manifest signature.
    pub signature: Option<String>,
    /// Per-file hash records in discovery order.
    pub files: Vec<FileRecord>,
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// One append-only event per exported file, serialized as NDJSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FgpackEvent {
    /// A file was captured into the package.
    FileSnapshot {
        /// Vault-relative path of the file.
        path: String,
        /// Lowercase hex SHA-256 of the file bytes.
        sha256: String,
        /// File size in bytes.
        size: u64,
        /// Export timestamp supplied by the host.
        ts: Timestamp,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Packaging and verification errors.
#[derive(Debug, Error)]
pub enum PackError {
    /// The vault map or manifest could not be parsed.
    #[error("malformed document: {0}")]
    Malformed(String),
    /// A source file could not be read.
    #[error("source read failed: {0}")]
    Source(String),
    /// A package artifact could not be written.
    #[error("pack write failed: {0}")]
    Sink(String),
    /// A value could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
