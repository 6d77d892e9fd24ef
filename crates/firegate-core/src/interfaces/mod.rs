// firegate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Firegate Interfaces
// Description: Backend-agnostic interfaces for reference loading and packaging.
// Purpose: Define the contract surfaces used by the Firegate core.
// Dependencies: crate::fgpack, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Firegate integrates with storage backends without
//! embedding filesystem details into the core. Implementations must be
//! deterministic; reference loaders may fail, and the resolver degrades
//! rather than propagating those failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::fgpack::FgpackManifest;
use crate::fgpack::PackError;

// ============================================================================
// SECTION: Reference Loader
// ============================================================================

/// Reference loading errors.
#[derive(Debug, Error)]
pub enum ReferenceLoadError {
    /// The referenced document could not be read.
    #[error("reference read failed: {0}")]
    Read(String),
    /// The referenced document could not be parsed as JSON.
    #[error("reference parse failed: {0}")]
    Parse(String),
}

/// Loads the richer referenced document behind an `entry_ref` pointer.
///
/// The resolver treats every error from this trait as a degradation signal,
/// never as a request failure.
pub trait ReferenceLoader {
    /// Loads and parses the referenced document.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceLoadError`] when the document cannot be read or parsed.
    fn load(&self, entry_ref: &str) -> Result<Value, ReferenceLoadError>;
}

// ============================================================================
// SECTION: Vault Source
// ============================================================================

/// Read access to a vault root for export discovery and copying.
pub trait VaultSource {
    /// Reads the raw bytes of `vault_map.json` at the vault root.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the map cannot be read.
    fn read_vault_map(&self) -> Result<Vec<u8>, PackError>;

    /// Reads the raw bytes of a file relative to the vault root.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the file cannot be read.
    fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, PackError>;

    /// Returns the label recorded as `vault_root` in manifests.
    fn root_label(&self) -> String;
}

// ============================================================================
// SECTION: Pack Sink / Reader
// ============================================================================

/// Write access to an fgpack package under construction.
///
/// # Invariants
/// - Nothing written before [`PackSink::finalize`] may become visible at the
///   destination; sinks stage and commit atomically or fail.
pub trait PackSink {
    /// Writes a verbatim file copy under `files/<rel_path>`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when writing fails.
    fn write_file(&mut self, rel_path: &str, bytes: &[u8]) -> Result<(), PackError>;

    /// Writes the serialized event log as `events.ndjson`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when writing fails.
    fn write_events(&mut self, text: &str) -> Result<(), PackError>;

    /// Writes the package manifest as `manifest.json`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when serialization or writing fails.
    fn write_manifest(&mut self, manifest: &FgpackManifest) -> Result<(), PackError>;

    /// Commits the staged package to its destination.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the commit fails; no partial package remains.
    fn finalize(&mut self) -> Result<(), PackError>;
}

/// Read access to a previously exported fgpack package.
pub trait PackReader {
    /// Reads the raw bytes of `manifest.json`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the manifest cannot be read.
    fn read_manifest(&self) -> Result<Vec<u8>, PackError>;

    /// Reads the raw bytes of `events.ndjson`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the event log cannot be read.
    fn read_events(&self) -> Result<Vec<u8>, PackError>;

    /// Reads the raw bytes of a copied file under `files/<rel_path>`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the file cannot be read.
    fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, PackError>;
}
