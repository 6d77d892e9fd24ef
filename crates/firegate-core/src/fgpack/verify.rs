// firegate-core/src/fgpack/verify.rs
// ============================================================================
// Module: Firegate Fgpack Verifier
// Description: Offline recomputation of every hash in an exported package.
// Purpose: Detect tampering in the event log or any copied file.
// Dependencies: crate::{hashing, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Verification recomputes the snapshot hash from the exact event-log bytes
//! and every per-file hash from the copied file tree, diffing each against the
//! manifest. It is a diagnostic tool: all checks run regardless of earlier
//! failures, so an operator sees every broken artifact, not just the first. A
//! missing file is itself a hash-computation failure and is recorded as a
//! mismatch for that path, never silently skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::fgpack::manifest::FgpackManifest;
use crate::fgpack::manifest::PackError;
use crate::hashing::sha256_hex;
use crate::interfaces::PackReader;

// ============================================================================
// SECTION: Verification Report
// ============================================================================

/// Outcome of package verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Whether every check passed.
    pub ok: bool,
    /// Count of manifest file entries checked.
    pub checked_files: usize,
    /// Every mismatch found, with expected vs. actual values.
    pub errors: Vec<String>,
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Fgpack verifier for offline package validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FgpackVerifier;

impl FgpackVerifier {
    /// Verifies a package against its manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] only when the manifest or event log cannot be
    /// read or the manifest cannot be parsed; individual hash mismatches are
    /// collected into the report instead.
    pub fn verify(&self, reader: &dyn PackReader) -> Result<VerificationReport, PackError> {
        let manifest_bytes = reader.read_manifest()?;
        let manifest: FgpackManifest = serde_json::from_slice(&manifest_bytes)
            .map_err(|err| PackError::Malformed(format!("manifest.json: {err}")))?;
        let events_bytes = reader.read_events()?;

        let mut errors = Vec::new();

        let snapshot_hash = sha256_hex(&events_bytes);
        if snapshot_hash != manifest.snapshot_hash {
            errors.push(format!(
                "snapshot_hash mismatch: expected {}, got {snapshot_hash}",
                manifest.snapshot_hash
            ));
        }

        let mut checked_files = 0usize;
        for record in &manifest.files {
            checked_files = checked_files.saturating_add(1);
            match reader.read_file(&record.path) {
                Ok(bytes) => {
                    let actual = sha256_hex(&bytes);
                    if actual != record.sha256 {
                        errors.push(format!(
                            "hash mismatch for {}: expected {}, got {actual}",
                            record.path, record.sha256
                        ));
                    }
                }
                Err(err) => {
                    errors.push(format!(
                        "hash mismatch for {}: expected {}, got unreadable file ({err})",
                        record.path, record.sha256
                    ));
                }
            }
        }

        Ok(VerificationReport {
            ok: errors.is_empty(),
            checked_files,
            errors,
        })
    }
}
