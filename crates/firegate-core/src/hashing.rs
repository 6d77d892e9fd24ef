// firegate-core/src/hashing.rs
// ============================================================================
// Module: Firegate Content Hashing
// Description: SHA-256 content hashing utilities for fgpack artifacts.
// Purpose: Provide deterministic per-file and event-log digests.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Firegate hashes fgpack payloads over raw bytes with SHA-256. Per-file digests
//! and the snapshot hash of the serialized event log both use the lowercase hex
//! form recorded in manifests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Hashes raw bytes with SHA-256 and returns the lowercase hex digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex_encode(&digest)
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
