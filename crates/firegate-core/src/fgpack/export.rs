// firegate-core/src/fgpack/export.rs
// ============================================================================
// Module: Firegate Fgpack Exporter
// Description: Content-addressed snapshot export of a vault's file set.
// Purpose: Discover, copy, and hash vault files into a tamper-evident package.
// Dependencies: crate::{hashing, interfaces, vault}, serde_json
// ============================================================================

//! ## Overview
//! Export walks the vault map to discover the file set: the map itself, every
//! `entry_ref` document, and every entry path ending in `.json`. Each file is
//! copied verbatim and hashed; one `file_snapshot` event per file is
//! serialized into the event log whose exact bytes produce the snapshot hash.
//! A failed copy aborts the export; sinks commit atomically or leave nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::fgpack::manifest::FGPACK_FORMAT;
use crate::fgpack::manifest::FGPACK_VERSION;
use crate::fgpack::manifest::FgpackEvent;
use crate::fgpack::manifest::FgpackManifest;
use crate::fgpack::manifest::FileRecord;
use crate::fgpack::manifest::PackError;
use crate::fgpack::manifest::VAULT_MAP_FILE_NAME;
use crate::hashing::sha256_hex;
use crate::interfaces::PackSink;
use crate::interfaces::VaultSource;
use crate::time::Timestamp;
use crate::vault::flatten::level_key;

// ============================================================================
// SECTION: Exporter
// ============================================================================

/// Fgpack exporter for deterministic vault snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct FgpackExporter;

impl FgpackExporter {
    /// Exports a vault snapshot into the provided sink.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the vault map is not JSON, a source file
    /// cannot be read, or the sink rejects a write. On error nothing is
    /// committed; the sink stages and only [`PackSink::finalize`] publishes.
    pub fn export<S: PackSink>(
        &self,
        source: &dyn VaultSource,
        sink: &mut S,
        generated_at: Timestamp,
    ) -> Result<FgpackManifest, PackError> {
        let map_bytes = source.read_vault_map()?;
        let vault_map: Value = serde_json::from_slice(&map_bytes)
            .map_err(|err| PackError::Malformed(format!("vault_map.json: {err}")))?;

        let mut records = Vec::new();
        for rel_path in discover_files(&vault_map) {
            let bytes = source.read_file(&rel_path)?;
            sink.write_file(&rel_path, &bytes)?;
            records.push(FileRecord {
                path: rel_path,
                size: bytes.len() as u64,
                sha256: sha256_hex(&bytes),
            });
        }

        let events_text = serialize_events(&records, &generated_at)?;
        sink.write_events(&events_text)?;

        let manifest = FgpackManifest {
            format: FGPACK_FORMAT.to_string(),
            version: FGPACK_VERSION.to_string(),
            generated_at,
            vault_root: source.root_label(),
            schema_version: vault_map
                .get("schema_version")
                .and_then(Value::as_str)
                .map(str::to_string),
            snapshot_hash: sha256_hex(events_text.as_bytes()),
            identity_pubkey: None,
            signature: None,
            files: records,
        };
        sink.write_manifest(&manifest)?;
        sink.finalize()?;
        Ok(manifest)
    }
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Discovers the deduplicated, ordered file set of a raw vault map.
///
/// The vault map itself is always first. Levels are scanned in natural key
/// order; object entries contribute their `entry_ref` and any `path` ending
/// in `.json`. Bare string files are index shorthand without exportable
/// metadata and are not collected. The scan is defensive: levels or file
/// lists of the wrong shape are skipped rather than failing the export.
fn discover_files(vault_map: &Value) -> Vec<String> {
    let mut files: Vec<String> = vec![VAULT_MAP_FILE_NAME.to_string()];
    let Some(levels) = vault_map.get("focus_levels").and_then(Value::as_object) else {
        return files;
    };

    let mut keys: Vec<&String> = levels.keys().collect();
    keys.sort_by(|left, right| level_key(left).cmp(&level_key(right)));

    for key in keys {
        let files_value = levels.get(key).and_then(|level| level.get("files"));
        let Some(entries) = files_value.and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            if let Some(entry_ref) = entry.get("entry_ref").and_then(Value::as_str) {
                push_unique(&mut files, entry_ref);
            }
            if let Some(path) = entry.get("path").and_then(Value::as_str) {
                if path.ends_with(".json") {
                    push_unique(&mut files, path);
                }
            }
        }
    }
    files
}

/// Appends a candidate path unless it is already in the set.
fn push_unique(files: &mut Vec<String>, candidate: &str) {
    if !files.iter().any(|existing| existing == candidate) {
        files.push(candidate.to_string());
    }
}

// ============================================================================
// SECTION: Event Serialization
// ============================================================================

/// Serializes one `file_snapshot` event per record as NDJSON with a trailing
/// newline; these exact bytes are what the snapshot hash covers.
fn serialize_events(records: &[FileRecord], generated_at: &Timestamp) -> Result<String, PackError> {
    let mut text = String::new();
    for record in records {
        let event = FgpackEvent::FileSnapshot {
            path: record.path.clone(),
            sha256: record.sha256.clone(),
            size: record.size,
            ts: generated_at.clone(),
        };
        let line = serde_json::to_string(&event)
            .map_err(|err| PackError::Serialization(err.to_string()))?;
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}
