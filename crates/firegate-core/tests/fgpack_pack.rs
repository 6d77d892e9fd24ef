// firegate-core/tests/fgpack_pack.rs
// ============================================================================
// Module: Fgpack Export and Verification Tests
// Description: Tests for package generation and tamper detection.
// ============================================================================
//! ## Overview
//! Validates deterministic exports and verifier behavior with in-memory
//! fixtures: clean round trips verify with zero errors, and tampering with a
//! copied file or the event log surfaces exactly the broken artifact.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only fixtures and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use firegate_core::FgpackExporter;
use firegate_core::FgpackVerifier;
use firegate_core::PackError;
use firegate_core::PackReader;
use firegate_core::PackSink;
use firegate_core::Timestamp;
use firegate_core::VaultSource;
use firegate_core::fgpack::EVENTS_FILE_NAME;
use firegate_core::fgpack::FgpackManifest;
use firegate_core::fgpack::MANIFEST_FILE_NAME;
use serde_json::json;

// ============================================================================
// SECTION: In-Memory Fixtures
// ============================================================================

/// In-memory vault with a map and referenced documents.
struct MemoryVault {
    /// Files keyed by vault-relative path.
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryVault {
    /// Builds the standard two-reference fixture vault.
    fn fixture() -> Self {
        let vault_map = json!({
            "schema_version": "2.1",
            "focus_levels": {
                "12": {
                    "label": "expanded_mapping_and_patterns",
                    "files": [
                        {
                            "path": "Explorer Tape #17 - The Patrick Event (Transcript).pdf",
                            "entry_ref": "tape_entries/tape_17.json",
                        },
                        "Explorer Tape #4 - Roots (Transcript).pdf",
                    ],
                },
                "21": {
                    "label": "integration_and_lineage_bridge",
                    "files": [
                        {
                            "path": "tape_entries/tape_29.json",
                            "tape_id": "29",
                        },
                        {
                            "path": "Explorer Tape #29 - Aspects (Unedited Transcript).pdf",
                            "entry_ref": "tape_entries/tape_29.json",
                        },
                    ],
                },
            },
        });
        let mut files = BTreeMap::new();
        files.insert(
            "vault_map.json".to_string(),
            serde_json::to_vec_pretty(&vault_map).expect("fixture map serializes"),
        );
        files.insert(
            "tape_entries/tape_17.json".to_string(),
            br#"{"tape_id": "17", "status": "ready"}"#.to_vec(),
        );
        files.insert(
            "tape_entries/tape_29.json".to_string(),
            br#"{"tape_id": "29", "status": "ready"}"#.to_vec(),
        );
        Self {
            files,
        }
    }
}

impl VaultSource for MemoryVault {
    fn read_vault_map(&self) -> Result<Vec<u8>, PackError> {
        self.read_file("vault_map.json")
    }

    fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, PackError> {
        self.files
            .get(rel_path)
            .cloned()
            .ok_or_else(|| PackError::Source(format!("missing vault file: {rel_path}")))
    }

    fn root_label(&self) -> String {
        "memory://vault".to_string()
    }
}

/// In-memory pack storage acting as both sink and reader.
#[derive(Default)]
struct MemoryPack {
    /// Package artifacts keyed by package-relative path.
    artifacts: BTreeMap<String, Vec<u8>>,
    /// Whether the sink has been finalized.
    finalized: bool,
}

impl PackSink for MemoryPack {
    fn write_file(&mut self, rel_path: &str, bytes: &[u8]) -> Result<(), PackError> {
        self.artifacts.insert(format!("files/{rel_path}"), bytes.to_vec());
        Ok(())
    }

    fn write_events(&mut self, text: &str) -> Result<(), PackError> {
        self.artifacts.insert(EVENTS_FILE_NAME.to_string(), text.as_bytes().to_vec());
        Ok(())
    }

    fn write_manifest(&mut self, manifest: &FgpackManifest) -> Result<(), PackError> {
        let bytes = serde_json::to_vec_pretty(manifest)
            .map_err(|err| PackError::Serialization(err.to_string()))?;
        self.artifacts.insert(MANIFEST_FILE_NAME.to_string(), bytes);
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), PackError> {
        self.finalized = true;
        Ok(())
    }
}

impl PackReader for MemoryPack {
    fn read_manifest(&self) -> Result<Vec<u8>, PackError> {
        self.read_artifact(MANIFEST_FILE_NAME)
    }

    fn read_events(&self) -> Result<Vec<u8>, PackError> {
        self.read_artifact(EVENTS_FILE_NAME)
    }

    fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, PackError> {
        self.read_artifact(&format!("files/{rel_path}"))
    }
}

impl MemoryPack {
    /// Reads a package artifact by package-relative path.
    fn read_artifact(&self, path: &str) -> Result<Vec<u8>, PackError> {
        self.artifacts
            .get(path)
            .cloned()
            .ok_or_else(|| PackError::Source(format!("missing artifact: {path}")))
    }
}

/// Fixed export timestamp for deterministic fixtures.
fn fixed_ts() -> Timestamp {
    Timestamp::new("2026-08-06T12:00:00Z")
}

// ============================================================================
// SECTION: Export
// ============================================================================

#[test]
fn export_discovers_map_refs_and_json_paths_once() {
    let vault = MemoryVault::fixture();
    let mut pack = MemoryPack::default();
    let manifest = FgpackExporter
        .export(&vault, &mut pack, fixed_ts())
        .expect("export succeeds");

    let paths: Vec<&str> = manifest.files.iter().map(|record| record.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["vault_map.json", "tape_entries/tape_17.json", "tape_entries/tape_29.json"]
    );
    assert_eq!(manifest.schema_version.as_deref(), Some("2.1"));
    assert_eq!(manifest.format, "fgpack");
    assert_eq!(manifest.version, "0.1");
    assert!(manifest.identity_pubkey.is_none());
    assert!(manifest.signature.is_none());
    assert!(pack.finalized);
}

#[test]
fn export_writes_one_event_line_per_file() {
    let vault = MemoryVault::fixture();
    let mut pack = MemoryPack::default();
    let manifest = FgpackExporter
        .export(&vault, &mut pack, fixed_ts())
        .expect("export succeeds");

    let events = pack.read_events().expect("events written");
    let text = String::from_utf8(events).expect("events are utf-8");
    assert!(text.ends_with('\n'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), manifest.files.len());
    for line in &lines {
        let event: serde_json::Value = serde_json::from_str(line).expect("event parses");
        assert_eq!(event["type"], "file_snapshot");
        assert_eq!(event["ts"], "2026-08-06T12:00:00Z");
    }
}

#[test]
fn export_aborts_when_a_referenced_file_is_missing() {
    let mut vault = MemoryVault::fixture();
    vault.files.remove("tape_entries/tape_17.json");
    let mut pack = MemoryPack::default();
    let result = FgpackExporter.export(&vault, &mut pack, fixed_ts());
    assert!(result.is_err());
    assert!(!pack.finalized);
}

// ============================================================================
// SECTION: Verification
// ============================================================================

#[test]
fn clean_round_trip_verifies_with_zero_errors() {
    let vault = MemoryVault::fixture();
    let mut pack = MemoryPack::default();
    FgpackExporter.export(&vault, &mut pack, fixed_ts()).expect("export succeeds");

    let report = FgpackVerifier.verify(&pack).expect("verification runs");
    assert!(report.ok);
    assert!(report.errors.is_empty());
    assert_eq!(report.checked_files, 3);
}

#[test]
fn flipping_one_byte_reports_exactly_one_mismatch() {
    let vault = MemoryVault::fixture();
    let mut pack = MemoryPack::default();
    FgpackExporter.export(&vault, &mut pack, fixed_ts()).expect("export succeeds");

    let key = "files/tape_entries/tape_29.json".to_string();
    let mut bytes = pack.artifacts.get(&key).cloned().expect("copied file exists");
    bytes[0] ^= 0x01;
    pack.artifacts.insert(key, bytes);

    let report = FgpackVerifier.verify(&pack).expect("verification runs");
    assert!(!report.ok);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("tape_entries/tape_29.json"));
    assert!(report.errors[0].contains("expected"));
    // The event log is untouched, so the snapshot hash still passes.
    assert!(!report.errors[0].contains("snapshot_hash"));
}

#[test]
fn tampering_with_the_event_log_breaks_the_snapshot_hash() {
    let vault = MemoryVault::fixture();
    let mut pack = MemoryPack::default();
    FgpackExporter.export(&vault, &mut pack, fixed_ts()).expect("export succeeds");

    let mut events = pack.artifacts.get(EVENTS_FILE_NAME).cloned().expect("events exist");
    events.push(b' ');
    pack.artifacts.insert(EVENTS_FILE_NAME.to_string(), events);

    let report = FgpackVerifier.verify(&pack).expect("verification runs");
    assert!(!report.ok);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("snapshot_hash mismatch"));
}

#[test]
fn missing_copied_file_is_recorded_not_skipped() {
    let vault = MemoryVault::fixture();
    let mut pack = MemoryPack::default();
    FgpackExporter.export(&vault, &mut pack, fixed_ts()).expect("export succeeds");

    pack.artifacts.remove("files/tape_entries/tape_17.json");

    let report = FgpackVerifier.verify(&pack).expect("verification runs");
    assert!(!report.ok);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("tape_entries/tape_17.json"));
    assert_eq!(report.checked_files, 3);
}
