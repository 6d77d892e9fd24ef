// firegate-server/src/server/tests.rs
// ============================================================================
// Module: Firegate Server Unit Tests
// Description: Unit tests for request merging and the resolve pipeline.
// Purpose: Validate server behavior with on-disk vault fixtures.
// Dependencies: firegate-server, tempfile
// ============================================================================

//! ## Overview
//! Exercises request merging precedence and the full resolve pipeline against
//! temporary vault directories, including schema rejection and reference
//! degradation.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only fixtures and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use firegate_core::ResolvedMode;
use firegate_core::SignalStatus;
use serde_json::json;
use tempfile::TempDir;

use super::BodyParams;
use super::QueryParams;
use super::ResolveFailure;
use super::ResolveRequest;
use super::TapeValue;
use super::merge_request;
use super::request_from_query;
use super::resolve_request;
use crate::vault_store::FileVaultStore;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Writes a vault fixture with one referenced and one plain entry.
fn write_vault(root: &Path) {
    let vault_map = json!({
        "schema_version": "2.1",
        "focus_levels": {
            "12": {
                "label": "expanded_mapping_and_patterns",
                "files": [
                    {
                        "path": "Explorer Tape #29 - Aspects (Unedited Transcript).pdf",
                        "tape_id": "29",
                        "entry_ref": "tape_entries/tape_29.json",
                        "source_exists": true,
                    },
                    {
                        "path": "Explorer Tape #17 - The Patrick Event (Transcript).pdf",
                        "tape_id": "17",
                        "entry_ref": "tape_entries/missing.json",
                        "source_exists": true,
                    },
                ],
            },
        },
    });
    fs::write(
        root.join("vault_map.json"),
        serde_json::to_vec_pretty(&vault_map).expect("fixture serializes"),
    )
    .expect("vault map written");

    fs::create_dir_all(root.join("tape_entries")).expect("tape_entries created");
    let referenced = json!({
        "status": "ready",
        "confidence_breakdown": {
            "somatic": 0.95,
            "source": 0.9,
            "mapping": 0.88,
            "interpretation": 0.72,
        },
        "runtime_policy": {
            "gating": {
                "soft_stop_if": ["somatic < 0.75", "source < 0.75"],
                "preview_mode_if": ["mapping < 0.78"],
            },
        },
    });
    fs::write(
        root.join("tape_entries/tape_29.json"),
        serde_json::to_vec_pretty(&referenced).expect("reference serializes"),
    )
    .expect("reference written");
}

/// Builds a store over a fresh vault fixture.
fn fixture_store() -> (TempDir, FileVaultStore) {
    let dir = TempDir::new().expect("tempdir created");
    write_vault(dir.path());
    let store = FileVaultStore::new(dir.path().to_path_buf());
    (dir, store)
}

/// Builds a request carrying only a tape locator.
fn tape_request(tape: &str) -> ResolveRequest {
    ResolveRequest {
        tape: Some(tape.to_string()),
        ..ResolveRequest::default()
    }
}

// ============================================================================
// SECTION: Request Merging
// ============================================================================

#[test]
fn query_overrides_parse_numeric_text() {
    let request = request_from_query(QueryParams {
        tape: Some("29".to_string()),
        somatic: Some("0.62".to_string()),
        interpretation: Some("not a number".to_string()),
        ..QueryParams::default()
    });
    assert_eq!(request.overrides.somatic, Some(0.62));
    assert_eq!(request.overrides.interpretation, None);
}

#[test]
fn body_fields_take_precedence_over_query() {
    let query = QueryParams {
        tape: Some("17".to_string()),
        somatic: Some("0.9".to_string()),
        ..QueryParams::default()
    };
    let body = BodyParams {
        tape: Some(TapeValue::Text("29".to_string())),
        somatic: Some(0.5),
        ..BodyParams::default()
    };
    let request = merge_request(query, body);
    assert_eq!(request.tape.as_deref(), Some("29"));
    assert_eq!(request.overrides.somatic, Some(0.5));
}

#[test]
fn numeric_body_tape_is_stringified() {
    let body = BodyParams {
        tape: Some(TapeValue::Number(serde_json::Number::from(0))),
        ..BodyParams::default()
    };
    let request = merge_request(QueryParams::default(), body);
    assert_eq!(request.tape.as_deref(), Some("0"));
}

#[test]
fn absent_body_fields_fall_back_to_query() {
    let query = QueryParams {
        path: Some("aspects".to_string()),
        mapping: Some("0.6".to_string()),
        ..QueryParams::default()
    };
    let request = merge_request(query, BodyParams::default());
    assert_eq!(request.path.as_deref(), Some("aspects"));
    assert_eq!(request.overrides.mapping, Some(0.6));
}

// ============================================================================
// SECTION: Resolve Pipeline
// ============================================================================

#[test]
fn resolves_referenced_entry_to_normal_decision() {
    let (_dir, store) = fixture_store();
    let decision = resolve_request(&store, &tape_request("29")).expect("resolves");
    assert_eq!(decision.runtime_decision, SignalStatus::Normal);
    assert_eq!(decision.resolved_mode, ResolvedMode::EntryRef);
    assert_eq!(decision.status.as_deref(), Some("ready"));
}

#[test]
fn overrides_flow_into_the_decision() {
    let (_dir, store) = fixture_store();
    let mut request = tape_request("29");
    request.overrides.somatic = Some(0.1);
    let decision = resolve_request(&store, &request).expect("resolves");
    assert_eq!(decision.runtime_decision, SignalStatus::SoftStop);
    assert_eq!(decision.reasons, vec!["somatic_below_min".to_string()]);
}

#[test]
fn broken_reference_degrades_to_index_fallback() {
    let (_dir, store) = fixture_store();
    let decision = resolve_request(&store, &tape_request("17")).expect("resolves");
    assert_eq!(decision.resolved_mode, ResolvedMode::IndexFallback);
    assert_eq!(decision.runtime_decision, SignalStatus::Normal);
}

#[test]
fn missing_locators_are_a_bad_request() {
    let (_dir, store) = fixture_store();
    let failure = resolve_request(&store, &ResolveRequest::default());
    assert!(matches!(failure, Err(ResolveFailure::MissingQuery)));
}

#[test]
fn unmatched_locator_is_not_found() {
    let (_dir, store) = fixture_store();
    let failure = resolve_request(&store, &tape_request("99"));
    assert!(matches!(failure, Err(ResolveFailure::NoMatch)));
}

#[test]
fn invalid_schema_is_surfaced_not_defaulted() {
    let dir = TempDir::new().expect("tempdir created");
    fs::write(dir.path().join("vault_map.json"), br#"{"focus_levels": {}}"#)
        .expect("vault map written");
    let store = FileVaultStore::new(dir.path().to_path_buf());
    let failure = resolve_request(&store, &tape_request("29"));
    match failure {
        Err(ResolveFailure::SchemaInvalid(detail)) => {
            assert!(detail.contains("schema_version"));
        }
        other => panic!("expected schema failure, got {other:?}"),
    }
}

#[test]
fn missing_vault_map_is_an_internal_failure() {
    let dir = TempDir::new().expect("tempdir created");
    let store = FileVaultStore::new(dir.path().to_path_buf());
    let failure = resolve_request(&store, &tape_request("29"));
    assert!(matches!(failure, Err(ResolveFailure::Internal(_))));
}

#[test]
fn vault_edits_are_observed_on_the_next_call() {
    let (dir, store) = fixture_store();
    assert!(resolve_request(&store, &tape_request("29")).is_ok());

    let replacement = json!({
        "schema_version": "2.1",
        "focus_levels": {
            "1": {"files": [{"path": "Tape #40 - New Material.pdf", "tape_id": "40"}]},
        },
    });
    fs::write(
        dir.path().join("vault_map.json"),
        serde_json::to_vec_pretty(&replacement).expect("fixture serializes"),
    )
    .expect("vault map rewritten");

    assert!(matches!(
        resolve_request(&store, &tape_request("29")),
        Err(ResolveFailure::NoMatch)
    ));
    assert!(resolve_request(&store, &tape_request("40")).is_ok());
}
