// firegate-core/tests/vault_validation.rs
// ============================================================================
// Module: Vault Validation Tests
// Description: Tests for fail-closed vault map schema validation.
// ============================================================================
//! ## Overview
//! Validates that malformed vault maps are rejected with descriptive errors
//! and that minimal well-formed maps are accepted.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions on fixed fixtures are permitted."
)]

use firegate_core::validate_vault_map;
use serde_json::json;

// ============================================================================
// SECTION: Rejection
// ============================================================================

#[test]
fn rejects_non_object_root() {
    let report = validate_vault_map(&json!("not a map"));
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["vault_map must be a JSON object".to_string()]);
}

#[test]
fn rejects_missing_schema_version() {
    let report = validate_vault_map(&json!({"focus_levels": {}}));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|error| error.contains("schema_version")));
}

#[test]
fn rejects_missing_focus_levels() {
    let report = validate_vault_map(&json!({"schema_version": "2.1"}));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|error| error.contains("focus_levels")));
}

#[test]
fn rejects_non_array_files() {
    let report = validate_vault_map(&json!({
        "schema_version": "2.1",
        "focus_levels": {"12": {"label": "x", "files": "nope"}},
    }));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|error| error.contains("focus_levels.12.files")));
}

#[test]
fn rejects_object_file_without_path() {
    let report = validate_vault_map(&json!({
        "schema_version": "2.1",
        "focus_levels": {"12": {"files": [{"tape_id": "29"}]}},
    }));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|error| error.contains("files[0].path")));
}

#[test]
fn rejects_non_object_confidence_breakdown() {
    let report = validate_vault_map(&json!({
        "schema_version": "2.1",
        "focus_levels": {"12": {"files": [{"path": "a.pdf", "confidence_breakdown": 0.9}]}},
    }));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|error| error.contains("confidence_breakdown")));
}

#[test]
fn collects_every_error_without_failing_fast() {
    let report = validate_vault_map(&json!({
        "focus_levels": {
            "1": "not an object",
            "2": {"files": [42]},
        },
    }));
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 3);
}

// ============================================================================
// SECTION: Acceptance
// ============================================================================

#[test]
fn accepts_minimal_vault_map() {
    let report = validate_vault_map(&json!({
        "schema_version": "2.1",
        "focus_levels": {
            "12": {
                "label": "x",
                "files": [{"path": "a.pdf"}],
            },
        },
    }));
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn accepts_string_file_entries() {
    let report = validate_vault_map(&json!({
        "schema_version": "2.1",
        "focus_levels": {"3": {"files": ["Explorer Tape #4 - Roots (Transcript).pdf"]}},
    }));
    assert!(report.valid);
}
