// firegate-core/tests/flatten_matching.rs
// ============================================================================
// Module: Flatten and Matching Tests
// Description: Tests for deterministic flattening and locator selection.
// ============================================================================
//! ## Overview
//! Validates stable flatten order, focus label synthesis, and the
//! first-match-wins locator semantics that depend on it.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions on fixed fixtures are permitted."
)]

use firegate_core::flatten_entries;
use firegate_core::matches_path;
use firegate_core::matches_tape;
use firegate_core::select_entry;
use serde_json::json;

// ============================================================================
// SECTION: Flattening
// ============================================================================

#[test]
fn flattens_levels_in_natural_key_order() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {
            "12": {"label": "later", "files": [{"path": "b.pdf"}]},
            "2": {"label": "earlier", "files": [{"path": "a.pdf"}]},
        },
    }));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].path.as_deref(), Some("a.pdf"));
    assert_eq!(entries[0].focus.as_deref(), Some("2"));
    assert_eq!(entries[1].path.as_deref(), Some("b.pdf"));
    assert_eq!(entries[1].focus.as_deref(), Some("12"));
}

#[test]
fn string_files_become_path_entries() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {"7": {"label": "somatic_base", "files": ["Tape #9 - Fire (Audio).pdf"]}},
    }));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path.as_deref(), Some("Tape #9 - Fire (Audio).pdf"));
    assert_eq!(entries[0].focus.as_deref(), Some("7"));
    assert_eq!(entries[0].focus_label.as_deref(), Some("somatic_base"));
    assert!(entries[0].tape_id.is_none());
}

#[test]
fn entry_fields_override_synthesized_focus_only_when_present() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {
            "5": {
                "label": "level_label",
                "files": [
                    {"path": "a.pdf", "focus": "99", "focus_label": "own_label"},
                    {"path": "b.pdf"},
                ],
            },
        },
    }));
    assert_eq!(entries[0].focus.as_deref(), Some("99"));
    assert_eq!(entries[0].focus_label.as_deref(), Some("own_label"));
    assert_eq!(entries[1].focus.as_deref(), Some("5"));
    assert_eq!(entries[1].focus_label.as_deref(), Some("level_label"));
}

#[test]
fn numeric_tape_ids_are_stringified() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {"1": {"files": [{"path": "a.pdf", "tape_id": 29}]}},
    }));
    assert_eq!(entries[0].tape_id.as_deref(), Some("29"));
}

#[test]
fn non_object_input_yields_empty_list() {
    assert!(flatten_entries(&json!(null)).is_empty());
    assert!(flatten_entries(&json!([1, 2, 3])).is_empty());
    assert!(flatten_entries(&json!("vault")).is_empty());
}

// ============================================================================
// SECTION: Matching
// ============================================================================

#[test]
fn tape_matches_are_case_insensitive() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {"1": {"files": [{"path": "a.pdf", "tape_id": "29A"}]}},
    }));
    assert!(matches_tape(&entries[0], "29a"));
    assert!(!matches_tape(&entries[0], "29"));
}

#[test]
fn tape_matches_path_markers() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {
            "1": {"files": ["Explorer Tape #29 - Aspects (Unedited Transcript).pdf"]},
        },
    }));
    assert!(matches_tape(&entries[0], "29"));
    assert!(matches_path(&entries[0], "aspects"));
    assert!(!matches_path(&entries[0], "patrick"));
}

#[test]
fn selection_prefers_tape_over_path() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {
            "1": {"files": [{"path": "Tape #4 - Aspects.pdf"}]},
            "2": {"files": [{"path": "Notes on aspects.pdf", "tape_id": "9"}]},
        },
    }));
    let selected = select_entry(&entries, Some("9"), Some("aspects"));
    assert_eq!(selected.and_then(|entry| entry.tape_id.as_deref()), Some("9"));
}

#[test]
fn selection_falls_back_to_first_path_match() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {
            "1": {"files": ["Tape #4 - Aspects.pdf", "More aspects.pdf"]},
        },
    }));
    let selected = select_entry(&entries, Some("77"), Some("aspects"));
    assert_eq!(selected.and_then(|entry| entry.path.as_deref()), Some("Tape #4 - Aspects.pdf"));
}

#[test]
fn tape_zero_is_a_present_locator() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {"1": {"files": [{"path": "a.pdf", "tape_id": 0}]}},
    }));
    let selected = select_entry(&entries, Some("0"), None);
    assert_eq!(selected.and_then(|entry| entry.tape_id.as_deref()), Some("0"));
}

#[test]
fn no_match_yields_none() {
    let entries = flatten_entries(&json!({
        "schema_version": "2.1",
        "focus_levels": {"1": {"files": ["a.pdf"]}},
    }));
    assert!(select_entry(&entries, Some("99"), Some("missing")).is_none());
    assert!(select_entry(&entries, None, None).is_none());
}
