// firegate-core/src/vault/flatten.rs
// ============================================================================
// Module: Firegate Entry Flattening
// Description: Deterministic flattening of vault maps into ordered entry lists.
// Purpose: Produce the stable entry order that first-match selection depends on.
// Dependencies: crate::vault::model, serde_json
// ============================================================================

//! ## Overview
//! Flattening walks focus levels in natural key order (numeric keys ascending,
//! then remaining keys lexicographically) and each level's files in array
//! order. The resulting order is significant: locator matching downstream uses
//! first-match-wins semantics, so the traversal must be stable and never
//! depend on unspecified map iteration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::vault::model::FileSpec;
use crate::vault::model::FocusLevel;
use crate::vault::model::VaultEntry;
use crate::vault::model::VaultMap;

// ============================================================================
// SECTION: Flattening
// ============================================================================

/// Flattens a raw vault map document into an ordered entry list.
///
/// String files become `{focus, focus_label, path}` rows; object files keep
/// their own fields and only receive the synthesized `focus`/`focus_label`
/// when absent. A document that does not deserialize as a vault map yields an
/// empty list rather than erroring; schema validation is the authoritative
/// gate and callers run it first.
#[must_use]
pub fn flatten_entries(vault_map: &Value) -> Vec<VaultEntry> {
    let Ok(map) = serde_json::from_value::<VaultMap>(vault_map.clone()) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for (focus, level) in ordered_levels(&map.focus_levels) {
        for file in &level.files {
            match file {
                FileSpec::Path(path) => rows.push(VaultEntry {
                    focus: Some(focus.clone()),
                    focus_label: level.label.clone(),
                    path: Some(path.clone()),
                    ..VaultEntry::default()
                }),
                FileSpec::Entry(entry) => {
                    let mut row = entry.clone();
                    if row.focus.is_none() {
                        row.focus = Some(focus.clone());
                    }
                    if row.focus_label.is_none() {
                        row.focus_label = level.label.clone();
                    }
                    rows.push(row);
                }
            }
        }
    }
    rows
}

// ============================================================================
// SECTION: Level Ordering
// ============================================================================

/// Returns focus levels in natural key order.
///
/// Numeric keys sort ascending by value before non-numeric keys, which sort
/// lexicographically. Vault maps key levels by small integers, so this matches
/// the order policy authors see in the document.
pub(crate) fn ordered_levels<'a>(
    levels: &'a BTreeMap<String, FocusLevel>,
) -> Vec<(&'a String, &'a FocusLevel)> {
    let mut entries: Vec<(&'a String, &'a FocusLevel)> = levels.iter().collect();
    entries.sort_by(|(left, _), (right, _)| level_key(left).cmp(&level_key(right)));
    entries
}

/// Sort key placing numeric focus keys ahead of non-numeric ones.
pub(crate) fn level_key(key: &str) -> (u8, u64, &str) {
    key.parse::<u64>().map_or((1, 0, key), |value| (0, value, key))
}
