// firegate-core/src/vault/matcher.rs
// ============================================================================
// Module: Firegate Entry Matching
// Description: Locator matching for vault entries by tape identifier or path.
// Purpose: Select a single entry deterministically with first-match semantics.
// Dependencies: crate::vault::model
// ============================================================================

//! ## Overview
//! Matching is case-insensitive. Tape locators compare against `tape_id` and
//! against `#<tape>` / `tape #<tape>` markers embedded in entry paths; path
//! locators are plain substring tests. Selection tries tape matches across the
//! whole flattened list before falling back to path matches, and the first
//! match in flatten order always wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::vault::model::VaultEntry;

// ============================================================================
// SECTION: Matching Predicates
// ============================================================================

/// Returns true when the entry matches the tape locator.
///
/// Matches on `tape_id` equality, or on the path containing `#<tape>` or
/// `tape #<tape>`, all case-insensitively.
#[must_use]
pub fn matches_tape(entry: &VaultEntry, tape: &str) -> bool {
    let needle = tape.to_lowercase();
    let tape_id = entry.tape_id.as_deref().map(str::to_lowercase);
    if tape_id.is_some_and(|id| id == needle) {
        return true;
    }
    let path = entry.path.as_deref().map_or_else(String::new, str::to_lowercase);
    path.contains(&format!("#{needle}")) || path.contains(&format!("tape #{needle}"))
}

/// Returns true when the entry path contains the locator substring,
/// case-insensitively.
#[must_use]
pub fn matches_path(entry: &VaultEntry, path: &str) -> bool {
    let needle = path.to_lowercase();
    entry.path.as_deref().is_some_and(|entry_path| entry_path.to_lowercase().contains(&needle))
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Selects the first entry matching the supplied locators.
///
/// Tape matches are tried across all entries first; path matches are the
/// fallback. Locator presence is checked with `Option::is_some`, never a
/// falsy test, so a tape value of `"0"` is a present locator.
#[must_use]
pub fn select_entry<'a>(
    entries: &'a [VaultEntry],
    tape: Option<&str>,
    path: Option<&str>,
) -> Option<&'a VaultEntry> {
    if let Some(tape) = tape {
        if let Some(found) = entries.iter().find(|entry| matches_tape(entry, tape)) {
            return Some(found);
        }
    }
    if let Some(path) = path {
        if let Some(found) = entries.iter().find(|entry| matches_path(entry, path)) {
            return Some(found);
        }
    }
    None
}
