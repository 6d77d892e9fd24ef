// firegate-core/src/vault/resolve.rs
// ============================================================================
// Module: Firegate Entry Reference Resolution
// Description: Optional enrichment of entries from referenced documents.
// Purpose: Load richer backing documents with graceful degradation.
// Dependencies: crate::{interfaces, vault::model}, serde, serde_json
// ============================================================================

//! ## Overview
//! Resolution records how an entry's final data was obtained. The three modes
//! are an explicit enum rather than exceptions for control flow: downstream
//! consumers use the mode as an auditable trust signal for whether the backing
//! document was actually read or only the index entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::interfaces::ReferenceLoader;
use crate::vault::model::VaultEntry;

// ============================================================================
// SECTION: Resolved Entry
// ============================================================================

/// How an entry's final data was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedMode {
    /// The referenced document was loaded and merged over the index entry.
    EntryRef,
    /// The entry carries no reference; only the index entry was available.
    IndexOnly,
    /// Loading the referenced document failed; degraded to the index entry.
    IndexFallback,
}

/// A vault entry together with the record of how it was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    /// The resolved entry data.
    pub entry: VaultEntry,
    /// How the entry data was obtained.
    pub resolved_mode: ResolvedMode,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves an entry's reference, degrading gracefully on any failure.
///
/// Entries without an `entry_ref` resolve as [`ResolvedMode::IndexOnly`]. A
/// loader failure or a non-object payload degrades to
/// [`ResolvedMode::IndexFallback`] keeping the base entry. A loaded object is
/// merged over the base entry with referenced fields winning, except
/// `entry_ref` itself, which is re-asserted from the base so the pointer
/// survives the merge. This function never fails; failure is always expressed
/// as a resolved mode.
#[must_use]
pub fn resolve_entry_ref(entry: &VaultEntry, loader: &dyn ReferenceLoader) -> ResolvedEntry {
    let Some(entry_ref) = entry.entry_ref.clone() else {
        return ResolvedEntry {
            entry: entry.clone(),
            resolved_mode: ResolvedMode::IndexOnly,
        };
    };

    let overlay = loader
        .load(&entry_ref)
        .ok()
        .filter(serde_json::Value::is_object)
        .and_then(|referenced| serde_json::from_value::<VaultEntry>(referenced).ok());

    overlay.map_or_else(
        || ResolvedEntry {
            entry: entry.clone(),
            resolved_mode: ResolvedMode::IndexFallback,
        },
        |overlay| {
            let mut merged = merge_entry(entry, overlay);
            merged.entry_ref = Some(entry_ref.clone());
            ResolvedEntry {
                entry: merged,
                resolved_mode: ResolvedMode::EntryRef,
            }
        },
    )
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Overlays referenced fields over the base entry; present fields win.
fn merge_entry(base: &VaultEntry, overlay: VaultEntry) -> VaultEntry {
    VaultEntry {
        focus: overlay.focus.or_else(|| base.focus.clone()),
        focus_label: overlay.focus_label.or_else(|| base.focus_label.clone()),
        path: overlay.path.or_else(|| base.path.clone()),
        entry_ref: base.entry_ref.clone(),
        tape_id: overlay.tape_id.or_else(|| base.tape_id.clone()),
        status: overlay.status.or_else(|| base.status.clone()),
        source_exists: overlay.source_exists.or(base.source_exists),
        confidence_breakdown: overlay.confidence_breakdown.or(base.confidence_breakdown),
        runtime_policy: overlay.runtime_policy.or_else(|| base.runtime_policy.clone()),
    }
}
