// firegate-core/src/vault/model.rs
// ============================================================================
// Module: Firegate Vault Types
// Description: Canonical vault map schema and entry structures.
// Purpose: Provide stable, serializable types for vault documents and entries.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Vault types define the `vault_map.json` document shape: focus levels keyed by
//! focus identifier, each carrying an ordered file list whose items are either a
//! bare path string or a full entry object. These types are the canonical source
//! of truth for any derived API surfaces (HTTP or CLI).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

// ============================================================================
// SECTION: Vault Map
// ============================================================================

/// Root vault map document.
///
/// # Invariants
/// - Loaded fresh per operation and never cached across calls; edits to the
///   underlying file are observed on the next call.
/// - Key order of `focus_levels` is the deterministic iteration order used by
///   flattening and export discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultMap {
    /// Schema version string of the document.
    pub schema_version: String,
    /// Focus levels keyed by focus identifier.
    pub focus_levels: BTreeMap<String, FocusLevel>,
}

/// A named bucket of related entries within the vault map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusLevel {
    /// Optional human-readable label for the level.
    #[serde(default)]
    pub label: Option<String>,
    /// Ordered file list; order is significant for first-match semantics.
    #[serde(default)]
    pub files: Vec<FileSpec>,
}

/// A single item of a focus level's file list.
///
/// A string item is shorthand for an entry containing only a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileSpec {
    /// Bare path shorthand.
    Path(String),
    /// Full entry object.
    Entry(VaultEntry),
}

// ============================================================================
// SECTION: Vault Entry
// ============================================================================

/// A single vault entry, either embedded in the map or resolved from a
/// referenced document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultEntry {
    /// Focus level key the entry belongs to.
    #[serde(default)]
    pub focus: Option<String>,
    /// Label of the focus level the entry belongs to.
    #[serde(default)]
    pub focus_label: Option<String>,
    /// Relative path of the backing content file.
    #[serde(default)]
    pub path: Option<String>,
    /// Pointer to a richer referenced document for this entry.
    #[serde(default)]
    pub entry_ref: Option<String>,
    /// Symbolic tape identifier; numeric values are stringified on load.
    #[serde(default, deserialize_with = "tape_id_from_value")]
    pub tape_id: Option<String>,
    /// Free-form entry status.
    #[serde(default)]
    pub status: Option<String>,
    /// Whether the backing source material exists.
    #[serde(default)]
    pub source_exists: Option<bool>,
    /// Per-metric confidence scores.
    #[serde(default)]
    pub confidence_breakdown: Option<ConfidenceBreakdown>,
    /// Declarative runtime gating policy.
    #[serde(default)]
    pub runtime_policy: Option<RuntimePolicy>,
}

/// Four independent reliability scores in `[0, 1]`.
///
/// # Invariants
/// - Absence is distinct from zero: a missing score is "unknown" and never gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// Somatic reliability score.
    #[serde(default)]
    pub somatic: Option<f64>,
    /// Source reliability score.
    #[serde(default)]
    pub source: Option<f64>,
    /// Mapping reliability score.
    #[serde(default)]
    pub mapping: Option<f64>,
    /// Interpretation reliability score.
    #[serde(default)]
    pub interpretation: Option<f64>,
}

// ============================================================================
// SECTION: Runtime Policy
// ============================================================================

/// Declarative per-entry runtime policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimePolicy {
    /// Gating rules for the entry.
    #[serde(default)]
    pub gating: Option<GatingPolicy>,
}

/// Free-text gating conditions with embedded numeric thresholds.
///
/// Each string is human-authored prose expected to contain a comparison of the
/// form `<metric> < <number>`; only the numeric clause is load-bearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatingPolicy {
    /// Conditions that trigger a soft-stop verdict.
    #[serde(default)]
    pub soft_stop_if: Vec<String>,
    /// Conditions that trigger a preview verdict.
    #[serde(default)]
    pub preview_mode_if: Vec<String>,
}

// ============================================================================
// SECTION: Deserialization Helpers
// ============================================================================

/// Accepts a tape identifier as either a JSON string or number.
///
/// Any other wire form is treated as absent rather than failing the whole
/// entry; schema validation owns structural rejection.
fn tape_id_from_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|tape| match tape {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}
