// firegate-core/src/vault/mod.rs
// ============================================================================
// Module: Firegate Vault
// Description: Vault map schema, validation, flattening, matching, and resolution.
// Purpose: Provide the canonical entry pipeline from raw vault maps to resolved entries.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The vault module owns the path from a raw `vault_map.json` document to a
//! single resolved entry: schema validation fails closed, flattening produces a
//! deterministic entry order, matching selects by tape or path with first-match
//! semantics, and reference resolution degrades gracefully instead of erroring.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod flatten;
pub mod matcher;
pub mod model;
pub mod resolve;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use flatten::flatten_entries;
pub use matcher::matches_path;
pub use matcher::matches_tape;
pub use matcher::select_entry;
pub use model::ConfidenceBreakdown;
pub use model::FileSpec;
pub use model::FocusLevel;
pub use model::GatingPolicy;
pub use model::RuntimePolicy;
pub use model::VaultEntry;
pub use model::VaultMap;
pub use resolve::ResolvedEntry;
pub use resolve::ResolvedMode;
pub use resolve::resolve_entry_ref;
pub use validate::ValidationReport;
pub use validate::validate_vault_map;
