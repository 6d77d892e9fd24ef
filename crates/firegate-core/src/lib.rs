// firegate-core/src/lib.rs
// ============================================================================
// Module: Firegate Core Library
// Description: Public API surface for the Firegate core.
// Purpose: Expose vault, runtime decision, and fgpack packaging helpers.
// Dependencies: crate::{fgpack, interfaces, runtime, vault}
// ============================================================================

//! ## Overview
//! Firegate core provides deterministic vault resolution, confidence gating, and
//! fgpack export/verification for personal content vaults. It is backend-agnostic
//! and integrates through explicit interfaces rather than embedding into any
//! HTTP or CLI host.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fgpack;
pub mod hashing;
pub mod interfaces;
pub mod runtime;
pub mod time;
pub mod vault;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use fgpack::FgpackEvent;
pub use fgpack::FgpackExporter;
pub use fgpack::FgpackManifest;
pub use fgpack::FgpackVerifier;
pub use fgpack::FileRecord;
pub use fgpack::PackError;
pub use fgpack::VerificationReport;
pub use interfaces::PackReader;
pub use interfaces::PackSink;
pub use interfaces::ReferenceLoadError;
pub use interfaces::ReferenceLoader;
pub use interfaces::VaultSource;
pub use runtime::DEFAULT_GATES;
pub use runtime::EffectiveGates;
pub use runtime::RuntimeDecision;
pub use runtime::ScoreOverrides;
pub use runtime::Scores;
pub use runtime::SignalStatus;
pub use runtime::TonePolicy;
pub use runtime::compute_runtime_decision;
pub use runtime::parse_gate_threshold;
pub use runtime::to_number_or_null;
pub use time::Timestamp;
pub use vault::ConfidenceBreakdown;
pub use vault::FocusLevel;
pub use vault::GatingPolicy;
pub use vault::ResolvedEntry;
pub use vault::ResolvedMode;
pub use vault::RuntimePolicy;
pub use vault::ValidationReport;
pub use vault::VaultEntry;
pub use vault::VaultMap;
pub use vault::flatten_entries;
pub use vault::matches_path;
pub use vault::matches_tape;
pub use vault::resolve_entry_ref;
pub use vault::select_entry;
pub use vault::validate_vault_map;
