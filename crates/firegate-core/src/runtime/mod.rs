// firegate-core/src/runtime/mod.rs
// ============================================================================
// Module: Firegate Runtime
// Description: Gate threshold parsing and runtime decision evaluation.
// Purpose: Turn confidence scores and gating policies into gating verdicts.
// Dependencies: crate::vault, regex, serde
// ============================================================================

//! ## Overview
//! The runtime module is the single decision engine for the vault: it parses
//! numeric thresholds out of free-text gating conditions and combines them
//! with per-entry confidence scores into a final verdict. Every consumer, HTTP
//! or CLI, routes through this module; gating logic is never duplicated at a
//! call site.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod decision;
pub mod gates;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use decision::RuntimeDecision;
pub use decision::ScoreOverrides;
pub use decision::Scores;
pub use decision::SignalStatus;
pub use decision::TonePolicy;
pub use decision::compute_runtime_decision;
pub use gates::DEFAULT_GATES;
pub use gates::EffectiveGates;
pub use gates::parse_gate_threshold;
pub use gates::to_number_or_null;
