// firegate-core/src/runtime/decision.rs
// ============================================================================
// Module: Firegate Runtime Decision Engine
// Description: Gating verdict computation from scores and effective gates.
// Purpose: Decide whether an entry is shown in full, previewed, or withheld.
// Dependencies: crate::{runtime::gates, vault}, serde
// ============================================================================

//! ## Overview
//! The decision engine combines stored confidence scores, caller overrides,
//! and per-entry gating policies into a single verdict. Soft-stop takes strict
//! precedence over preview: it encodes "the underlying evidence itself is
//! unreliable", a categorically worse condition than "the evidence is fine but
//! the interpretive mapping is weak". Overrides let a caller holding a
//! fresher, locally computed score supersede a stale stored score without
//! mutating the vault.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::runtime::gates::DEFAULT_GATES;
use crate::runtime::gates::EffectiveGates;
use crate::runtime::gates::parse_gate_threshold;
use crate::runtime::gates::to_number_or_null;
use crate::vault::ConfidenceBreakdown;
use crate::vault::GatingPolicy;
use crate::vault::ResolvedEntry;
use crate::vault::ResolvedMode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Interpretation threshold below which tone drops to `no_claims`.
const NO_CLAIMS_INTERPRETATION_MIN: f64 = 0.70;
/// Maximum number of reasons reported on a decision.
const MAX_REASONS: usize = 3;

/// Reason emitted when the somatic score is below its gate.
const REASON_SOMATIC_BELOW_MIN: &str = "somatic_below_min";
/// Reason emitted when the source score is below its gate.
const REASON_SOURCE_BELOW_MIN: &str = "source_below_min";
/// Reason emitted when the mapping score is below its gate.
const REASON_MAPPING_BELOW_MIN: &str = "mapping_below_min";
/// Reason emitted when the backing source material is missing.
const REASON_SOURCE_MISSING: &str = "source_missing";

// ============================================================================
// SECTION: Decision Types
// ============================================================================

/// Final gating verdict for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    /// Content may be shown in full.
    Normal,
    /// Content is shown partially with reduced confidence.
    Preview,
    /// Content is withheld due to unreliable underlying evidence.
    SoftStop,
}

/// How assertively interpretive content may be phrased downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TonePolicy {
    /// No interpretive claims may be made.
    NoClaims,
    /// Minimal interpretive claims are permitted.
    Minimal,
}

/// Effective per-metric scores after override and coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Somatic score, or null when unknown.
    pub somatic: Option<f64>,
    /// Source score, or null when unknown.
    pub source: Option<f64>,
    /// Mapping score, or null when unknown.
    pub mapping: Option<f64>,
    /// Interpretation score, or null when unknown.
    pub interpretation: Option<f64>,
}

/// Caller-supplied score overrides superseding stored scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreOverrides {
    /// Somatic score override.
    #[serde(default)]
    pub somatic: Option<f64>,
    /// Source score override.
    #[serde(default)]
    pub source: Option<f64>,
    /// Mapping score override.
    #[serde(default)]
    pub mapping: Option<f64>,
    /// Interpretation score override.
    #[serde(default)]
    pub interpretation: Option<f64>,
}

/// The engine's output verdict and its full audit context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeDecision {
    /// How the entry's final data was obtained.
    pub resolved_mode: ResolvedMode,
    /// Final gating verdict.
    pub runtime_decision: SignalStatus,
    /// Triggered conditions in evaluation order, truncated to three.
    pub reasons: Vec<String>,
    /// Effective scores the verdict was computed from.
    pub scores: Scores,
    /// Concrete thresholds the verdict was computed against.
    pub effective_gates: EffectiveGates,
    /// Tone directive for downstream rendering.
    pub tone_policy: TonePolicy,
    /// Entry path, when known.
    pub path: Option<String>,
    /// Entry tape identifier, when known.
    pub tape_id: Option<String>,
    /// Entry status, when known.
    pub status: Option<String>,
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Computes the gating verdict for a resolved entry.
///
/// Evaluation order is fixed: somatic and source soft-stop checks run first;
/// when either fires, the verdict is soft-stop and preview checks contribute
/// no reasons. Otherwise mapping and source-existence preview checks run. The
/// tone policy is computed independently of the verdict.
#[must_use]
pub fn compute_runtime_decision(
    resolved: &ResolvedEntry,
    overrides: &ScoreOverrides,
) -> RuntimeDecision {
    let entry = &resolved.entry;
    let stored = entry.confidence_breakdown.unwrap_or_default();
    let scores = effective_scores(&stored, overrides);
    let gating = entry.runtime_policy.as_ref().and_then(|policy| policy.gating.as_ref());
    let effective_gates = effective_gates(gating);

    let mut reasons: Vec<String> = Vec::new();
    if scores.somatic.is_some_and(|value| value < effective_gates.somatic_min) {
        reasons.push(REASON_SOMATIC_BELOW_MIN.to_string());
    }
    if scores.source.is_some_and(|value| value < effective_gates.source_min) {
        reasons.push(REASON_SOURCE_BELOW_MIN.to_string());
    }

    let runtime_decision = if reasons.is_empty() {
        if scores.mapping.is_some_and(|value| value < effective_gates.mapping_min) {
            reasons.push(REASON_MAPPING_BELOW_MIN.to_string());
        }
        if entry.source_exists == Some(false) {
            reasons.push(REASON_SOURCE_MISSING.to_string());
        }
        if reasons.is_empty() { SignalStatus::Normal } else { SignalStatus::Preview }
    } else {
        SignalStatus::SoftStop
    };

    let tone_policy = if scores
        .interpretation
        .is_some_and(|value| value < NO_CLAIMS_INTERPRETATION_MIN)
    {
        TonePolicy::NoClaims
    } else {
        TonePolicy::Minimal
    };

    reasons.truncate(MAX_REASONS);

    RuntimeDecision {
        resolved_mode: resolved.resolved_mode,
        runtime_decision,
        reasons,
        scores,
        effective_gates,
        tone_policy,
        path: entry.path.clone(),
        tape_id: entry.tape_id.clone(),
        status: entry.status.clone(),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies overrides over stored scores and coerces each to known-or-null.
fn effective_scores(stored: &ConfidenceBreakdown, overrides: &ScoreOverrides) -> Scores {
    Scores {
        somatic: to_number_or_null(overrides.somatic.or(stored.somatic)),
        source: to_number_or_null(overrides.source.or(stored.source)),
        mapping: to_number_or_null(overrides.mapping.or(stored.mapping)),
        interpretation: to_number_or_null(overrides.interpretation.or(stored.interpretation)),
    }
}

/// Resolves concrete gates from policy conditions, falling back to defaults.
fn effective_gates(gating: Option<&GatingPolicy>) -> EffectiveGates {
    gating.map_or(DEFAULT_GATES, |gating| EffectiveGates {
        somatic_min: parse_gate_threshold(&gating.soft_stop_if, "somatic")
            .unwrap_or(DEFAULT_GATES.somatic_min),
        source_min: parse_gate_threshold(&gating.soft_stop_if, "source")
            .unwrap_or(DEFAULT_GATES.source_min),
        mapping_min: parse_gate_threshold(&gating.preview_mode_if, "mapping")
            .unwrap_or(DEFAULT_GATES.mapping_min),
    })
}
