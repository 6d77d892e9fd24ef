// firegate-core/src/runtime/gates.rs
// ============================================================================
// Module: Firegate Gate Thresholds
// Description: Numeric threshold extraction from free-text gating conditions.
// Purpose: Bind only the documented comparison pattern, never surrounding prose.
// Dependencies: regex, serde
// ============================================================================

//! ## Overview
//! Policy authors write prose-like rule strings such as
//! `"soft_stop_if: somatic < 0.75, source is missing"`. Only the numeric
//! clause is load-bearing; the rest of the text is human documentation and
//! must never affect behavior. The extraction contract is intentionally a
//! narrow pattern match, not a boolean expression evaluator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Effective Gates
// ============================================================================

/// Concrete per-metric thresholds applied by the decision engine.
///
/// # Invariants
/// - Every metric always resolves to a concrete number: a parsed threshold
///   when a condition carries one, otherwise the fixed default. Never null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveGates {
    /// Minimum somatic score before soft-stop.
    pub somatic_min: f64,
    /// Minimum source score before soft-stop.
    pub source_min: f64,
    /// Minimum mapping score before preview.
    pub mapping_min: f64,
}

/// Fixed fallback thresholds when policy conditions are absent or unparsable.
pub const DEFAULT_GATES: EffectiveGates = EffectiveGates {
    somatic_min: 0.80,
    source_min: 0.75,
    mapping_min: 0.70,
};

// ============================================================================
// SECTION: Threshold Parsing
// ============================================================================

/// Extracts the first numeric threshold for a metric from condition strings.
///
/// Each condition is matched against the case-insensitive pattern
/// "word-boundary metric, optional whitespace, `<`, optional whitespace, a
/// decimal number". Returns the first match's value, or `None` when no
/// condition matches. Metric names are fixed identifiers supplied by the
/// engine, never caller-controlled pattern input.
#[must_use]
pub fn parse_gate_threshold(conditions: &[String], metric: &str) -> Option<f64> {
    let matcher = Regex::new(&format!(r"(?i)\b{metric}\s*<\s*(\d+(?:\.\d+)?)")).ok()?;
    for condition in conditions {
        let Some(captures) = matcher.captures(condition) else {
            continue;
        };
        let Some(parsed) = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) else {
            continue;
        };
        if let Some(value) = to_number_or_null(Some(parsed)) {
            return Some(value);
        }
    }
    None
}

// ============================================================================
// SECTION: Score Coercion
// ============================================================================

/// Coerces an optional score to a known number, or `None` for "unknown".
///
/// Non-finite values are unknown; unknown scores never gate.
#[must_use]
pub fn to_number_or_null(value: Option<f64>) -> Option<f64> {
    value.filter(|number| number.is_finite())
}
