// firegate-core/src/vault/validate.rs
// ============================================================================
// Module: Firegate Vault Schema Validation
// Description: Fail-closed structural validation of raw vault map documents.
// Purpose: Reject malformed vault maps before any decision logic runs.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Validation inspects a raw JSON document and collects every structural
//! problem into a report. It never errors and never panics; callers must treat
//! `valid == false` as "do not proceed" rather than defaulting to an empty
//! vault.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Validation Report
// ============================================================================

/// Outcome of vault map validation.
///
/// # Invariants
/// - `valid` is true if and only if `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether the document passed every structural check.
    pub valid: bool,
    /// Descriptive errors naming the offending JSON paths.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Builds a report from collected errors.
    #[must_use]
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the structure of a raw vault map document.
///
/// Fails closed: a non-object root, a missing or non-string `schema_version`,
/// a missing or non-object `focus_levels`, a non-array `files` list, or a file
/// entry that is neither a string nor an object with a string `path` each
/// produce one descriptive error.
#[must_use]
pub fn validate_vault_map(vault_map: &Value) -> ValidationReport {
    let Some(root) = vault_map.as_object() else {
        return ValidationReport::from_errors(vec!["vault_map must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();

    if !root.get("schema_version").is_some_and(Value::is_string) {
        errors.push("schema_version must be a string".to_string());
    }

    let Some(levels) = root.get("focus_levels").and_then(Value::as_object) else {
        errors.push("focus_levels must be an object".to_string());
        return ValidationReport::from_errors(errors);
    };

    for (focus_key, level_value) in levels {
        let Some(level) = level_value.as_object() else {
            errors.push(format!("focus_levels.{focus_key} must be an object"));
            continue;
        };
        let Some(files) = level.get("files").and_then(Value::as_array) else {
            errors.push(format!("focus_levels.{focus_key}.files must be an array"));
            continue;
        };
        for (index, file) in files.iter().enumerate() {
            if file.is_string() {
                continue;
            }
            let Some(entry) = file.as_object() else {
                errors.push(format!(
                    "focus_levels.{focus_key}.files[{index}] must be string or object"
                ));
                continue;
            };
            if !entry.get("path").is_some_and(Value::is_string) {
                errors.push(format!(
                    "focus_levels.{focus_key}.files[{index}].path must be a string"
                ));
            }
            if let Some(breakdown) = entry.get("confidence_breakdown") {
                if !breakdown.is_object() {
                    errors.push(format!(
                        "focus_levels.{focus_key}.files[{index}].confidence_breakdown must be an \
                         object"
                    ));
                }
            }
        }
    }

    ValidationReport::from_errors(errors)
}
