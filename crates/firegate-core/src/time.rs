// firegate-core/src/time.rs
// ============================================================================
// Module: Firegate Time Model
// Description: Caller-supplied timestamp representation for manifests and events.
// Purpose: Keep core exports replayable by never reading wall-clock time.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Firegate embeds explicit timestamp values in fgpack manifests and event logs.
//! The core never reads wall-clock time directly; hosts construct [`Timestamp`]
//! values (RFC 3339 UTC strings) and pass them into export operations, which
//! keeps snapshot hashes reproducible for a fixed input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Caller-supplied timestamp used in fgpack manifests and snapshot events.
///
/// # Invariants
/// - Values are explicitly provided by hosts; the core never reads wall-clock time.
/// - The string is expected to be RFC 3339 UTC; no validation is performed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Creates a timestamp from an RFC 3339 string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the timestamp string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
