// firegate-cli/src/clock.rs
// ============================================================================
// Module: Firegate CLI Clock
// Description: Wall-clock timestamp construction for exports.
// Purpose: Supply the host timestamps the clock-free core requires.
// Dependencies: firegate-core, time
// ============================================================================

//! ## Overview
//! The core never reads wall-clock time; the CLI constructs RFC 3339 UTC
//! timestamps here and passes them into export operations, plus a
//! filesystem-safe slug used for default package names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use firegate_core::Timestamp;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// Returns the current UTC time as an export timestamp.
#[must_use]
pub fn now_timestamp() -> Timestamp {
    let text = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    Timestamp::new(text)
}

/// Returns a filesystem-safe UTC slug, second precision, for package names.
#[must_use]
pub fn timestamp_slug() -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]-[minute]-[second]");
    OffsetDateTime::now_utc().format(&format).unwrap_or_else(|_| "unknown-time".to_string())
}
