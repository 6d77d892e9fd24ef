// firegate-server/src/audit.rs
// ============================================================================
// Module: Firegate Resolve Audit
// Description: Audit sink seam for resolve request outcomes.
// Purpose: Record every resolve outcome without coupling to a log backend.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every resolve request produces one audit event naming the client, the
//! locator, and the outcome. The sink is a seam: the default implementation
//! writes JSON lines to stderr, and tests plug in a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// One resolve request outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveAuditEvent {
    /// Event label, always `vault_resolve`.
    pub event: &'static str,
    /// Client address the request came from.
    pub client: String,
    /// Tape locator, when given.
    pub tape: Option<String>,
    /// Path locator, when given.
    pub path: Option<String>,
    /// HTTP status returned.
    pub status: u16,
    /// Final gating verdict, when a decision was produced.
    pub decision: Option<String>,
    /// Request timestamp (RFC 3339 UTC).
    pub ts: String,
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Receives resolve audit events.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: &ResolveAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    #[allow(clippy::print_stderr, reason = "Stderr is the audit log destination.")]
    fn record(&self, event: &ResolveAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }
}

/// No-op audit sink for tests.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &ResolveAuditEvent) {}
}
