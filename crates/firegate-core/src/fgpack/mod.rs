// firegate-core/src/fgpack/mod.rs
// ============================================================================
// Module: Firegate Fgpack
// Description: Content-addressed export packages and offline verification.
// Purpose: Export and validate tamper-evident vault snapshots.
// Dependencies: crate::{hashing, interfaces}, serde
// ============================================================================

//! ## Overview
//! An fgpack package is a directory of verbatim file copies plus an
//! append-only event log and a manifest. The snapshot hash covers the exact
//! serialized event-log bytes, so any reordering or re-serialization changes
//! it; per-file hashes make every copied byte verifiable. The verifier is a
//! diagnostic tool and never fails fast.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod export;
pub mod manifest;
pub mod verify;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use export::FgpackExporter;
pub use manifest::EVENTS_FILE_NAME;
pub use manifest::FGPACK_FORMAT;
pub use manifest::FILES_DIR_NAME;
pub use manifest::FGPACK_VERSION;
pub use manifest::FgpackEvent;
pub use manifest::FgpackManifest;
pub use manifest::FileRecord;
pub use manifest::MANIFEST_FILE_NAME;
pub use manifest::PackError;
pub use manifest::VAULT_MAP_FILE_NAME;
pub use verify::FgpackVerifier;
pub use verify::VerificationReport;
