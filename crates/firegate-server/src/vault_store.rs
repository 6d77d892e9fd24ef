// firegate-server/src/vault_store.rs
// ============================================================================
// Module: Firegate Vault Store
// Description: Filesystem access to the vault map and referenced documents.
// Purpose: Load the vault fresh per request and resolve entry references safely.
// Dependencies: firegate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The store reads `vault_map.json` from the configured vault root on every
//! call; nothing is cached, so edits to the file are observed on the next
//! request. Reference loading rejects paths that escape the vault root before
//! touching the filesystem.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use firegate_core::ReferenceLoadError;
use firegate_core::ReferenceLoader;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Vault Store
// ============================================================================

/// Filesystem-backed vault store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileVaultStore {
    /// Vault root directory.
    root: PathBuf,
}

impl FileVaultStore {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
        }
    }

    /// Loads and parses `vault_map.json` fresh from disk.
    ///
    /// # Errors
    ///
    /// Returns [`VaultStoreError`] when the map cannot be read or parsed.
    pub fn load_map(&self) -> Result<Value, VaultStoreError> {
        let path = self.root.join("vault_map.json");
        let bytes = fs::read(&path)
            .map_err(|err| VaultStoreError::Io(format!("{}: {err}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| VaultStoreError::Parse(format!("{}: {err}", path.display())))
    }

    /// Returns a reference loader rooted at this store's directory.
    #[must_use]
    pub fn reference_loader(&self) -> FileReferenceLoader {
        FileReferenceLoader {
            root: self.root.clone(),
        }
    }
}

// ============================================================================
// SECTION: Reference Loader
// ============================================================================

/// Loads referenced documents relative to the vault root.
#[derive(Debug, Clone)]
pub struct FileReferenceLoader {
    /// Vault root directory.
    root: PathBuf,
}

impl ReferenceLoader for FileReferenceLoader {
    fn load(&self, entry_ref: &str) -> Result<Value, ReferenceLoadError> {
        if !is_safe_relative_path(Path::new(entry_ref)) {
            return Err(ReferenceLoadError::Read(format!(
                "reference escapes vault root: {entry_ref}"
            )));
        }
        let path = self.root.join(entry_ref);
        let bytes = fs::read(&path)
            .map_err(|err| ReferenceLoadError::Read(format!("{}: {err}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ReferenceLoadError::Parse(format!("{}: {err}", path.display())))
    }
}

/// Returns true when the path is relative and free of parent components.
fn is_safe_relative_path(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Vault store errors.
#[derive(Debug, Error)]
pub enum VaultStoreError {
    /// The vault map could not be read.
    #[error("vault read failed: {0}")]
    Io(String),
    /// The vault map could not be parsed as JSON.
    #[error("vault parse failed: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]

    use std::path::Path;

    use super::is_safe_relative_path;

    #[test]
    fn rejects_parent_and_absolute_references() {
        assert!(!is_safe_relative_path(Path::new("../secrets.json")));
        assert!(!is_safe_relative_path(Path::new("/etc/passwd")));
        assert!(!is_safe_relative_path(Path::new("a/../../b.json")));
        assert!(!is_safe_relative_path(Path::new("")));
    }

    #[test]
    fn accepts_nested_relative_references() {
        assert!(is_safe_relative_path(Path::new("tape_entries/tape_29.json")));
        assert!(is_safe_relative_path(Path::new("./tape_entries/tape_29.json")));
    }
}
