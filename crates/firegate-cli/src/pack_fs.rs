// firegate-cli/src/pack_fs.rs
// ============================================================================
// Module: Firegate CLI Pack Filesystem
// Description: File-backed vault source, pack sink, and pack reader.
// Purpose: Bridge fgpack packaging onto real vault and package directories.
// Dependencies: firegate-core, serde_json
// ============================================================================

//! ## Overview
//! The sink stages every artifact into a temporary sibling directory and
//! renames it onto the destination only after the exporter finishes, so an
//! aborted export leaves no partial package. The reader and source are plain
//! rooted directory views with traversal-safe relative paths.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use firegate_core::PackError;
use firegate_core::PackReader;
use firegate_core::PackSink;
use firegate_core::VaultSource;
use firegate_core::fgpack::EVENTS_FILE_NAME;
use firegate_core::fgpack::FILES_DIR_NAME;
use firegate_core::fgpack::FgpackManifest;
use firegate_core::fgpack::MANIFEST_FILE_NAME;
use firegate_core::fgpack::VAULT_MAP_FILE_NAME;

// ============================================================================
// SECTION: Vault Source
// ============================================================================

/// Filesystem vault source rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileVaultSource {
    /// Vault root directory.
    root: PathBuf,
}

impl FileVaultSource {
    /// Creates a source rooted at the given directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
        }
    }
}

impl VaultSource for FileVaultSource {
    fn read_vault_map(&self) -> Result<Vec<u8>, PackError> {
        self.read_file(VAULT_MAP_FILE_NAME)
    }

    fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, PackError> {
        let safe = safe_relative(rel_path)
            .ok_or_else(|| PackError::Source(format!("unsafe vault path: {rel_path}")))?;
        let path = self.root.join(safe);
        fs::read(&path).map_err(|err| PackError::Source(format!("{}: {err}", path.display())))
    }

    fn root_label(&self) -> String {
        self.root.display().to_string()
    }
}

// ============================================================================
// SECTION: Pack Sink
// ============================================================================

/// File-backed pack sink staging into a temporary sibling directory.
///
/// # Invariants
/// - Nothing appears at the destination until [`PackSink::finalize`] renames
///   the fully written staging directory onto it.
/// - Dropping an unfinalized sink removes the staging directory.
#[derive(Debug)]
pub struct FilePackSink {
    /// Final package destination.
    destination: PathBuf,
    /// Staging directory receiving writes.
    staging: PathBuf,
    /// Whether the staging directory was committed.
    finalized: bool,
}

impl FilePackSink {
    /// Creates a sink staging next to the destination directory.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] when the staging directory cannot be created or
    /// the destination already exists.
    pub fn create(destination: &Path) -> Result<Self, PackError> {
        if destination.exists() {
            return Err(PackError::Sink(format!(
                "destination already exists: {}",
                destination.display()
            )));
        }
        let staging = staging_path(destination);
        fs::create_dir_all(staging.join(FILES_DIR_NAME))
            .map_err(|err| PackError::Sink(format!("{}: {err}", staging.display())))?;
        Ok(Self {
            destination: destination.to_path_buf(),
            staging,
            finalized: false,
        })
    }

    /// Writes bytes to a staging-relative path, creating parent directories.
    fn write_staged(&self, rel_path: &Path, bytes: &[u8]) -> Result<(), PackError> {
        let path = self.staging.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| PackError::Sink(format!("{}: {err}", parent.display())))?;
        }
        fs::write(&path, bytes).map_err(|err| PackError::Sink(format!("{}: {err}", path.display())))
    }
}

impl PackSink for FilePackSink {
    fn write_file(&mut self, rel_path: &str, bytes: &[u8]) -> Result<(), PackError> {
        let safe = safe_relative(rel_path)
            .ok_or_else(|| PackError::Sink(format!("unsafe pack path: {rel_path}")))?;
        self.write_staged(&Path::new(FILES_DIR_NAME).join(safe), bytes)
    }

    fn write_events(&mut self, text: &str) -> Result<(), PackError> {
        self.write_staged(Path::new(EVENTS_FILE_NAME), text.as_bytes())
    }

    fn write_manifest(&mut self, manifest: &FgpackManifest) -> Result<(), PackError> {
        let mut bytes = serde_json::to_vec_pretty(manifest)
            .map_err(|err| PackError::Serialization(err.to_string()))?;
        bytes.push(b'\n');
        self.write_staged(Path::new(MANIFEST_FILE_NAME), &bytes)
    }

    fn finalize(&mut self) -> Result<(), PackError> {
        if let Some(parent) = self.destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| PackError::Sink(format!("{}: {err}", parent.display())))?;
            }
        }
        fs::rename(&self.staging, &self.destination).map_err(|err| {
            PackError::Sink(format!(
                "rename {} -> {}: {err}",
                self.staging.display(),
                self.destination.display()
            ))
        })?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for FilePackSink {
    fn drop(&mut self) {
        if !self.finalized {
            let _ = fs::remove_dir_all(&self.staging);
        }
    }
}

/// Returns the staging directory path for a destination.
fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination.file_name().map_or_else(
        || "fgpack".to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    name.push_str(&format!(".{}.tmp", std::process::id()));
    destination.with_file_name(name)
}

// ============================================================================
// SECTION: Pack Reader
// ============================================================================

/// File-backed pack reader rooted at an exported package directory.
#[derive(Debug, Clone)]
pub struct FilePackReader {
    /// Package root directory.
    root: PathBuf,
}

impl FilePackReader {
    /// Creates a reader rooted at the given package directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
        }
    }

    /// Reads bytes from a package-relative path.
    fn read(&self, rel_path: &Path) -> Result<Vec<u8>, PackError> {
        let path = self.root.join(rel_path);
        fs::read(&path).map_err(|err| PackError::Source(format!("{}: {err}", path.display())))
    }
}

impl PackReader for FilePackReader {
    fn read_manifest(&self) -> Result<Vec<u8>, PackError> {
        self.read(Path::new(MANIFEST_FILE_NAME))
    }

    fn read_events(&self) -> Result<Vec<u8>, PackError> {
        self.read(Path::new(EVENTS_FILE_NAME))
    }

    fn read_file(&self, rel_path: &str) -> Result<Vec<u8>, PackError> {
        let safe = safe_relative(rel_path)
            .ok_or_else(|| PackError::Source(format!("unsafe pack path: {rel_path}")))?;
        self.read(&Path::new(FILES_DIR_NAME).join(safe))
    }
}

// ============================================================================
// SECTION: Path Safety
// ============================================================================

/// Accepts a relative path free of parent and root components.
fn safe_relative(rel_path: &str) -> Option<PathBuf> {
    let path = Path::new(rel_path);
    let safe = !rel_path.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    safe.then(|| path.to_path_buf())
}
