//! README generation pass: load, render, merge

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::PathsConfig;
use crate::error::{RegistryError, Result};
use crate::merge;
use crate::render;
use crate::source::{self, LoadedRegistry};

/// A computed host document update, not yet written
#[derive(Debug, Clone)]
pub struct ReadmeUpdate {
    pub path: PathBuf,
    /// Rendered library section
    pub body: String,
    pub current: String,
    pub updated: String,
}

impl ReadmeUpdate {
    pub fn is_changed(&self) -> bool {
        self.current != self.updated
    }

    /// Unified diff of the pending change
    pub fn diff(&self) -> Option<String> {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "README.md".to_string());
        merge::diff(&self.current, &self.updated, &name)
    }

    /// Write the merged document; returns whether anything changed
    pub fn write(&self) -> Result<bool> {
        if !self.is_changed() {
            debug!(path = %self.path.display(), "host document already up to date");
            return Ok(false);
        }
        fs::write(&self.path, &self.updated)?;
        Ok(true)
    }
}

/// Merge a rendered body into the host document at `path`
pub fn prepare_update(path: &Path, body: String) -> Result<ReadmeUpdate> {
    if !path.is_file() {
        return Err(RegistryError::HostDocumentNotFound(path.to_path_buf()));
    }
    let current = fs::read_to_string(path)?;
    let updated = merge::merge(&current, &body)?;
    Ok(ReadmeUpdate {
        path: path.to_path_buf(),
        body,
        current,
        updated,
    })
}

/// Load entries and compute the host document update.
///
/// Returns `Ok(None)` when no entries were found; the host document is left
/// alone in that case.
pub fn generate(paths: &PathsConfig) -> Result<Option<(LoadedRegistry, ReadmeUpdate)>> {
    let loaded = source::load_entries(paths)?;
    if loaded.entries.is_empty() {
        warn!("No libraries found to generate README");
        return Ok(None);
    }
    let body = render::render(&loaded.entries);
    let update = prepare_update(&paths.host_document_path(), body)?;
    Ok(Some((loaded, update)))
}
