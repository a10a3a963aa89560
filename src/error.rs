//! Error types for the library registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry errors
///
/// Per-entry validation problems are not errors; they are collected into a
/// [`crate::validate::ValidationReport`]. Everything here halts the operation
/// that produced it.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{}: {reason}", .path.display())]
    Structural { path: PathBuf, reason: String },

    #[error("Import marker not found in host document: {marker}")]
    MissingStartMarker { marker: String },

    #[error("Host document not found: {}", .0.display())]
    HostDocumentNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    pub(crate) fn structural(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Structural {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
