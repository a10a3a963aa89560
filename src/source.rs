//! Entry loading
//!
//! Two providers feed entries into the rest of the crate: the aggregate
//! document (`registry.json` with a `libraries` list) and the legacy
//! one-directory-per-entry layout. The aggregate source wins whenever it
//! exists; the legacy directory is only consulted as a fallback.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::PathsConfig;
use crate::entry::{EntryOrigin, LibraryEntry};
use crate::error::{RegistryError, Result};

/// Which provider produced a [`LoadedRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Aggregate,
    Legacy,
    /// Neither the aggregate document nor the legacy directory exists
    Empty,
}

/// A legacy document that could not be loaded
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of running an entry source
#[derive(Debug, Clone, Serialize)]
pub struct LoadedRegistry {
    pub kind: SourceKind,
    pub entries: Vec<LibraryEntry>,
    pub skipped: Vec<SkippedDocument>,
}

impl LoadedRegistry {
    pub fn empty() -> Self {
        Self {
            kind: SourceKind::Empty,
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// A provider of library entries
pub trait EntrySource {
    /// Whether this source is present and should be used
    fn is_available(&self) -> bool;

    /// Load every entry in discovery order
    fn load(&self) -> Result<LoadedRegistry>;
}

/// The single-file registry: `{ "libraries": [ ... ] }`
#[derive(Debug, Clone)]
pub struct AggregateSource {
    path: PathBuf,
}

impl AggregateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse aggregate document text. Any structural problem is fatal.
    pub fn parse(&self, content: &str) -> Result<LoadedRegistry> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| RegistryError::structural(&self.path, e.to_string()))?;

        let Some(libraries) = root.get("libraries").and_then(Value::as_array) else {
            return Err(RegistryError::structural(
                &self.path,
                "'libraries' must be an array",
            ));
        };

        let entries = libraries
            .iter()
            .enumerate()
            .map(|(index, fields)| {
                LibraryEntry::new(
                    EntryOrigin::Aggregate { path: self.path.clone(), index },
                    fields.clone(),
                )
            })
            .collect::<Vec<_>>();

        debug!(path = %self.path.display(), count = entries.len(), "loaded aggregate registry");

        Ok(LoadedRegistry {
            kind: SourceKind::Aggregate,
            entries,
            skipped: Vec::new(),
        })
    }
}

impl EntrySource for AggregateSource {
    fn is_available(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<LoadedRegistry> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| RegistryError::structural(&self.path, e.to_string()))?;
        self.parse(&content)
    }
}

/// The folder-based layout: `<dir>/<entry>/index.json`
#[derive(Debug, Clone)]
pub struct LegacySource {
    dir: PathBuf,
    document: String,
}

impl LegacySource {
    pub fn new(dir: impl Into<PathBuf>, document: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            document: document.into(),
        }
    }
}

impl EntrySource for LegacySource {
    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    fn load(&self) -> Result<LoadedRegistry> {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for walked in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let dir_entry = match walked {
                Ok(dir_entry) => dir_entry,
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "skipping unreadable registry entry");
                    continue;
                }
            };
            if !dir_entry.file_type().is_dir() {
                continue;
            }
            let path = dir_entry.path().join(&self.document);
            if !path.is_file() {
                debug!(dir = %dir_entry.path().display(), "no entry document, skipping");
                continue;
            }

            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
                });

            match parsed {
                Ok(fields) => {
                    entries.push(LibraryEntry::new(EntryOrigin::Legacy { path }, fields));
                }
                Err(reason) => {
                    warn!(path = %path.display(), %reason, "skipping unreadable entry document");
                    skipped.push(SkippedDocument { path, reason });
                }
            }
        }

        debug!(dir = %self.dir.display(), count = entries.len(), "loaded legacy registry");

        Ok(LoadedRegistry {
            kind: SourceKind::Legacy,
            entries,
            skipped,
        })
    }
}

/// Run the first available source; an empty registry when none is available
pub fn load_first_available(sources: &[&dyn EntrySource]) -> Result<LoadedRegistry> {
    for source in sources {
        if source.is_available() {
            return source.load();
        }
    }
    Ok(LoadedRegistry::empty())
}

fn configured_sources(paths: &PathsConfig) -> (AggregateSource, LegacySource) {
    (
        AggregateSource::new(paths.aggregate_path()),
        LegacySource::new(paths.legacy_dir_path(), paths.legacy_document.clone()),
    )
}

/// Which source [`load_entries`] would read, without loading anything
pub fn detect_source(paths: &PathsConfig) -> SourceKind {
    let (aggregate, legacy) = configured_sources(paths);
    if aggregate.is_available() {
        SourceKind::Aggregate
    } else if legacy.is_available() {
        SourceKind::Legacy
    } else {
        SourceKind::Empty
    }
}

/// Load entries using the configured locations: aggregate first, legacy fallback
pub fn load_entries(paths: &PathsConfig) -> Result<LoadedRegistry> {
    let (aggregate, legacy) = configured_sources(paths);
    load_first_available(&[&aggregate, &legacy])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_aggregate_preserves_order() {
        let source = AggregateSource::new("registry.json");
        let loaded = source
            .parse(r#"{"libraries": [{"name": "b"}, {"name": "a"}, {"name": "c"}]}"#)
            .unwrap();
        let names: Vec<_> = loaded.entries.iter().filter_map(|e| e.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(loaded.kind, SourceKind::Aggregate);
        assert_eq!(
            loaded.entries[1].origin,
            EntryOrigin::Aggregate { path: PathBuf::from("registry.json"), index: 1 }
        );
    }

    #[test]
    fn test_aggregate_libraries_not_a_list() {
        let source = AggregateSource::new("registry.json");
        let err = source.parse(r#"{"libraries": {"name": "x"}}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Structural { .. }));
        assert!(err.to_string().contains("'libraries' must be an array"));
    }

    #[test]
    fn test_aggregate_missing_libraries_field() {
        let source = AggregateSource::new("registry.json");
        assert!(source.parse("{}").is_err());
    }

    #[test]
    fn test_aggregate_malformed_json_is_structural() {
        let source = AggregateSource::new("registry.json");
        let err = source.parse("{ not json").unwrap_err();
        assert!(matches!(err, RegistryError::Structural { .. }));
    }

    #[test]
    fn test_legacy_skips_missing_and_malformed() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good");
        let bad = dir.path().join("bad");
        let empty = dir.path().join("empty");
        fs::create_dir_all(&good).unwrap();
        fs::create_dir_all(&bad).unwrap();
        fs::create_dir_all(&empty).unwrap();
        fs::write(good.join("index.json"), r#"{"name": "Good"}"#).unwrap();
        fs::write(bad.join("index.json"), "{ broken").unwrap();
        fs::write(dir.path().join("stray.json"), "{}").unwrap();

        let loaded = LegacySource::new(dir.path(), "index.json").load().unwrap();
        assert_eq!(loaded.kind, SourceKind::Legacy);
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].name(), Some("Good"));
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].path, bad.join("index.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_legacy_follows_symlinked_entry_dirs() {
        let dir = tempdir().unwrap();
        let libs = dir.path().join("libs");
        let real = dir.path().join("real-acme");
        fs::create_dir_all(&libs).unwrap();
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("index.json"), r#"{"name": "Acme"}"#).unwrap();
        std::os::unix::fs::symlink("../real-acme", libs.join("acme")).unwrap();
        // Dangling links are logged and skipped, not fatal
        std::os::unix::fs::symlink("../missing", libs.join("gone")).unwrap();

        let loaded = LegacySource::new(&libs, "index.json").load().unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].name(), Some("Acme"));
        assert_eq!(
            loaded.entries[0].origin,
            EntryOrigin::Legacy { path: libs.join("acme").join("index.json") }
        );
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn test_aggregate_preferred_over_legacy() {
        let dir = tempdir().unwrap();
        let entry_dir = dir.path().join("registry/libraries/legacy");
        fs::create_dir_all(&entry_dir).unwrap();
        fs::write(entry_dir.join("index.json"), r#"{"name": "Legacy"}"#).unwrap();
        fs::write(
            dir.path().join("registry.json"),
            r#"{"libraries": [{"name": "Aggregate"}]}"#,
        )
        .unwrap();

        let paths = PathsConfig {
            root: dir.path().to_path_buf(),
            ..PathsConfig::default()
        };
        assert_eq!(detect_source(&paths), SourceKind::Aggregate);
        let loaded = load_entries(&paths).unwrap();
        assert_eq!(loaded.kind, SourceKind::Aggregate);
        assert_eq!(loaded.entries[0].name(), Some("Aggregate"));

        fs::remove_file(dir.path().join("registry.json")).unwrap();
        assert_eq!(detect_source(&paths), SourceKind::Legacy);
        let loaded = load_entries(&paths).unwrap();
        assert_eq!(loaded.kind, SourceKind::Legacy);
        assert_eq!(loaded.entries[0].name(), Some("Legacy"));
    }

    #[test]
    fn test_no_sources_is_empty() {
        let dir = tempdir().unwrap();
        let paths = PathsConfig {
            root: dir.path().to_path_buf(),
            ..PathsConfig::default()
        };
        let loaded = load_entries(&paths).unwrap();
        assert_eq!(loaded.kind, SourceKind::Empty);
        assert!(loaded.entries.is_empty());
    }

    #[test]
    fn test_detect_source_legacy_path_must_be_a_dir() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("registry")).unwrap();
        fs::write(dir.path().join("registry/libraries"), "").unwrap();

        let paths = PathsConfig {
            root: dir.path().to_path_buf(),
            ..PathsConfig::default()
        };
        assert_eq!(detect_source(&paths), SourceKind::Empty);
    }
}
