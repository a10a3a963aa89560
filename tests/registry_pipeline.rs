//! End-to-end tests over on-disk registries
//!
//! Builds aggregate and legacy registries in temporary directories and runs
//! the load, validate, render and merge passes against them.

use std::fs;
use std::path::Path;

use library_registry::config::PathsConfig;
use library_registry::merge::{END_MARKER, START_MARKER};
use library_registry::render::{BETA_HEADING, PRODUCTION_HEADING};
use library_registry::{load_entries, readme, RegistryError, SourceKind, Validator};
use serde_json::json;
use tempfile::tempdir;

const REGISTRY: &str = include_str!("fixtures/registry.json");
const HOST_README: &str = include_str!("fixtures/host_readme.md");

fn paths_for(root: &Path) -> PathsConfig {
    PathsConfig {
        root: root.to_path_buf(),
        ..PathsConfig::default()
    }
}

fn write_legacy_entry(root: &Path, dir: &str, value: &serde_json::Value) {
    let entry_dir = root.join("registry/libraries").join(dir);
    fs::create_dir_all(&entry_dir).unwrap();
    fs::write(
        entry_dir.join("index.json"),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_fixture_registry_is_valid() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("registry.json"), REGISTRY).unwrap();

    let loaded = load_entries(&paths_for(dir.path())).unwrap();
    assert_eq!(loaded.kind, SourceKind::Aggregate);
    assert_eq!(loaded.entries.len(), 4);

    let report = Validator::default().validate_loaded(&loaded);
    assert!(report.is_valid(), "{:#?}", report);
    assert_eq!(report.total, 4);
    assert_eq!(report.warning_count(), 0);
    assert!(report.entries[1].id.ends_with("registry.json#libraries[1]"));
}

#[test]
fn test_duplicates_attributed_to_later_entries() {
    let dir = tempdir().unwrap();
    let mut registry: serde_json::Value = serde_json::from_str(REGISTRY).unwrap();
    let libraries = registry["libraries"].as_array_mut().unwrap();
    let mut copy = libraries[0].clone();
    copy["description"] = json!("Same name, different description");
    libraries.push(copy);
    fs::write(dir.path().join("registry.json"), registry.to_string()).unwrap();

    let loaded = load_entries(&paths_for(dir.path())).unwrap();
    let report = Validator::default().validate(&loaded.entries);

    assert!(!report.is_valid());
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].position, 4);
    let codes: Vec<_> = failures[0].errors().map(|f| f.code).collect();
    assert_eq!(codes, vec!["DUPLICATE_NAME", "DUPLICATE_REGISTRY_URL"]);
}

#[test]
fn test_libraries_not_a_list_is_structural() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("registry.json"),
        r#"{"libraries": {"name": "Acme"}}"#,
    )
    .unwrap();

    let err = load_entries(&paths_for(dir.path())).unwrap_err();
    assert!(matches!(err, RegistryError::Structural { .. }));
}

#[test]
fn test_empty_registry_warns_but_passes() {
    let dir = tempdir().unwrap();
    let loaded = load_entries(&paths_for(dir.path())).unwrap();
    assert_eq!(loaded.kind, SourceKind::Empty);

    let report = Validator::default().validate_loaded(&loaded);
    assert!(report.is_valid());
    assert_eq!(report.total, 0);
    assert_eq!(report.failure_count(), 0);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, "NO_ENTRIES");
}

#[test]
fn test_legacy_layout_validation() {
    let dir = tempdir().unwrap();
    let registry: serde_json::Value = serde_json::from_str(REGISTRY).unwrap();

    let mut good = registry["libraries"][0].clone();
    good["$schema"] = json!("../../../schemas/library.json");
    write_legacy_entry(dir.path(), "zeta-ui", &good);

    // Valid apart from the missing $schema: warning only
    write_legacy_entry(dir.path(), "acme-blocks", &registry["libraries"][1]);

    let broken = dir.path().join("registry/libraries/broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("index.json"), "{ \"name\": ").unwrap();

    fs::create_dir_all(dir.path().join("registry/libraries/no-document")).unwrap();

    let loaded = load_entries(&paths_for(dir.path())).unwrap();
    assert_eq!(loaded.kind, SourceKind::Legacy);
    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.skipped.len(), 1);

    let report = Validator::default().validate_loaded(&loaded);
    assert_eq!(report.total, 3);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.warning_count(), 1);
    let failed = report.failures().next().unwrap();
    assert!(failed.id.contains("broken"));
    assert_eq!(failed.findings[0].code, "UNREADABLE_DOCUMENT");
}

// =============================================================================
// README generation
// =============================================================================

#[test]
fn test_generate_readme_from_fixture() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("registry.json"), REGISTRY).unwrap();
    fs::write(dir.path().join("README.md"), HOST_README).unwrap();

    let (loaded, update) = readme::generate(&paths_for(dir.path())).unwrap().unwrap();
    assert_eq!(loaded.entries.len(), 4);
    assert!(update.write().unwrap());

    let written = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(written.starts_with("# Awesome shadcn/ui registries"));
    assert!(written.ends_with("Add your library to `registry.json` and open a pull request.\n"));
    assert_eq!(written.matches(START_MARKER).count(), 1);
    assert_eq!(written.matches(END_MARKER).count(), 1);

    let production = written.find(PRODUCTION_HEADING).unwrap();
    let beta = written.find(BETA_HEADING).unwrap();
    let acme = written.find("<strong>Acme Blocks</strong>").unwrap();
    let zeta = written.find("<strong>Zeta UI</strong>").unwrap();
    let nightly = written.find("<strong>Nightly Kit</strong>").unwrap();
    assert!(production < acme && acme < zeta && zeta < beta && beta < nightly);
    assert!(!written.contains("Draft UI"));
    assert!(written.contains("(48 components)"));
}

#[test]
fn test_generate_readme_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("registry.json"), REGISTRY).unwrap();
    fs::write(dir.path().join("README.md"), HOST_README).unwrap();
    let paths = paths_for(dir.path());

    let (_, first) = readme::generate(&paths).unwrap().unwrap();
    first.write().unwrap();
    let after_first = fs::read_to_string(dir.path().join("README.md")).unwrap();

    let (_, second) = readme::generate(&paths).unwrap().unwrap();
    assert!(!second.is_changed());
    assert!(second.diff().is_none());
    assert!(!second.write().unwrap());
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), after_first);
}

#[test]
fn test_generate_readme_without_marker_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("registry.json"), REGISTRY).unwrap();
    fs::write(dir.path().join("README.md"), "# No markers\n").unwrap();

    let err = readme::generate(&paths_for(dir.path())).unwrap_err();
    assert!(matches!(err, RegistryError::MissingStartMarker { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        "# No markers\n"
    );
}

#[test]
fn test_generate_readme_with_no_entries_leaves_host_alone() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("registry.json"), r#"{"libraries": []}"#).unwrap();
    fs::write(dir.path().join("README.md"), HOST_README).unwrap();

    assert!(readme::generate(&paths_for(dir.path())).unwrap().is_none());
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        HOST_README
    );
}
