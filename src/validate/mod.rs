//! Registry Validation
//!
//! Checks every loaded entry against the registry rules and collects the
//! findings into a [`ValidationReport`]. Nothing here prints or exits; the
//! binaries decide how to present the report.
//!
//! ## Per-entry rules
//! 1. **Schema reference** (warning): legacy documents should point at the
//!    library schema
//! 2. **Required fields**: name, description, author, category, version,
//!    shadcnCompatible
//! 3. **Category**: must be `libraries`
//! 4. **Compatibility**: `shadcnCompatible` must be exactly `true`
//! 5. **Library fields**: `registryUrl` and `installCommand`
//! 6. **Status**: production, beta or alpha when given
//! 7. **URLs**: homepage, repository and registryUrl must be absolute URLs
//! 8. **lastUpdated**: a real `YYYY-MM-DD` date
//!
//! ## Collection rules
//! 9. **Unique names**
//! 10. **Unique registry URLs**
//!
//! Every rule runs; an entry collects all of its failures, not just the first.

mod format;

pub use format::{is_valid_date, is_valid_url};

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::config::ValidationConfig;
use crate::entry::{
    display_value, is_truthy, LibraryEntry, Status, FIELD_AUTHOR, FIELD_CATEGORY, FIELD_DESCRIPTION,
    FIELD_HOMEPAGE, FIELD_INSTALL_COMMAND, FIELD_LAST_UPDATED, FIELD_NAME, FIELD_REGISTRY_URL,
    FIELD_REPOSITORY, FIELD_SCHEMA, FIELD_SHADCN_COMPATIBLE, FIELD_STATUS, FIELD_VERSION,
};
use crate::source::{LoadedRegistry, SkippedDocument};

/// Fields every entry must carry
pub const REQUIRED_FIELDS: [&str; 6] = [
    FIELD_NAME,
    FIELD_DESCRIPTION,
    FIELD_AUTHOR,
    FIELD_CATEGORY,
    FIELD_VERSION,
    FIELD_SHADCN_COMPATIBLE,
];

/// Fields every `libraries` entry must additionally carry
pub const LIBRARY_REQUIRED_FIELDS: [&str; 2] = [FIELD_REGISTRY_URL, FIELD_INSTALL_COMMAND];

/// Accepted `category` values
pub const VALID_CATEGORIES: [&str; 1] = ["libraries"];

/// Fields that must hold absolute URLs when present
pub const URL_FIELDS: [&str; 3] = [FIELD_HOMEPAGE, FIELD_REPOSITORY, FIELD_REGISTRY_URL];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single rule outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

impl Finding {
    fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Findings for one entry, in rule order
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    /// Human-readable location (`registry.json#libraries[2]` or a document path)
    pub id: String,
    /// Position in the loaded sequence
    pub position: usize,
    pub findings: Vec<Finding>,
}

impl EntryReport {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }
}

/// Outcome of validating a whole registry
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Number of entries evaluated (including documents that failed to load)
    pub total: usize,
    pub entries: Vec<EntryReport>,
    /// Collection-level warnings
    pub warnings: Vec<Finding>,
}

impl ValidationReport {
    /// Valid when no entry has an error; warnings never count
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(EntryReport::is_valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.is_valid())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len() + self.entries.iter().map(|e| e.warnings().count()).sum::<usize>()
    }

    /// Count documents the loader had to skip as failed entries
    pub fn record_skipped(&mut self, skipped: &[SkippedDocument]) {
        for doc in skipped {
            let position = self.entries.len();
            self.entries.push(EntryReport {
                id: doc.path.display().to_string(),
                position,
                findings: vec![Finding::error("UNREADABLE_DOCUMENT", doc.reason.clone())],
            });
            self.total += 1;
        }
        if self.total > 0 {
            self.warnings.retain(|w| w.code != "NO_ENTRIES");
        }
    }
}

/// The registry validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a loaded registry, counting skipped documents as failures
    pub fn validate_loaded(&self, loaded: &LoadedRegistry) -> ValidationReport {
        let mut report = self.validate(&loaded.entries);
        report.record_skipped(&loaded.skipped);
        report
    }

    /// Validate entries in order. Pure: no I/O.
    pub fn validate(&self, entries: &[LibraryEntry]) -> ValidationReport {
        let mut reports: Vec<EntryReport> = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| EntryReport {
                id: entry.origin.to_string(),
                position,
                findings: self.check_entry(entry),
            })
            .collect();

        check_unique(entries, &mut reports);

        let mut warnings = Vec::new();
        if entries.is_empty() {
            warnings.push(Finding::warning("NO_ENTRIES", "No registry entries found"));
        }

        ValidationReport {
            total: entries.len(),
            entries: reports,
            warnings,
        }
    }

    /// Run the per-entry rules
    pub fn check_entry(&self, entry: &LibraryEntry) -> Vec<Finding> {
        let mut findings = Vec::new();

        self.check_schema_reference(entry, &mut findings);
        check_required(entry, &mut findings);
        check_category(entry, &mut findings);
        check_compatible(entry, &mut findings);
        check_library_fields(entry, &mut findings);
        check_status(entry, &mut findings);
        check_urls(entry, &mut findings);
        check_last_updated(entry, &mut findings);

        findings
    }

    fn check_schema_reference(&self, entry: &LibraryEntry, findings: &mut Vec<Finding>) {
        let expected = &self.config.expected_schema;
        match entry.get(FIELD_SCHEMA) {
            None | Some(Value::Null) => {
                if entry.origin.is_legacy() && self.config.warn_on_missing_schema {
                    findings.push(Finding::warning(
                        "SCHEMA_REFERENCE",
                        format!("Missing $schema reference. Add \"$schema\": \"{}\"", expected),
                    ));
                }
            }
            Some(value) if value.as_str() == Some(expected.as_str()) => {}
            Some(_) => {
                findings.push(Finding::warning(
                    "SCHEMA_REFERENCE",
                    format!("Incorrect schema reference. Expected: {}", expected),
                ));
            }
        }
    }
}

fn check_required(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !entry.has(field))
        .collect();
    if !missing.is_empty() {
        findings.push(Finding::error(
            "MISSING_FIELDS",
            format!("Missing required fields: {}", missing.join(", ")),
        ));
    }
}

fn check_category(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    // A missing category is already reported as a missing field
    let Some(category) = entry.get(FIELD_CATEGORY).filter(|v| is_truthy(v)) else {
        return;
    };
    let valid = category
        .as_str()
        .map(|c| VALID_CATEGORIES.contains(&c))
        .unwrap_or(false);
    if !valid {
        findings.push(Finding::error(
            "INVALID_CATEGORY",
            format!(
                "Invalid category '{}'. Must be one of: {}",
                display_value(category),
                VALID_CATEGORIES.join(", ")
            ),
        ));
    }
}

fn check_compatible(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    if entry.get(FIELD_SHADCN_COMPATIBLE) != Some(&Value::Bool(true)) {
        findings.push(Finding::error(
            "NOT_SHADCN_COMPATIBLE",
            "shadcnCompatible must be true for inclusion in this registry",
        ));
    }
}

fn check_library_fields(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    if entry.str_field(FIELD_CATEGORY) != Some("libraries") {
        return;
    }
    let missing: Vec<&str> = LIBRARY_REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !entry.has(field))
        .collect();
    if !missing.is_empty() {
        findings.push(Finding::error(
            "MISSING_LIBRARY_FIELDS",
            format!("Missing required library fields: {}", missing.join(", ")),
        ));
    }
}

fn check_status(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    let Some(status) = entry.get(FIELD_STATUS).filter(|v| is_truthy(v)) else {
        return;
    };
    if status.as_str().and_then(Status::parse).is_none() {
        let allowed: Vec<&str> = Status::ALL.iter().map(Status::as_str).collect();
        findings.push(Finding::error(
            "INVALID_STATUS",
            format!(
                "Invalid status '{}'. Must be one of: {}",
                display_value(status),
                allowed.join(", ")
            ),
        ));
    }
}

fn check_urls(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    for field in URL_FIELDS {
        let Some(value) = entry.get(field).filter(|v| is_truthy(v)) else {
            continue;
        };
        if !value.as_str().map(is_valid_url).unwrap_or(false) {
            findings.push(Finding::error(
                "INVALID_URL",
                format!("Invalid URL for field '{}': {}", field, display_value(value)),
            ));
        }
    }
}

fn check_last_updated(entry: &LibraryEntry, findings: &mut Vec<Finding>) {
    let Some(value) = entry.get(FIELD_LAST_UPDATED).filter(|v| is_truthy(v)) else {
        return;
    };
    if !value.as_str().map(is_valid_date).unwrap_or(false) {
        findings.push(Finding::error(
            "INVALID_DATE",
            "Invalid lastUpdated format. Use YYYY-MM-DD format.",
        ));
    }
}

/// First occurrence wins; every later reuse is flagged on the later entry
fn check_unique(entries: &[LibraryEntry], reports: &mut [EntryReport]) {
    let mut seen_names = HashSet::new();
    let mut seen_urls = HashSet::new();

    for (entry, report) in entries.iter().zip(reports.iter_mut()) {
        if let Some(name) = entry.name().filter(|n| !n.is_empty()) {
            if !seen_names.insert(name) {
                report.findings.push(Finding::error(
                    "DUPLICATE_NAME",
                    format!("Duplicate library name '{}'", name),
                ));
            }
        }
        if let Some(url) = entry.registry_url() {
            if !seen_urls.insert(url) {
                report.findings.push(Finding::error(
                    "DUPLICATE_REGISTRY_URL",
                    format!("Duplicate registryUrl '{}'", url),
                ));
            }
        }
    }
}
