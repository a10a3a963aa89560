//! Library entry records
//!
//! Entries are kept as the raw JSON object they were loaded from. Validation
//! has to see values exactly as written (`"shadcnCompatible": "true"` is not
//! `true`), so typed views are exposed through accessors instead of a
//! deserialized struct.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_SHADCN_COMPATIBLE: &str = "shadcnCompatible";
pub const FIELD_REGISTRY_URL: &str = "registryUrl";
pub const FIELD_INSTALL_COMMAND: &str = "installCommand";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_HOMEPAGE: &str = "homepage";
pub const FIELD_REPOSITORY: &str = "repository";
pub const FIELD_LAST_UPDATED: &str = "lastUpdated";
pub const FIELD_COMPONENT_COUNT: &str = "componentCount";
pub const FIELD_SCHEMA: &str = "$schema";

/// Where an entry was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Element `index` of the aggregate document's `libraries` list
    Aggregate { path: PathBuf, index: usize },
    /// A per-entry document in the legacy directory layout
    Legacy { path: PathBuf },
}

impl EntryOrigin {
    pub fn is_legacy(&self) -> bool {
        matches!(self, EntryOrigin::Legacy { .. })
    }
}

impl fmt::Display for EntryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryOrigin::Aggregate { path, index } => {
                write!(f, "{}#libraries[{}]", path.display(), index)
            }
            EntryOrigin::Legacy { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Release status of a library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Production,
    Beta,
    Alpha,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Production, Status::Beta, Status::Alpha];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "production" => Some(Status::Production),
            "beta" => Some(Status::Beta),
            "alpha" => Some(Status::Alpha),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Production => "production",
            Status::Beta => "beta",
            Status::Alpha => "alpha",
        }
    }
}

/// One catalogued library's metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub origin: EntryOrigin,
    pub fields: Value,
}

impl LibraryEntry {
    pub fn new(origin: EntryOrigin, fields: Value) -> Self {
        Self { origin, fields }
    }

    /// Raw field value; `None` when absent or when the entry is not an object
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Whether a field is present with a truthy value.
    ///
    /// Absent, `null`, `false`, `0` and `""` all count as missing.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).map(is_truthy).unwrap_or(false)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field(FIELD_NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field(FIELD_DESCRIPTION)
    }

    pub fn homepage(&self) -> Option<&str> {
        self.str_field(FIELD_HOMEPAGE).filter(|s| !s.is_empty())
    }

    pub fn repository(&self) -> Option<&str> {
        self.str_field(FIELD_REPOSITORY).filter(|s| !s.is_empty())
    }

    pub fn registry_url(&self) -> Option<&str> {
        self.str_field(FIELD_REGISTRY_URL).filter(|s| !s.is_empty())
    }

    /// Parsed status; `None` when absent or not one of the known values
    pub fn status(&self) -> Option<Status> {
        self.str_field(FIELD_STATUS).and_then(Status::parse)
    }

    /// Number of components; zero is treated as absent
    pub fn component_count(&self) -> Option<u64> {
        self.get(FIELD_COMPONENT_COUNT)
            .and_then(Value::as_u64)
            .filter(|n| *n > 0)
    }
}

/// JSON truthiness: everything except `null`, `false`, `0` and `""`
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a field value for an error message: strings bare, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(fields: Value) -> LibraryEntry {
        LibraryEntry::new(
            EntryOrigin::Aggregate { path: PathBuf::from("registry.json"), index: 0 },
            fields,
        )
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_accessors() {
        let e = entry(json!({
            "name": "Acme UI",
            "status": "beta",
            "homepage": "",
            "componentCount": 12
        }));
        assert_eq!(e.name(), Some("Acme UI"));
        assert_eq!(e.status(), Some(Status::Beta));
        assert_eq!(e.homepage(), None);
        assert_eq!(e.component_count(), Some(12));
        assert!(!e.has("author"));
    }

    #[test]
    fn test_non_object_entry_has_no_fields() {
        let e = entry(json!("not an object"));
        assert_eq!(e.name(), None);
        assert!(!e.has("name"));
    }

    #[test]
    fn test_origin_display() {
        let aggregate = EntryOrigin::Aggregate { path: PathBuf::from("registry.json"), index: 3 };
        assert_eq!(aggregate.to_string(), "registry.json#libraries[3]");

        let legacy = EntryOrigin::Legacy { path: PathBuf::from("registry/libraries/acme/index.json") };
        assert_eq!(legacy.to_string(), "registry/libraries/acme/index.json");
        assert!(legacy.is_legacy());
    }
}
