//! Library Registry Tools
//!
//! Validation and README generation for a JSON registry of
//! shadcn/ui-compatible component libraries.
//!
//! ## Pipelines
//!
//! - **Validate**: load entries, check every rule, report per entry
//! - **Render**: load entries, group by status, render Markdown, splice it
//!   into the host README between import sentinels
//!
//! ## Registry layouts
//!
//! ```text
//! registry.json                      # preferred: { "libraries": [ ... ] }
//! registry/
//! └── libraries/                     # legacy fallback
//!     ├── acme-ui/
//!     │   └── index.json
//!     └── other-ui/
//!         └── index.json
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod merge;
pub mod readme;
pub mod render;
pub mod source;
pub mod validate;

pub use config::RegistryConfig;
pub use entry::{EntryOrigin, LibraryEntry, Status};
pub use error::{RegistryError, Result};
pub use source::{detect_source, load_entries, AggregateSource, EntrySource, LegacySource, LoadedRegistry, SourceKind};
pub use validate::{Finding, Severity, ValidationReport, Validator};
