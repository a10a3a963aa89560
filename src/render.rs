//! Markdown rendering of the library list
//!
//! Entries are grouped by status (`production`, then `beta` + `alpha`),
//! sorted by name within each group and rendered one list item per line.
//! Entries with any other status, or none, are left out.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

use crate::entry::{LibraryEntry, Status};

/// Sentence opening the rendered section
pub const INTRO: &str = "Libraries that implement the shadcn/ui registry format, allowing installation via `npx shadcn@latest add <component>`.";

pub const PRODUCTION_HEADING: &str = "### Production Ready";
pub const BETA_HEADING: &str = "### Beta/Experimental";

/// Entries split into rendered sections
#[derive(Debug, Default)]
pub struct Grouped<'a> {
    pub production: Vec<&'a LibraryEntry>,
    pub beta: Vec<&'a LibraryEntry>,
}

/// Partition by status and sort each partition by name
pub fn group(entries: &[LibraryEntry]) -> Grouped<'_> {
    let mut grouped = Grouped::default();
    for entry in entries {
        match entry.status() {
            Some(Status::Production) => grouped.production.push(entry),
            Some(Status::Beta) | Some(Status::Alpha) => grouped.beta.push(entry),
            None => {}
        }
    }
    let order = NameOrder::new();
    let by_name = |a: &&LibraryEntry, b: &&LibraryEntry| {
        order.compare(a.name().unwrap_or(""), b.name().unwrap_or(""))
    };
    grouped.production.sort_by(by_name);
    grouped.beta.sort_by(by_name);
    grouped
}

/// Locale-aware name ordering using the root collation.
///
/// Accented letters sort with their base letter and case only breaks ties,
/// lowercase first.
pub struct NameOrder {
    collator: Option<Collator>,
}

impl Default for NameOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl NameOrder {
    pub fn new() -> Self {
        let collator = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!(error = %e, "root collation unavailable, falling back to case-folded order");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        if primary != Ordering::Equal {
            return primary;
        }
        // Same letters: lowercase sorts first, which is reverse byte order for ASCII case pairs
        b.cmp(a)
    }
}

/// Compare two names with a one-off [`NameOrder`]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NameOrder::new().compare(a, b)
}

fn anchor(href: &str, inner: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        href, inner
    )
}

/// One Markdown list item for an entry
pub fn render_entry(entry: &LibraryEntry) -> String {
    let name = format!("<strong>{}</strong>", entry.name().unwrap_or(""));
    let name = match entry.homepage() {
        Some(homepage) => anchor(homepage, &name),
        None => name,
    };

    let links = match entry.repository() {
        Some(repository) => format!(" {}", anchor(repository, "📦")),
        None => String::new(),
    };

    let components = entry
        .component_count()
        .map(|n| format!(" ({} components)", n))
        .unwrap_or_default();

    format!(
        "- {}{} - {}{}",
        name,
        links,
        entry.description().unwrap_or(""),
        components
    )
}

fn render_section(out: &mut String, heading: &str, entries: &[&LibraryEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push_str("\n\n");
    for entry in entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out.push('\n');
}

/// Render the full library section body
pub fn render(entries: &[LibraryEntry]) -> String {
    let grouped = group(entries);

    let mut out = String::new();
    out.push_str(INTRO);
    out.push_str("\n\n");
    render_section(&mut out, PRODUCTION_HEADING, &grouped.production);
    render_section(&mut out, BETA_HEADING, &grouped.beta);

    out.trim().to_string()
}
