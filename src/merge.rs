//! Splicing generated content into a host document
//!
//! The region between the import sentinel and the end sentinel is owned by
//! the generator. Both sentinels are written back, so running the merge again
//! with the same body leaves the document unchanged.

use similar::TextDiff;

use crate::error::{RegistryError, Result};

pub const START_MARKER: &str = "<!-- IMPORT:registry/libraries/README.md -->";
pub const END_MARKER: &str = "<!-- END IMPORT -->";

/// Replace the sentinel-delimited region of `host` with `body`.
///
/// Without an end sentinel (first run) the body and a new end sentinel are
/// inserted right after the start sentinel. A missing start sentinel is an
/// error; no insertion point is guessed.
pub fn merge(host: &str, body: &str) -> Result<String> {
    let Some(start) = host.find(START_MARKER) else {
        return Err(RegistryError::MissingStartMarker {
            marker: START_MARKER.to_string(),
        });
    };
    let before = &host[..start];
    let after_start = &host[start + START_MARKER.len()..];

    let after = match after_start.find(END_MARKER) {
        Some(end) => &after_start[end + END_MARKER.len()..],
        None => after_start,
    };

    Ok(format!(
        "{}{}\n{}\n{}{}",
        before, START_MARKER, body, END_MARKER, after
    ))
}

/// Unified diff between the current and merged document, `None` when equal
pub fn diff(current: &str, updated: &str, name: &str) -> Option<String> {
    if current == updated {
        return None;
    }
    let diff = TextDiff::from_lines(current, updated);
    Some(
        diff.unified_diff()
            .context_radius(3)
            .header(&format!("a/{}", name), &format!("b/{}", name))
            .to_string(),
    )
}
