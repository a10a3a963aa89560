//! Format checks for URL and date fields

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // scheme "://" authority [path/query/fragment], no whitespace anywhere.
    // The port range is checked after matching.
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?:[^\s/?#@]*@)?(?:\[[0-9A-Fa-f:.]+\]|[^\s/?#@:\[\]]+)(?::(?P<port>[0-9]*))?(?:[/?#]\S*)?$")
            .expect("valid url regex")
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"))
}

/// Absolute URL with a scheme, a non-empty host and an optional port in 0..=65535
pub fn is_valid_url(value: &str) -> bool {
    let Some(captures) = url_pattern().captures(value) else {
        return false;
    };
    match captures.name("port").map(|m| m.as_str()) {
        None | Some("") => true,
        Some(port) => port.parse::<u16>().is_ok(),
    }
}

/// `YYYY-MM-DD` naming a real calendar day, written canonically
pub fn is_valid_date(value: &str) -> bool {
    if !date_pattern().is_match(value) {
        return false;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string() == value,
        Err(_) => false,
    }
}
