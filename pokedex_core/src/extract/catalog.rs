use regex::Regex;
use std::sync::OnceLock;

use super::contains_any;
use crate::knowledge::is_catalog_id;

pub const CATALOG_MARKERS: &[&str] = &[
    "도감",
    "번호",
    "catalog number",
    "catalog no",
    "dex number",
    "dex no",
    "pokedex number",
    "number",
    "no.",
];

static FIRST_INTEGER: OnceLock<Regex> = OnceLock::new();
static ORDINAL: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn first_integer() -> &'static Regex {
    FIRST_INTEGER
        .get_or_init(|| Regex::new(r"\d+").expect("Static regex pattern is guaranteed to be valid"))
}

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn ordinal() -> &'static Regex {
    ORDINAL.get_or_init(|| {
        Regex::new(r"^#?(\d+)\s*(?:번|st|nd|rd|th)?$")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Parse and range-check. Overflowing digit runs are simply out of range.
fn in_range(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|&id| is_catalog_id(id))
}

/// `"catalog number 25"`, `"도감번호 25"`: a marker plus the first integer.
#[must_use]
pub fn catalog_number_after_marker(text: &str) -> Option<u32> {
    if !contains_any(text, CATALOG_MARKERS) {
        return None;
    }
    first_integer()
        .find(text)
        .and_then(|m| in_range(m.as_str()))
}

/// The whole text is one integer.
#[must_use]
pub fn bare_catalog_number(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    in_range(text)
}

/// `"#25"`, `"25번"`, `"25th"`.
#[must_use]
pub fn ordinal_catalog_number(text: &str) -> Option<u32> {
    ordinal()
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| in_range(m.as_str()))
}
