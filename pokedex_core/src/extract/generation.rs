use regex::Regex;
use std::sync::OnceLock;

use super::contains_any;
use crate::knowledge::{GENERATIONS, generation_by_region};

/// Words that mark a question as generation-related, besides region names.
pub const GENERATION_KEYWORDS: &[&str] = &["세대", "generation", "generations", "gen"];

static NUMERIC_GENERATION: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn numeric_generation() -> &'static Regex {
    NUMERIC_GENERATION.get_or_init(|| {
        Regex::new(
            r"(\d+)\s*세대|(\d+)\s*(?:st|nd|rd|th)?\s*gen(?:eration)?s?\b|\bgen(?:eration)?\s*(\d+)",
        )
        .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Generation keyword or any region name, in either locale.
#[must_use]
pub fn has_generation_keyword(text: &str) -> bool {
    contains_any(text, GENERATION_KEYWORDS)
        || GENERATIONS.iter().any(|g| {
            text.contains(g.region_korean) || super::contains_word(text, &g.region.to_lowercase())
        })
}

/// Generation number as written (`"3세대"`, `"3rd gen"`, `"generation 3"`),
/// else the generation of a named region. The number is not range-checked.
#[must_use]
pub fn extract_generation(text: &str) -> Option<u32> {
    if let Some(caps) = numeric_generation().captures(text) {
        return caps
            .iter()
            .skip(1)
            .flatten()
            .next()
            .and_then(|m| m.as_str().parse().ok());
    }
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .find_map(generation_by_region)
        .or_else(|| {
            GENERATIONS
                .iter()
                .find(|g| text.contains(g.region_korean))
                .map(|g| g.number)
        })
}
