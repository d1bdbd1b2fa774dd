use regex::Regex;
use std::sync::OnceLock;

use super::{is_stop_word, tokens};

/// Words that phrase a question as a name search.
pub const SEARCH_KEYWORDS: &[&str] = &[
    "찾",
    "검색",
    "어떤",
    "포켓몬이",
    "find",
    "search",
    "which species",
    "which pokemon",
    "look up",
];

/// Search templates in precedence order: starts-with, ends-with, contains,
/// "X species". Each alternation holds the Korean form (fragment first)
/// and the English form.
const TEMPLATES: [&str; 4] = [
    r"(\S+?)(?:으로|로)\s*시작|(?:starts?|starting|begins?|beginning)\s+with\s+(\S+)",
    r"(\S+?)(?:으로|로)\s*끝나|(?:ends?|ending)\s+with\s+(\S+)",
    r"(\S+?)(?:이|가)?\s*들어가|(?:contains?|containing|including)\s+(\S+)",
    r"(\S+?)\s*포켓몬|(\S+)\s+(?:species|pokemon)\b",
];

static TEMPLATE_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
fn template_patterns() -> &'static [Regex] {
    TEMPLATE_PATTERNS.get_or_init(|| {
        TEMPLATES
            .iter()
            .map(|p| Regex::new(p).expect("Static regex pattern is guaranteed to be valid"))
            .collect()
    })
}

fn clean(fragment: &str) -> Option<String> {
    let fragment = fragment.trim_matches(|c: char| !c.is_alphanumeric() && c != '-');
    (!fragment.is_empty() && !is_stop_word(fragment)).then(|| fragment.to_string())
}

/// Free-text fragment to search the catalog for.
#[must_use]
pub fn extract_search_query(text: &str) -> Option<String> {
    let templated = template_patterns().iter().find_map(|re| {
        re.captures(text).and_then(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .next()
                .and_then(|m| clean(m.as_str()))
        })
    });
    if templated.is_some() {
        return templated;
    }

    tokens(text)
        .filter_map(clean)
        .find(|token| token.chars().count() > 1)
}
