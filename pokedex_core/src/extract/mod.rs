//! Pure text extractors over normalized input.
//!
//! Every function here expects text that already went through [`normalize`].
//! Hangul keywords match as plain substrings (Korean attaches particles
//! directly to nouns); ASCII keywords match only on word boundaries so that
//! `"species"` never reads as `"ice"`.

mod catalog;
mod element;
mod generation;
mod search;
mod species;

pub use catalog::{
    CATALOG_MARKERS, bare_catalog_number, catalog_number_after_marker, ordinal_catalog_number,
};
pub use element::{find_all_types, find_second_type, find_type, first_position, type_pair};
pub use generation::{GENERATION_KEYWORDS, extract_generation, has_generation_keyword};
pub use search::{SEARCH_KEYWORDS, extract_search_query};
pub use species::extract_species_name;

/// Lowercase, trim and collapse runs of whitespace to one space.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace-separated tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Byte offsets where `word` occurs with non-alphanumeric ASCII (or the text
/// edge) on both sides. With `allow_plural`, a single trailing `s` is
/// absorbed before the right boundary is checked.
fn word_matches<'a>(
    text: &'a str,
    word: &'a str,
    allow_plural: bool,
) -> impl Iterator<Item = usize> + 'a {
    let bytes = text.as_bytes();
    text.match_indices(word).filter_map(move |(start, _)| {
        let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let mut end = start + word.len();
        if allow_plural && bytes.get(end) == Some(&b's') {
            let after = bytes.get(end + 1).copied();
            if after.is_none_or(|b| !is_word_byte(b)) {
                end += 1;
            }
        }
        let after_ok = bytes.get(end).is_none_or(|&b| !is_word_byte(b));
        (before_ok && after_ok).then_some(start)
    })
}

/// Whole-word (or whole-phrase) occurrence of an ASCII `word`.
#[must_use]
pub fn contains_word(text: &str, word: &str) -> bool {
    word_matches(text, word, false).next().is_some()
}

pub(crate) fn find_word(text: &str, word: &str, allow_plural: bool) -> Option<usize> {
    word_matches(text, word, allow_plural).next()
}

/// Keyword test: ASCII keywords need word boundaries, anything else is a
/// substring test.
#[must_use]
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    if keyword.is_ascii() {
        contains_word(text, keyword)
    } else {
        text.contains(keyword)
    }
}

#[must_use]
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_keyword(text, k))
}

/// Classifier vocabulary and English filler. None of these can be a species
/// name or a search fragment.
const STOP_WORDS: &[&str] = &[
    // filler
    "a", "an", "the", "is", "are", "was", "of", "for", "to", "in", "on", "me", "my", "i", "you",
    "what", "whats", "who", "how", "does", "do", "can", "please", "tell", "show", "give", "get",
    "about", "info", "information", "details", "and", "or", "with", "by", "its", "it", "that",
    "there", "any", "some", "have", "has", "exist", "exists", "available", "hi", "hello", "hey",
    "help", "thanks", "thank", "ok", "okay",
    // catalog vocabulary
    "pokemon", "pokemons", "species", "creature", "creatures", "catalog", "dex", "pokedex",
    "number", "no", "entry",
    // classifier keywords
    "quit", "exit", "type", "types", "stat", "stats", "base", "find", "search", "which", "look",
    "up", "list", "kinds", "kind", "all", "every", "generation", "gen", "region",
    "effective", "effectiveness", "weakness", "weaknesses", "weak", "strength", "strengths",
    "strong", "against", "matchup", "vs", "versus",
    // search templates
    "start", "starts", "starting", "end", "ends", "ending", "contain", "contains", "containing",
    "name", "names", "named", "like", "flavored",
    // Korean particles and filler that survive tokenization
    "포켓몬", "포켓몬은", "포켓몬을", "포켓몬이", "알려줘", "보여줘", "찾아줘", "검색해줘", "뭐야",
    "정보", "어떤", "있어", "있니", "이름", "이름이", "검색", "찾기",
    "타입", "타입은", "타입이", "타입들이", "종류", "목록", "모든",
];

#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
        || crate::knowledge::ElementalType::ALL
            .iter()
            .any(|t| token == t.key() || token.strip_suffix('s') == Some(t.key()))
        || crate::knowledge::GENERATIONS
            .iter()
            .any(|g| token.eq_ignore_ascii_case(g.region))
}
