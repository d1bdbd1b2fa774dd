use super::{SEARCH_KEYWORDS, contains_any, is_stop_word, tokens};
use crate::knowledge::species_names;

fn is_latin_word(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Species name mentioned in the text, canonical where the name table knows
/// it.
///
/// Scan order: a token that is a localized name, or a Latin-letter token that
/// is not classifier vocabulary; then a localized name anywhere in the text
/// (longest wins); then a token equal to a canonical key, which also admits
/// hyphenated names like `ho-oh`.
///
/// Unknown Latin words are not taken literally when the text is phrased as a
/// search, so the fragment in "find species starting with char" is left to
/// the search extractor.
#[must_use]
pub fn extract_species_name(text: &str) -> Option<String> {
    let names = species_names();
    let literal_allowed = !contains_any(text, SEARCH_KEYWORDS);

    let by_token = tokens(text).find_map(|token| {
        names.canonical_for(token).map(str::to_string).or_else(|| {
            let word = token.trim_end_matches(['?', '!', '.', ',']);
            (literal_allowed && is_latin_word(word) && !is_stop_word(word))
                .then(|| word.to_string())
        })
    });
    if by_token.is_some() {
        return by_token;
    }

    if let Some(entry) = names.find_in(text) {
        return Some(entry.canonical.clone());
    }

    tokens(text)
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .find(|token| names.is_canonical(token))
        .map(str::to_string)
}
