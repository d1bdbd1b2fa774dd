//! Ordered rule cascade from normalized text to one [`Intent`].
//!
//! Rules are tried top to bottom and the first one that yields an intent
//! wins. Order matters: catalog numbers must be seen before generations
//! ("도감번호 1" is not generation 1), and effectiveness questions must be
//! seen before the generation/type combinations.

use tracing::debug;

use super::Intent;
use crate::extract::{
    SEARCH_KEYWORDS, bare_catalog_number, catalog_number_after_marker, contains_any,
    extract_generation, extract_search_query, extract_species_name, find_all_types, find_type,
    has_generation_keyword, normalize, ordinal_catalog_number, type_pair,
};

const QUIT_KEYWORDS: &[&str] = &["quit", "exit", "종료"];

const EFFECTIVENESS_KEYWORDS: &[&str] = &[
    "상성",
    "효과",
    "약점",
    "강점",
    "effective",
    "effectiveness",
    "weakness",
    "weaknesses",
    "strength",
    "strengths",
    "weak against",
    "strong against",
    "matchup",
    "match-up",
    "vs",
    "versus",
];

const STATS_KEYWORDS: &[&str] = &["능력치", "스탯", "스텟", "stats", "stat", "base stats"];

const TYPE_KEYWORDS: &[&str] = &["타입", "type", "types"];
const LIST_KEYWORDS: &[&str] = &["목록", "종류", "모든", "list", "kinds", "all"];
const TYPE_LIST_PHRASES: &[&str] = &["어떤 타입들이", "which types", "what types"];

/// A named step of the cascade.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<Intent>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The cascade, in evaluation order.
pub const RULES: [Rule; 12] = [
    Rule {
        name: "quit",
        apply: quit,
    },
    Rule {
        name: "catalog_marker",
        apply: catalog_marker,
    },
    Rule {
        name: "bare_number",
        apply: bare_number,
    },
    Rule {
        name: "ordinal_number",
        apply: ordinal_number,
    },
    Rule {
        name: "effectiveness",
        apply: effectiveness,
    },
    Rule {
        name: "generation_and_type",
        apply: generation_and_type,
    },
    Rule {
        name: "generation",
        apply: generation,
    },
    Rule {
        name: "single_type",
        apply: single_type,
    },
    Rule {
        name: "species_name",
        apply: species_name,
    },
    Rule {
        name: "search",
        apply: search,
    },
    Rule {
        name: "type_list",
        apply: type_list,
    },
    Rule {
        name: "fallback",
        apply: fallback,
    },
];

fn species_info(id: u32) -> Intent {
    Intent::GetSpeciesInfo {
        identifier: id.to_string(),
    }
}

fn quit(text: &str) -> Option<Intent> {
    contains_any(text, QUIT_KEYWORDS).then_some(Intent::Quit)
}

fn catalog_marker(text: &str) -> Option<Intent> {
    catalog_number_after_marker(text).map(species_info)
}

fn bare_number(text: &str) -> Option<Intent> {
    bare_catalog_number(text).map(species_info)
}

fn ordinal_number(text: &str) -> Option<Intent> {
    ordinal_catalog_number(text).map(species_info)
}

fn type_versus(text: &str) -> Option<Intent> {
    type_pair(text).map(|(attacker, defender)| Intent::TypeVsTypeEffectiveness {
        attacker,
        defender,
    })
}

fn effectiveness(text: &str) -> Option<Intent> {
    if !contains_any(text, EFFECTIVENESS_KEYWORDS) {
        return None;
    }
    let intent = match find_all_types(text).as_slice() {
        [] => Intent::Help,
        [element] => Intent::SingleTypeEffectivenessInfo { element: *element },
        _ => type_versus(text).unwrap_or(Intent::Help),
    };
    Some(intent)
}

fn generation_and_type(text: &str) -> Option<Intent> {
    let types = find_all_types(text);
    match (extract_generation(text), types.first()) {
        (Some(generation), Some(&element)) => Some(Intent::GetGenerationTypeSpecies {
            generation,
            element,
        }),
        (None, _) if types.len() >= 2 => type_versus(text),
        _ => None,
    }
}

fn generation(text: &str) -> Option<Intent> {
    if !has_generation_keyword(text) {
        return None;
    }
    Some(extract_generation(text).map_or(Intent::Help, |generation| {
        Intent::GetGenerationSpecies { generation }
    }))
}

fn single_type(text: &str) -> Option<Intent> {
    find_type(text).map(|element| Intent::GetSpeciesByType { element })
}

fn species_name(text: &str) -> Option<Intent> {
    let identifier = extract_species_name(text)?;
    if contains_any(text, STATS_KEYWORDS) {
        Some(Intent::GetSpeciesStats { identifier })
    } else {
        Some(Intent::GetSpeciesInfo { identifier })
    }
}

fn search(text: &str) -> Option<Intent> {
    if !contains_any(text, SEARCH_KEYWORDS) {
        return None;
    }
    extract_search_query(text).map(|query| Intent::SearchSpecies { query })
}

fn type_list(text: &str) -> Option<Intent> {
    let listing = contains_any(text, TYPE_KEYWORDS) && contains_any(text, LIST_KEYWORDS);
    (listing || contains_any(text, TYPE_LIST_PHRASES)).then_some(Intent::ListAllTypes)
}

#[expect(
    clippy::unnecessary_wraps,
    reason = "Every rule shares the same signature"
)]
const fn fallback(_text: &str) -> Option<Intent> {
    Some(Intent::Help)
}

/// Classify text that already went through [`normalize`].
#[must_use]
pub fn classify_normalized(text: &str) -> Intent {
    for rule in &RULES {
        if let Some(intent) = (rule.apply)(text) {
            debug!("Classified {text:?} by rule '{}' as {}", rule.name, intent.tool_name());
            return intent;
        }
    }
    Intent::Help
}

/// Map raw user text to exactly one intent. Never fails; anything not
/// understood becomes [`Intent::Help`].
#[must_use]
pub fn classify(raw: &str) -> Intent {
    classify_normalized(&normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ElementalType::{Dragon, Electric, Fire, Water};

    fn info(identifier: &str) -> Intent {
        Intent::GetSpeciesInfo {
            identifier: identifier.to_string(),
        }
    }

    #[test]
    fn quit_keywords() {
        assert_eq!(classify("quit"), Intent::Quit);
        assert_eq!(classify("EXIT"), Intent::Quit);
        assert_eq!(classify("종료"), Intent::Quit);
    }

    #[test]
    fn catalog_number_with_marker() {
        assert_eq!(classify("catalog number 5"), info("5"));
        assert_eq!(classify("도감번호 5"), info("5"));
        assert_eq!(classify("도감 1번"), info("1"));
    }

    #[test]
    fn bare_and_ordinal_numbers() {
        assert_eq!(classify("150"), info("150"));
        assert_eq!(classify("  25 "), info("25"));
        assert_eq!(classify("151번"), info("151"));
        assert_eq!(classify("#7"), info("7"));
    }

    #[test]
    fn out_of_range_numbers_fall_through_to_help() {
        assert_eq!(classify("1200"), Intent::Help);
        assert_eq!(classify("0"), Intent::Help);
        assert_eq!(classify("99999999999999999999"), Intent::Help);
    }

    #[test]
    fn generation_and_type_combination() {
        let expected = Intent::GetGenerationTypeSpecies {
            generation: 1,
            element: Dragon,
        };
        assert_eq!(classify("1st generation dragon-type species"), expected);
        assert_eq!(classify("1세대 드래곤 타입 포켓몬"), expected);
        assert_eq!(
            classify("kanto fire species"),
            Intent::GetGenerationTypeSpecies {
                generation: 1,
                element: Fire
            }
        );
    }

    #[test]
    fn type_versus_type_is_oriented_by_mention() {
        let expected = Intent::TypeVsTypeEffectiveness {
            attacker: Electric,
            defender: Water,
        };
        assert_eq!(classify("electric vs water type match-up"), expected);
        assert_eq!(classify("전기와 물 타입 상성"), expected);
        assert_eq!(
            classify("water electric"),
            Intent::TypeVsTypeEffectiveness {
                attacker: Water,
                defender: Electric
            }
        );
    }

    #[test]
    fn single_type_effectiveness() {
        let expected = Intent::SingleTypeEffectivenessInfo { element: Fire };
        assert_eq!(classify("fire weakness"), expected);
        assert_eq!(classify("불꽃 약점"), expected);
        assert_eq!(classify("fire effectiveness"), expected);
        assert_eq!(classify("fire type effectiveness"), expected);
        assert_eq!(classify("what are fire's weaknesses"), expected);
        assert_eq!(
            classify("water strengths"),
            Intent::SingleTypeEffectivenessInfo { element: Water }
        );
    }

    #[test]
    fn effectiveness_keyword_without_types_is_help() {
        assert_eq!(classify("what is super effective"), Intent::Help);
        assert_eq!(classify("상성 알려줘"), Intent::Help);
    }

    #[test]
    fn generation_rosters() {
        assert_eq!(
            classify("3세대 포켓몬"),
            Intent::GetGenerationSpecies { generation: 3 }
        );
        assert_eq!(
            classify("species of generation 12"),
            Intent::GetGenerationSpecies { generation: 12 }
        );
        assert_eq!(
            classify("호연 지방"),
            Intent::GetGenerationSpecies { generation: 3 }
        );
        assert_eq!(classify("which generation"), Intent::Help);
    }

    #[test]
    fn single_type_listing() {
        assert_eq!(
            classify("show me water types"),
            Intent::GetSpeciesByType { element: Water }
        );
        assert_eq!(
            classify("불꽃 타입 포켓몬"),
            Intent::GetSpeciesByType { element: Fire }
        );
    }

    #[test]
    fn species_names_and_stats() {
        assert_eq!(classify("피카츄"), info("pikachu"));
        assert_eq!(classify("tell me about Snorlax"), info("snorlax"));
        assert_eq!(
            classify("리자몽 능력치"),
            Intent::GetSpeciesStats {
                identifier: "charizard".into()
            }
        );
        assert_eq!(
            classify("mewtwo base stats"),
            Intent::GetSpeciesStats {
                identifier: "mewtwo".into()
            }
        );
    }

    #[test]
    fn search_queries() {
        assert_eq!(
            classify("피카로 시작하는 포켓몬 찾아줘"),
            Intent::SearchSpecies {
                query: "피카".into()
            }
        );
        assert_eq!(
            classify("find species starting with char"),
            Intent::SearchSpecies {
                query: "char".into()
            }
        );
    }

    #[test]
    fn type_catalog_listing() {
        assert_eq!(classify("list all types"), Intent::ListAllTypes);
        assert_eq!(classify("모든 타입 목록"), Intent::ListAllTypes);
        assert_eq!(classify("어떤 타입들이 있어?"), Intent::ListAllTypes);
        assert_eq!(classify("which types are there"), Intent::ListAllTypes);
    }

    #[test]
    fn unknown_input_is_help() {
        assert_eq!(classify(""), Intent::Help);
        assert_eq!(classify("hello"), Intent::Help);
        assert_eq!(classify("???"), Intent::Help);
    }

    #[test]
    fn classification_is_deterministic() {
        for text in [
            "electric vs water",
            "도감번호 25",
            "kanto",
            "fire weakness",
            "피카츄 능력치",
        ] {
            assert_eq!(classify(text), classify(text));
        }
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
