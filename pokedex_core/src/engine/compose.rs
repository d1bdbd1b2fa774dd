//! Plain-text rendering of answers.

use std::fmt::Write;

use super::roster::RosterOutcome;
use crate::knowledge::{
    ElementalType, GenerationInfo, MatchupVerdict, describe_multiplier, effectiveness,
    effectiveness_multiplier, immunities_of, resistances_of, weaknesses_of,
};
use crate::{Species, SpeciesSummary, TypeDescriptor, TypeRoster};

/// Species shown from a type listing.
pub const TYPE_LISTING_LIMIT: usize = 20;
/// Species shown from a search.
pub const SEARCH_LISTING_LIMIT: usize = 10;

const MAX_BASE_STAT: u32 = 255;

pub const FAREWELL: &str = "Goodbye! Thanks for exploring the catalog.";

pub const HELP: &str = "\
I can answer questions about species, types and generations. Try:

  • Species info:        \"pikachu\", \"피카츄\", \"catalog number 25\", \"#25\", \"25번\"
  • Base stats:          \"charizard stats\", \"리자몽 능력치\"
  • Species of a type:   \"water types\", \"불꽃 타입 포켓몬\"
  • Search by name:      \"find species starting with char\", \"피카로 시작하는 포켓몬 찾아줘\"
  • All types:           \"list all types\", \"모든 타입 목록\"
  • Generations:         \"generation 3\", \"kanto\", \"3세대 포켓몬\"
  • Generation + type:   \"1st generation dragon-type species\", \"1세대 드래곤 타입\"
  • Type match-ups:      \"electric vs water\", \"전기와 물 타입 상성\"
  • One type in depth:   \"fire weakness\", \"불꽃 약점\"

Type \"quit\" (or \"종료\") to leave.";

fn join_types(types: &[ElementalType]) -> String {
    if types.is_empty() {
        return "none".to_string();
    }
    types
        .iter()
        .map(|t| t.bilingual_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn stat_label(name: &str) -> &str {
    match name {
        "hp" => "HP",
        "attack" => "Attack",
        "defense" => "Defense",
        "special-attack" => "Sp. Atk",
        "special-defense" => "Sp. Def",
        "speed" => "Speed",
        other => other,
    }
}

fn more_line(out: &mut String, total: usize, shown: usize) {
    if total > shown {
        let _ = write!(out, "\n… and {} more", total - shown);
    }
}

#[must_use]
pub fn species_info(species: &Species) -> String {
    let mut out = format!("{} #{:03}\n\n", species.display_name(), species.id);
    let _ = writeln!(out, "Height: {:.1} m", species.height);
    let _ = writeln!(out, "Weight: {:.1} kg", species.weight);
    let _ = writeln!(out, "Types: {}", join_types(&species.types));

    let abilities = species
        .abilities
        .iter()
        .map(|a| {
            if a.is_hidden {
                format!("{} (hidden)", a.name)
            } else {
                a.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Abilities: {abilities}");

    let stats = species
        .stats
        .iter()
        .map(|s| format!("{} {}", stat_label(&s.name), s.base_value))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Base stats: {stats}");

    if let Some(sprite) = &species.sprite {
        let _ = writeln!(out, "Sprite: {sprite}");
    }
    out.trim_end().to_string()
}

/// One line per stat with a bar of `base / 10` blocks and the share of the
/// 255 maximum.
#[must_use]
pub fn species_stats(species: &Species) -> String {
    let mut out = format!("Base stats of {}\n\n", species.display_name());
    for stat in &species.stats {
        let base = u32::from(stat.base_value);
        let bar = "█".repeat(usize::from(stat.base_value / 10));
        let percent = base * 100 / MAX_BASE_STAT;
        let _ = writeln!(
            out,
            "{:<8} {:>3} {bar} ({percent}%)",
            stat_label(&stat.name),
            base
        );
    }
    let total: u32 = species.stats.iter().map(|s| u32::from(s.base_value)).sum();
    let _ = write!(out, "{:<8} {total}\n\nStats range from 0 to 255.", "Total");
    out
}

#[must_use]
pub fn type_roster(roster: &TypeRoster) -> String {
    let mut out = format!(
        "{}-type species ({} total)\n\n",
        roster.element.bilingual_name(),
        roster.count
    );
    for summary in roster.species.iter().take(TYPE_LISTING_LIMIT) {
        let _ = writeln!(out, "• {}", summary.display_name());
    }
    more_line(&mut out, roster.count, roster.species.len().min(TYPE_LISTING_LIMIT));
    out.trim_end().to_string()
}

#[must_use]
pub fn search_results(query: &str, results: &[SpeciesSummary]) -> String {
    if results.is_empty() {
        return no_search_results(query);
    }
    let mut out = format!("Search results for \"{query}\" ({} found)\n\n", results.len());
    for summary in results.iter().take(SEARCH_LISTING_LIMIT) {
        let _ = writeln!(out, "• {}", summary.display_name());
    }
    more_line(&mut out, results.len(), SEARCH_LISTING_LIMIT);
    out.trim_end().to_string()
}

#[must_use]
pub fn no_search_results(query: &str) -> String {
    format!("No species match \"{query}\". Try a different name or fragment.")
}

#[must_use]
pub fn type_list(types: &[TypeDescriptor]) -> String {
    let mut out = String::from("All types\n\n");
    for descriptor in types {
        let line = descriptor
            .element
            .map_or_else(|| descriptor.name.clone(), ElementalType::bilingual_name);
        let _ = writeln!(out, "• {line}");
    }
    out.push_str("\nAsk e.g. \"electric types\" to see the species of one type.");
    out
}

#[must_use]
pub fn species_not_found(identifier: &str) -> String {
    format!("No species found for \"{identifier}\". Check the name or catalog number.")
}

#[must_use]
pub fn type_not_found(element: ElementalType) -> String {
    format!("No species listing found for {}.", element.bilingual_name())
}

#[must_use]
pub fn unknown_generation(number: u32) -> String {
    format!("Unknown generation {number}. Generations run from 1 to 9.")
}

fn partial_note(out: &mut String, outcome: &RosterOutcome) {
    if outcome.cancelled {
        out.push_str("\n\n(Lookup cancelled; showing partial results.)");
    } else if outcome.aborted {
        out.push_str("\n\n(The species provider stopped responding; showing partial results.)");
    }
}

#[must_use]
pub fn generation_roster(info: &GenerationInfo, outcome: &RosterOutcome) -> String {
    let mut out = format!("{} species, {}\n\n", info.label(), info.region_label());
    let _ = writeln!(out, "Catalog numbers: #{} – #{}", info.start, info.end);
    let _ = writeln!(out, "Total species: {}", info.species_count());
    let _ = writeln!(out, "Region: {}\n", info.region_label());
    out.push_str("First species:\n");
    if outcome.species.is_empty() {
        out.push_str("(none could be loaded)\n");
    }
    for species in &outcome.species {
        let _ = writeln!(out, "• #{:03} {}", species.id, species.display_name());
    }
    let mut out = out.trim_end().to_string();
    partial_note(&mut out, outcome);
    out
}

#[must_use]
pub fn generation_type_roster(
    info: &GenerationInfo,
    element: ElementalType,
    outcome: &RosterOutcome,
) -> String {
    if outcome.species.is_empty() {
        let mut out = format!(
            "No {}-type species found in {} ({}).",
            element.bilingual_name(),
            info.label(),
            info.region_label()
        );
        partial_note(&mut out, outcome);
        return out;
    }

    let mut out = format!(
        "{}-type species of {}, {}\n\n",
        element.bilingual_name(),
        info.label(),
        info.region_label()
    );
    let _ = writeln!(out, "Found: {}\n", outcome.species.len());
    for species in &outcome.species {
        let types = species
            .types
            .iter()
            .map(|t| t.english_name())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "• #{:03} {} - {types}", species.id, species.display_name());
    }
    let mut out = out.trim_end().to_string();
    partial_note(&mut out, outcome);
    out
}

fn verdict_line(verdict: MatchupVerdict, attacker: ElementalType, defender: ElementalType) -> String {
    match verdict {
        MatchupVerdict::AttackerAdvantage => {
            format!("{attacker} has the advantage: it hits {defender} hard and takes little back.")
        }
        MatchupVerdict::DefenderAdvantage => {
            format!("{defender} has the advantage: it hits {attacker} hard and takes little back.")
        }
        MatchupVerdict::MutualStrong => {
            "Both sides hit each other hard. Expect a fast, fierce battle.".to_string()
        }
        MatchupVerdict::MutualWeak => {
            "Both sides resist each other. Expect a long battle.".to_string()
        }
        MatchupVerdict::Balanced => "An even match-up with no clear edge.".to_string(),
    }
}

#[must_use]
pub fn type_versus(attacker: ElementalType, defender: ElementalType) -> String {
    let forward = effectiveness_multiplier(attacker, &[defender]);
    let backward = effectiveness_multiplier(defender, &[attacker]);
    let verdict = MatchupVerdict::from_multipliers(forward, backward);
    format!(
        "{} vs {}\n\n\
         • {attacker} → {defender}: {} (×{forward})\n\
         • {defender} → {attacker}: {} (×{backward})\n\n\
         {}",
        attacker.bilingual_name(),
        defender.bilingual_name(),
        describe_multiplier(forward),
        describe_multiplier(backward),
        verdict_line(verdict, attacker, defender),
    )
}

#[must_use]
pub fn single_type_profile(element: ElementalType) -> String {
    let entry = effectiveness(element);
    let mut out = format!("{} match-ups\n\n", element.bilingual_name());
    out.push_str("Attacking:\n");
    let _ = writeln!(out, "  Super effective (×2): {}", join_types(entry.super_effective));
    let _ = writeln!(
        out,
        "  Not very effective (×0.5): {}",
        join_types(entry.not_very_effective)
    );
    let _ = writeln!(out, "  No effect (×0): {}\n", join_types(entry.no_effect));
    out.push_str("Defending:\n");
    let _ = writeln!(out, "  Weak to (×2): {}", join_types(&weaknesses_of(element)));
    let _ = writeln!(out, "  Resists (×0.5): {}", join_types(&resistances_of(element)));
    let _ = write!(out, "  Immune to (×0): {}", join_types(&immunities_of(element)));
    out
}
