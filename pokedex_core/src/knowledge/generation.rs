//! Generation → catalog range → region table.

use serde::Serialize;

pub const MIN_CATALOG_ID: u32 = 1;
pub const MAX_CATALOG_ID: u32 = 1025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationInfo {
    pub number: u32,
    /// First catalog id, inclusive.
    pub start: u32,
    /// Last catalog id, inclusive.
    pub end: u32,
    pub region: &'static str,
    pub region_korean: &'static str,
}

impl GenerationInfo {
    #[must_use]
    pub const fn contains(&self, id: u32) -> bool {
        id >= self.start && id <= self.end
    }

    #[must_use]
    pub const fn species_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// `"Generation 1"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("Generation {}", self.number)
    }

    /// `"Kanto (관동)"`
    #[must_use]
    pub fn region_label(&self) -> String {
        format!("{} ({})", self.region, self.region_korean)
    }
}

const fn entry(
    number: u32,
    start: u32,
    end: u32,
    region: &'static str,
    region_korean: &'static str,
) -> GenerationInfo {
    GenerationInfo {
        number,
        start,
        end,
        region,
        region_korean,
    }
}

/// Ordered, contiguous, non-overlapping.
pub const GENERATIONS: [GenerationInfo; 9] = [
    entry(1, 1, 151, "Kanto", "관동"),
    entry(2, 152, 251, "Johto", "성도"),
    entry(3, 252, 386, "Hoenn", "호연"),
    entry(4, 387, 493, "Sinnoh", "신오"),
    entry(5, 494, 649, "Unova", "하나"),
    entry(6, 650, 721, "Kalos", "칼로스"),
    entry(7, 722, 809, "Alola", "알로라"),
    entry(8, 810, 905, "Galar", "가라르"),
    entry(9, 906, 1025, "Paldea", "팔데아"),
];

#[must_use]
pub const fn is_catalog_id(id: u32) -> bool {
    id >= MIN_CATALOG_ID && id <= MAX_CATALOG_ID
}

#[must_use]
pub fn generation(number: u32) -> Option<&'static GenerationInfo> {
    GENERATIONS.iter().find(|g| g.number == number)
}

#[must_use]
pub fn generation_for_catalog_id(id: u32) -> Option<&'static GenerationInfo> {
    GENERATIONS.iter().find(|g| g.contains(id))
}

/// Resolve a region name in either locale. English names match
/// case-insensitively.
#[must_use]
pub fn generation_by_region(region: &str) -> Option<u32> {
    let region = region.trim();
    GENERATIONS
        .iter()
        .find(|g| g.region_korean == region || g.region.eq_ignore_ascii_case(region))
        .map(|g| g.number)
}
