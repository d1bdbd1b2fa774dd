//! Localized ↔ canonical species names.

use serde::Deserialize;
use std::sync::OnceLock;
use tracing::warn;

const NAMES_ASSET: &str = include_str!("../../data/species_names.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesName {
    pub id: u32,
    pub canonical: String,
    pub localized: String,
}

/// Curated name table, kept in asset order.
#[derive(Debug, Clone, Default)]
pub struct SpeciesNameTable {
    entries: Vec<SpeciesName>,
}

impl SpeciesNameTable {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<SpeciesName> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[SpeciesName] {
        &self.entries
    }

    /// Exact localized name → canonical name.
    #[must_use]
    pub fn canonical_for(&self, localized: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.localized == localized)
            .map(|e| e.canonical.as_str())
    }

    #[must_use]
    pub fn is_canonical(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.canonical == name)
    }

    #[must_use]
    pub fn localized_for_name(&self, canonical: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.canonical.eq_ignore_ascii_case(canonical))
            .map(|e| e.localized.as_str())
    }

    #[must_use]
    pub fn localized_for_id(&self, id: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.localized.as_str())
    }

    /// Longest localized name occurring anywhere in `text`. Longest wins so
    /// that `피죤투` is not read as `피죤`.
    #[must_use]
    pub fn find_in(&self, text: &str) -> Option<&SpeciesName> {
        self.entries
            .iter()
            .filter(|e| text.contains(e.localized.as_str()))
            .fold(None, |best: Option<&SpeciesName>, e| match best {
                Some(b) if b.localized.chars().count() >= e.localized.chars().count() => Some(b),
                _ => Some(e),
            })
    }

    /// Map a user-supplied identifier to what the provider understands:
    /// localized names become canonical, everything else is lowercased.
    #[must_use]
    pub fn resolve_identifier(&self, identifier: &str) -> String {
        let identifier = identifier.trim();
        self.canonical_for(identifier)
            .map_or_else(|| identifier.to_lowercase(), str::to_string)
    }
}

static NAMES: OnceLock<SpeciesNameTable> = OnceLock::new();

/// Process-wide name table parsed from the embedded asset.
#[must_use]
pub fn species_names() -> &'static SpeciesNameTable {
    NAMES.get_or_init(|| {
        SpeciesNameTable::from_json(NAMES_ASSET).unwrap_or_else(|e| {
            warn!("Species name asset is malformed, localized lookups disabled: {e}");
            SpeciesNameTable::default()
        })
    })
}
