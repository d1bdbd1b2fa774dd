//! Curated (generation, type) → catalog id hints.
//!
//! The table is hand-compiled and non-exhaustive. It only narrows which ids
//! are fetched first when answering "which X-type species are in generation
//! Y"; an empty entry means "scan the provider", never "none exist".

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::{ElementalType, generation};

const INDEX_ASSET: &str = include_str!("../../data/species_index.json");

/// Raw asset shape: generation number → type key → ids.
type RawIndex = BTreeMap<String, BTreeMap<String, Vec<u32>>>;

#[derive(Debug, Clone, Default)]
pub struct SpeciesIndex {
    entries: HashMap<(u32, ElementalType), Vec<u32>>,
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("malformed species index: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpeciesIndex {
    /// Parse the asset. Unknown generations or type keys are skipped, and ids
    /// outside their generation's range are dropped, so every stored id lies
    /// inside its generation.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        #[derive(Deserialize)]
        #[serde(transparent)]
        struct Asset(RawIndex);

        let Asset(raw) = serde_json::from_str(json)?;
        let mut entries = HashMap::new();

        for (gen_key, by_type) in raw {
            let Some(info) = gen_key.parse::<u32>().ok().and_then(generation) else {
                warn!("Species index: skipping unknown generation {gen_key:?}");
                continue;
            };
            for (type_key, ids) in by_type {
                let Some(element) = ElementalType::from_key(&type_key) else {
                    warn!("Species index: skipping unknown type {type_key:?}");
                    continue;
                };
                let before = ids.len();
                let kept: Vec<u32> = ids.into_iter().filter(|&id| info.contains(id)).collect();
                if kept.len() < before {
                    debug!(
                        "Species index: dropped {} out-of-range ids for generation {} / {}",
                        before - kept.len(),
                        info.number,
                        element.key()
                    );
                }
                if !kept.is_empty() {
                    entries.insert((info.number, element), kept);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Curated ids for the pair; empty when nothing is known.
    #[must_use]
    pub fn known_for(&self, generation: u32, element: ElementalType) -> &[u32] {
        self.entries
            .get(&(generation, element))
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static INDEX: OnceLock<SpeciesIndex> = OnceLock::new();

/// Process-wide index parsed from the embedded asset. A malformed asset
/// degrades to an empty index, which only disables the shortcut.
#[must_use]
pub fn species_index() -> &'static SpeciesIndex {
    INDEX.get_or_init(|| {
        SpeciesIndex::from_json(INDEX_ASSET).unwrap_or_else(|e| {
            warn!("{e}; falling back to provider scans only");
            SpeciesIndex::default()
        })
    })
}

#[must_use]
pub fn species_known_for(generation: u32, element: ElementalType) -> &'static [u32] {
    species_index().known_for(generation, element)
}
