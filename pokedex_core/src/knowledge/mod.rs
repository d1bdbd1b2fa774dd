//! Static, read-only domain knowledge.
//!
//! Everything here is either a compile-time table or an embedded data asset
//! parsed once on first use. Nothing is mutated after initialization, so all
//! lookups are safe from any number of concurrent requests.

mod effectiveness;
mod generation;
mod names;
mod species_index;
mod types;

pub use effectiveness::{
    MatchupVerdict, TypeEffectiveness, describe_multiplier, effectiveness, effectiveness_multiplier,
    immunities_of, resistances_of, weaknesses_of,
};
pub use generation::{
    GENERATIONS, GenerationInfo, MAX_CATALOG_ID, MIN_CATALOG_ID, generation,
    generation_by_region, generation_for_catalog_id, is_catalog_id,
};
pub use names::{SpeciesName, SpeciesNameTable, species_names};
pub use species_index::{SpeciesIndex, species_index, species_known_for};
pub use types::{ElementalType, UnknownType};
