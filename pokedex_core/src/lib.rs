#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cancel;
pub mod engine;
pub mod extract;
pub mod intent;
pub mod knowledge;
pub mod session;

pub use cancel::CancellationToken;
pub use engine::{EngineError, IntentEngine, ScanSettings};
pub use intent::{Intent, classify};
pub use knowledge::{ElementalType, GenerationInfo};
pub use session::{ChatSession, Relay, Reply, SessionMode};

/// Failure modes of a species data provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider could not be reached (connect, timeout, 5xx, bad payload).
    #[error("species provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered, but holds no record for the request.
    #[error("no record found for {0}")]
    NotFound(String),
}

impl ProviderError {
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub base_value: u8,
}

/// Full catalog record for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub localized_name: Option<String>,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub types: Vec<ElementalType>,
    pub abilities: Vec<Ability>,
    pub stats: Vec<BaseStat>,
    pub sprite: Option<String>,
}

impl Species {
    #[must_use]
    pub fn has_type(&self, element: ElementalType) -> bool {
        self.types.contains(&element)
    }

    /// `"pikachu (피카츄)"`, or just the canonical name when no localized one is known.
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.localized_name.as_deref())
    }
}

/// Name-level record returned by type listings and searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub name: String,
    pub localized_name: Option<String>,
}

impl SpeciesSummary {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.localized_name.as_deref())
    }
}

fn display_name(name: &str, localized: Option<&str>) -> String {
    match localized {
        Some(localized) if localized != name => format!("{name} ({localized})"),
        _ => name.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRoster {
    pub element: ElementalType,
    pub species: Vec<SpeciesSummary>,
    pub count: usize,
}

/// Entry of the provider's type list. `element` is `None` for provider-only
/// pseudo types that have no place in the effectiveness matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub element: Option<ElementalType>,
}

/// Read-only source of catalog records.
#[async_trait]
pub trait SpeciesProvider: Send + Sync {
    /// Look up a species by catalog number (as text) or by name.
    async fn species(&self, identifier: &str) -> Result<Species, ProviderError>;

    async fn species_by_type(&self, element: ElementalType) -> Result<TypeRoster, ProviderError>;

    async fn list_types(&self) -> Result<Vec<TypeDescriptor>, ProviderError>;

    /// Species whose canonical or localized name contains `fragment`.
    async fn search(&self, fragment: &str) -> Result<Vec<SpeciesSummary>, ProviderError>;
}

#[async_trait]
impl<T: SpeciesProvider + ?Sized> SpeciesProvider for std::sync::Arc<T> {
    async fn species(&self, identifier: &str) -> Result<Species, ProviderError> {
        (**self).species(identifier).await
    }

    async fn species_by_type(&self, element: ElementalType) -> Result<TypeRoster, ProviderError> {
        (**self).species_by_type(element).await
    }

    async fn list_types(&self) -> Result<Vec<TypeDescriptor>, ProviderError> {
        (**self).list_types().await
    }

    async fn search(&self, fragment: &str) -> Result<Vec<SpeciesSummary>, ProviderError> {
        (**self).search(fragment).await
    }
}
