use async_trait::async_trait;
use pokedex_core::knowledge::species_names;
use pokedex_core::{
    Ability, BaseStat, ElementalType, ProviderError, Species, SpeciesProvider, SpeciesSummary,
    TypeDescriptor, TypeRoster,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::retry::{RetryPolicy, retry_with_backoff};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Connection settings for [`PokeApiProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// How many names the search index pulls from the catalog.
    pub search_limit: usize,
    pub retry: RetryPolicy,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            search_limit: 1_025,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    element: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u8,
    stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PokemonPayload {
    id: u32,
    name: String,
    /// Decimetres.
    height: u32,
    /// Hectograms.
    weight: u32,
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
    #[serde(default)]
    sprites: Sprites,
}

#[derive(Debug, Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypePayload {
    pokemon: Vec<TypeMember>,
}

impl PokemonPayload {
    fn into_species(self) -> Species {
        let types = self
            .types
            .iter()
            .filter_map(|slot| {
                let element = ElementalType::from_key(&slot.element.name);
                if element.is_none() {
                    debug!("Ignoring unknown type '{}' on {}", slot.element.name, self.name);
                }
                element
            })
            .collect();

        Species {
            id: self.id,
            localized_name: species_names()
                .localized_for_id(self.id)
                .map(str::to_string),
            height: f64::from(self.height) / 10.0,
            weight: f64::from(self.weight) / 10.0,
            types,
            abilities: self
                .abilities
                .into_iter()
                .map(|slot| Ability {
                    name: slot.ability.name,
                    is_hidden: slot.is_hidden,
                })
                .collect(),
            stats: self
                .stats
                .into_iter()
                .map(|slot| BaseStat {
                    name: slot.stat.name,
                    base_value: slot.base_stat,
                })
                .collect(),
            sprite: self.sprites.front_default,
            name: self.name,
        }
    }
}

fn summary(name: String) -> SpeciesSummary {
    let localized_name = species_names().localized_for_name(&name).map(str::to_string);
    SpeciesSummary {
        name,
        localized_name,
    }
}

fn unavailable(e: impl std::fmt::Display) -> ProviderError {
    ProviderError::Unavailable(e.to_string())
}

/// [`SpeciesProvider`] backed by a PokeAPI-compatible REST service.
pub struct PokeApiProvider {
    client: Client,
    base_url: String,
    search_limit: usize,
    retry: RetryPolicy,
    name_index: OnceCell<Vec<String>>,
}

impl PokeApiProvider {
    pub fn new(settings: ProviderSettings) -> anyhow::Result<Self> {
        info!("Creating PokeApiProvider for {}", settings.base_url);
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            search_limit: settings.search_limit,
            retry: settings.retry,
            name_index: OnceCell::new(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper method to send a single request
    async fn try_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await.map_err(unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(path.to_string()));
        }
        response
            .error_for_status()
            .map_err(unavailable)?
            .json::<T>()
            .await
            .map_err(unavailable)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        retry_with_backoff(|| self.try_get(path), &self.retry, ProviderError::is_transport).await
    }

    async fn name_index(&self) -> Result<&[String], ProviderError> {
        let names = self
            .name_index
            .get_or_try_init(|| async {
                let list: ResourceList = self
                    .get(&format!("pokemon?limit={}", self.search_limit))
                    .await?;
                info!("Loaded search index with {} names", list.results.len());
                Ok::<_, ProviderError>(list.results.into_iter().map(|r| r.name).collect())
            })
            .await?;
        Ok(names)
    }
}

#[async_trait]
impl SpeciesProvider for PokeApiProvider {
    async fn species(&self, identifier: &str) -> Result<Species, ProviderError> {
        let key = species_names().resolve_identifier(identifier);
        let payload: PokemonPayload = self
            .get(&format!("pokemon/{key}"))
            .await
            .map_err(|e| match e {
                ProviderError::NotFound(_) => ProviderError::NotFound(identifier.to_string()),
                other => other,
            })?;
        Ok(payload.into_species())
    }

    async fn species_by_type(&self, element: ElementalType) -> Result<TypeRoster, ProviderError> {
        let payload: TypePayload = self.get(&format!("type/{}", element.key())).await?;
        let species: Vec<SpeciesSummary> = payload
            .pokemon
            .into_iter()
            .map(|member| summary(member.pokemon.name))
            .collect();
        Ok(TypeRoster {
            element,
            count: species.len(),
            species,
        })
    }

    async fn list_types(&self) -> Result<Vec<TypeDescriptor>, ProviderError> {
        let list: ResourceList = self.get("type").await?;
        Ok(list
            .results
            .into_iter()
            .map(|r| TypeDescriptor {
                element: ElementalType::from_key(&r.name),
                name: r.name,
            })
            .collect())
    }

    async fn search(&self, fragment: &str) -> Result<Vec<SpeciesSummary>, ProviderError> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let names = species_names();
        let hits = self
            .name_index()
            .await?
            .iter()
            .filter(|name| {
                name.contains(&needle)
                    || names
                        .localized_for_name(name)
                        .is_some_and(|localized| localized.contains(&needle))
            })
            .map(|name| summary(name.clone()))
            .collect();
        Ok(hits)
    }
}
