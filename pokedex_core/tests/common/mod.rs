#![allow(dead_code)]

use async_trait::async_trait;
use pokedex_core::{
    ElementalType, ProviderError, Relay, Species, SpeciesProvider, SpeciesSummary,
    TypeDescriptor, TypeRoster,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn species(id: u32, name: &str, types: &[ElementalType]) -> Species {
    Species {
        id,
        name: name.to_string(),
        localized_name: None,
        height: 1.0,
        weight: 10.0,
        types: types.to_vec(),
        abilities: vec![],
        stats: vec![],
        sprite: None,
    }
}

/// In-memory catalog. Ids in `down` answer with a transport failure.
#[derive(Default)]
pub struct FakeProvider {
    records: HashMap<u32, Species>,
    down: HashSet<u32>,
    offline: bool,
    pub species_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, record: Species) -> Self {
        self.records.insert(record.id, record);
        self
    }

    pub fn with_range(mut self, ids: std::ops::RangeInclusive<u32>, element: ElementalType) -> Self {
        for id in ids {
            self.records
                .insert(id, species(id, &format!("species-{id}"), &[element]));
        }
        self
    }

    pub fn down(mut self, ids: &[u32]) -> Self {
        self.down.extend(ids);
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.species_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), ProviderError> {
        if self.offline {
            Err(ProviderError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SpeciesProvider for FakeProvider {
    async fn species(&self, identifier: &str) -> Result<Species, ProviderError> {
        self.species_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let found = match identifier.parse::<u32>() {
            Ok(id) => {
                if self.down.contains(&id) {
                    return Err(ProviderError::Unavailable(format!("timeout fetching {id}")));
                }
                self.records.get(&id)
            }
            Err(_) => self.records.values().find(|s| s.name == identifier),
        };
        found
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(identifier.to_string()))
    }

    async fn species_by_type(&self, element: ElementalType) -> Result<TypeRoster, ProviderError> {
        self.check_online()?;
        let mut matching: Vec<&Species> =
            self.records.values().filter(|s| s.has_type(element)).collect();
        matching.sort_by_key(|s| s.id);
        let species: Vec<SpeciesSummary> = matching
            .into_iter()
            .map(|s| SpeciesSummary {
                name: s.name.clone(),
                localized_name: None,
            })
            .collect();
        Ok(TypeRoster {
            element,
            count: species.len(),
            species,
        })
    }

    async fn list_types(&self) -> Result<Vec<TypeDescriptor>, ProviderError> {
        self.check_online()?;
        Ok(ElementalType::ALL
            .into_iter()
            .map(|t| TypeDescriptor {
                name: t.key().to_string(),
                element: Some(t),
            })
            .collect())
    }

    async fn search(&self, fragment: &str) -> Result<Vec<SpeciesSummary>, ProviderError> {
        self.check_online()?;
        let mut hits: Vec<&Species> = self
            .records
            .values()
            .filter(|s| s.name.contains(fragment))
            .collect();
        hits.sort_by_key(|s| s.id);
        Ok(hits
            .into_iter()
            .map(|s| SpeciesSummary {
                name: s.name.clone(),
                localized_name: None,
            })
            .collect())
    }
}

/// Relay double recording every tool call.
#[derive(Default)]
pub struct FakeRelay {
    pub reachable: bool,
    pub failing_calls: bool,
    pub calls: Mutex<Vec<(String, Value)>>,
    pub closed: AtomicBool,
}

impl FakeRelay {
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Relay for FakeRelay {
    async fn handshake(&self) -> Result<(), ProviderError> {
        if self.reachable {
            Ok(())
        } else {
            Err(ProviderError::Unavailable("relay refused connection".into()))
        }
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));
        if self.failing_calls {
            return Err(ProviderError::Unavailable("relay dropped the call".into()));
        }
        Ok(format!("relayed {name}"))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
