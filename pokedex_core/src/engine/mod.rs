//! Intent execution: knowledge-base answers, provider lookups and roster
//! scans, rendered to text.

mod compose;
mod roster;

pub use compose::{FAREWELL, HELP, SEARCH_LISTING_LIMIT, TYPE_LISTING_LIMIT};
pub use roster::{BatchPlan, RosterOutcome, fetch_roster};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::intent::{Intent, classify};
use crate::knowledge::{ElementalType, GenerationInfo, generation, species_known_for};
use crate::{ProviderError, SpeciesProvider};

/// Limits for roster lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Species listed for a plain generation question.
    pub roster_size: usize,
    /// Ids scanned when the curated index has nothing for a generation/type.
    pub scan_window: usize,
    /// Provider lookups in flight at once.
    pub concurrency: usize,
    /// Consecutive transport failures that end a fallback scan.
    pub failure_threshold: usize,
    /// Hard cap on lookups per batch.
    pub max_lookups: usize,
    /// Try the curated (generation, type) index before scanning.
    pub use_curated_index: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            roster_size: 10,
            scan_window: 21,
            concurrency: 4,
            failure_threshold: 3,
            max_lookups: 40,
            use_curated_index: true,
        }
    }
}

impl ScanSettings {
    const fn plan(
        &self,
        failure_threshold: Option<usize>,
        element: Option<ElementalType>,
    ) -> BatchPlan {
        BatchPlan {
            concurrency: self.concurrency,
            max_lookups: self.max_lookups,
            failure_threshold,
            element,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("unknown tool call: {0}")]
    UnknownTool(String),
}

/// Render a provider result; a miss becomes a message, transport failures
/// propagate.
fn answer<T>(
    result: Result<T, ProviderError>,
    found: impl FnOnce(T) -> String,
    missing: impl FnOnce() -> String,
) -> Result<String, EngineError> {
    match result {
        Ok(value) => Ok(found(value)),
        Err(ProviderError::NotFound(what)) => {
            debug!("Provider has no record for {what}");
            Ok(missing())
        }
        Err(e) => Err(e.into()),
    }
}

/// Answers questions from the knowledge base and a species provider.
pub struct IntentEngine<P = Arc<dyn SpeciesProvider>> {
    provider: P,
    settings: ScanSettings,
}

impl<P: SpeciesProvider> IntentEngine<P> {
    #[must_use]
    pub const fn new(provider: P, settings: ScanSettings) -> Self {
        Self { provider, settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Classify and answer one question.
    pub async fn resolve(&self, raw: &str) -> Result<String, EngineError> {
        self.resolve_with_cancel(raw, &CancellationToken::new())
            .await
    }

    /// Like [`resolve`](Self::resolve), with roster scans observing `cancel`.
    pub async fn resolve_with_cancel(
        &self,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<String, EngineError> {
        let span = info_span!("resolve", request_id = %Uuid::now_v7());
        async {
            let intent = classify(raw);
            info!(intent = intent.tool_name(), "Resolving question");
            self.execute(&intent, cancel).await
        }
        .instrument(span)
        .await
    }

    /// Decode a relayed tool call and answer it exactly as in-process.
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> Result<String, EngineError> {
        let intent = Intent::from_tool_call(name, arguments)
            .ok_or_else(|| EngineError::UnknownTool(name.to_string()))?;
        debug!("Serving tool call {name}");
        self.execute(&intent, &CancellationToken::new()).await
    }

    pub async fn execute(
        &self,
        intent: &Intent,
        cancel: &CancellationToken,
    ) -> Result<String, EngineError> {
        match intent {
            Intent::Quit => Ok(FAREWELL.to_string()),
            Intent::Help => Ok(HELP.to_string()),
            Intent::GetSpeciesInfo { identifier } => answer(
                self.provider.species(identifier).await,
                |species| compose::species_info(&species),
                || compose::species_not_found(identifier),
            ),
            Intent::GetSpeciesStats { identifier } => answer(
                self.provider.species(identifier).await,
                |species| compose::species_stats(&species),
                || compose::species_not_found(identifier),
            ),
            Intent::GetSpeciesByType { element } => answer(
                self.provider.species_by_type(*element).await,
                |roster| compose::type_roster(&roster),
                || compose::type_not_found(*element),
            ),
            Intent::SearchSpecies { query } => answer(
                self.provider.search(query).await,
                |results| compose::search_results(query, &results),
                || compose::no_search_results(query),
            ),
            Intent::ListAllTypes => answer(
                self.provider.list_types().await,
                |types| compose::type_list(&types),
                || compose::type_list(&[]),
            ),
            Intent::GetGenerationSpecies { generation } => {
                Ok(self.generation_roster(*generation, cancel).await)
            }
            Intent::GetGenerationTypeSpecies {
                generation,
                element,
            } => Ok(self
                .generation_type_roster(*generation, *element, cancel)
                .await),
            Intent::TypeVsTypeEffectiveness { attacker, defender } => {
                Ok(compose::type_versus(*attacker, *defender))
            }
            Intent::SingleTypeEffectivenessInfo { element } => {
                Ok(compose::single_type_profile(*element))
            }
        }
    }

    async fn generation_roster(&self, number: u32, cancel: &CancellationToken) -> String {
        let Some(info) = generation(number) else {
            return compose::unknown_generation(number);
        };
        let ids = first_ids(info, self.settings.roster_size);
        let outcome = fetch_roster(
            &self.provider,
            &ids,
            self.settings.plan(None, None),
            cancel,
        )
        .await;
        compose::generation_roster(info, &outcome)
    }

    /// Curated hints first (each hit re-checked against the live type list),
    /// then a bounded scan of the generation's first ids. Both phases stop
    /// after `failure_threshold` consecutive transport failures, and a
    /// stopped curated phase is answered as is.
    async fn generation_type_roster(
        &self,
        number: u32,
        element: ElementalType,
        cancel: &CancellationToken,
    ) -> String {
        let Some(info) = generation(number) else {
            return compose::unknown_generation(number);
        };

        let threshold = Some(self.settings.failure_threshold.max(1));
        let mut outcome = RosterOutcome::default();
        if self.settings.use_curated_index {
            let curated = species_known_for(number, element);
            if !curated.is_empty() {
                debug!(
                    "Checking {} curated {} candidates for generation {number}",
                    curated.len(),
                    element.key()
                );
                outcome = fetch_roster(
                    &self.provider,
                    curated,
                    self.settings.plan(threshold, Some(element)),
                    cancel,
                )
                .await;
            }
        }

        if outcome.species.is_empty() && !outcome.is_partial() {
            debug!(
                "No curated {} species for generation {number}, scanning the first {} ids",
                element.key(),
                self.settings.scan_window
            );
            let ids = first_ids(info, self.settings.scan_window);
            outcome = fetch_roster(
                &self.provider,
                &ids,
                self.settings.plan(threshold, Some(element)),
                cancel,
            )
            .await;
        }

        compose::generation_type_roster(info, element, &outcome)
    }
}

fn first_ids(info: &GenerationInfo, count: usize) -> Vec<u32> {
    (info.start..=info.end).take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_defaults() {
        let settings = ScanSettings::default();
        assert_eq!(settings.roster_size, 10);
        assert_eq!(settings.scan_window, 21);
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.failure_threshold, 3);
        assert_eq!(settings.max_lookups, 40);
        assert!(settings.use_curated_index);
    }

    #[test]
    fn partial_settings_fill_from_defaults() {
        let settings: ScanSettings =
            serde_json::from_str(r#"{"concurrency": 8, "use_curated_index": false}"#).unwrap();
        assert_eq!(settings.concurrency, 8);
        assert!(!settings.use_curated_index);
        assert_eq!(settings.scan_window, 21);
    }

    #[test]
    fn first_ids_stay_inside_the_generation() {
        let kanto = generation(1).unwrap();
        assert_eq!(first_ids(kanto, 3), vec![1, 2, 3]);
        let paldea = generation(9).unwrap();
        assert_eq!(first_ids(paldea, 500).len(), 120);
    }
}
