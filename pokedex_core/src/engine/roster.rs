//! Bounded fan-out of catalog-id lookups.

use futures::{StreamExt, stream};
use std::pin::pin;
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::knowledge::ElementalType;
use crate::{Species, SpeciesProvider};

/// Limits for one roster batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Lookups kept in flight at once.
    pub concurrency: usize,
    /// Total ids attempted; the rest are never requested.
    pub max_lookups: usize,
    /// Consecutive transport failures after which the batch gives up.
    /// `None` never gives up.
    pub failure_threshold: Option<usize>,
    /// Keep only species carrying this type.
    pub element: Option<ElementalType>,
}

/// What a batch resolved, and why it stopped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterOutcome {
    pub species: Vec<Species>,
    pub attempted: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub aborted: bool,
}

impl RosterOutcome {
    /// The batch stopped before going through every id it meant to.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.cancelled || self.aborted
    }
}

/// Resolve `ids` in order through `provider`.
///
/// Per-id failures are logged and skipped. Results keep the order of `ids`.
/// Cancellation stops the batch at the next completed lookup boundary and
/// returns what was resolved so far.
pub async fn fetch_roster<P>(
    provider: &P,
    ids: &[u32],
    plan: BatchPlan,
    cancel: &CancellationToken,
) -> RosterOutcome
where
    P: SpeciesProvider + ?Sized,
{
    let mut outcome = RosterOutcome::default();
    let mut streak = 0usize;

    let mut lookups = pin!(
        stream::iter(ids.iter().copied().take(plan.max_lookups))
            .map(|id| async move { (id, provider.species(&id.to_string()).await) })
            .buffered(plan.concurrency.max(1))
    );

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Roster batch cancelled after {} lookups", outcome.attempted);
                outcome.cancelled = true;
                break;
            }
            next = lookups.next() => next,
        };
        let Some((id, result)) = next else {
            break;
        };
        outcome.attempted += 1;

        match result {
            Ok(species) => {
                streak = 0;
                if plan.element.is_none_or(|element| species.has_type(element)) {
                    outcome.species.push(species);
                }
            }
            Err(e) => {
                outcome.failed += 1;
                warn!("Skipping catalog id {id}: {e}");
                if !e.is_transport() {
                    streak = 0;
                    continue;
                }
                streak += 1;
                if plan.failure_threshold.is_some_and(|limit| streak >= limit) {
                    warn!("Giving up roster batch after {streak} consecutive provider failures");
                    outcome.aborted = true;
                    break;
                }
            }
        }
    }

    outcome
}
