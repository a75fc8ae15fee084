//! Per-category fetch memoization
//!
//! State machine per category id:
//!
//! ```text
//! NotRequested ──► InFlight ──► Completed (key present in the item set)
//!                     │
//!                     └──► Failed (entry dropped; next claim retries)
//! ```
//!
//! Only the `NotRequested → InFlight` check-and-set needs mutual exclusion;
//! it happens under the map's entry lock. `Completed` is never recorded here,
//! it is the item-set key itself. A dropped entry after failure makes
//! retry-on-demand fall out of the normal claim path.

use dashmap::DashMap;
use shared::CatalogResult;
use tokio::sync::broadcast;

/// Outcome fanned out to every caller attached to one fetch
type FetchOutcome = CatalogResult<()>;

/// Result of claiming a category fetch
pub(crate) enum FetchClaim {
    /// Caller won the check-and-set and must perform the single fetch,
    /// then resolve it via [`FetchCache::complete`]
    Owner,
    /// A fetch is already in flight; await its outcome
    Joiner(broadcast::Receiver<FetchOutcome>),
}

/// In-flight fetch registry
pub(crate) struct FetchCache {
    in_flight: DashMap<i64, broadcast::Sender<FetchOutcome>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self {
            in_flight: DashMap::new(),
        }
    }

    /// Atomic `NotRequested → InFlight` transition
    ///
    /// Exactly one caller per category observes `Owner` until that owner
    /// resolves the fetch; everyone else joins the pending outcome.
    pub fn claim(&self, category_id: i64) -> FetchClaim {
        use dashmap::mapref::entry::Entry;

        match self.in_flight.entry(category_id) {
            Entry::Occupied(entry) => FetchClaim::Joiner(entry.get().subscribe()),
            Entry::Vacant(entry) => {
                // Capacity 1: a single outcome is ever sent per fetch
                let (tx, _rx) = broadcast::channel(1);
                entry.insert(tx);
                FetchClaim::Owner
            }
        }
    }

    /// Resolve the in-flight fetch, waking every joiner with a clone of the
    /// outcome. Removes the entry first so a failed category can be claimed
    /// again immediately.
    pub fn complete(&self, category_id: i64, outcome: FetchOutcome) {
        if let Some((_, tx)) = self.in_flight.remove(&category_id) {
            // No joiners is fine; the owner already has the outcome
            let _ = tx.send(outcome);
        }
    }

    /// Number of fetches currently in flight
    #[cfg(test)]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}
