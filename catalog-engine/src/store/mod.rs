//! CatalogStore - single source of truth for categories, items, and selection
//!
//! This module handles:
//! - Category list loading (fresh fetch on every call, replace on success)
//! - Lazy, memoized item fetches (at most one per category, see `fetch_cache`)
//! - Selection toggles with O(1) aggregate maintenance
//! - Event broadcasting in mutation order
//!
//! # Mutation Flow
//!
//! ```text
//! controller intent
//!     ├─ 1. Store operation (load / ensure / toggle)
//!     ├─ 2. Mutation applied under the write lock
//!     ├─ 3. Aggregates updated (delta for toggles, recompute for loads)
//!     ├─ 4. Event broadcast (still under the lock → one total order)
//!     └─ 5. Subscribers re-project from snapshots
//! ```
//!
//! A failed fetch never touches existing state: errors are returned as
//! values and prior snapshots stay intact.

pub mod aggregates;
mod event;
mod fetch_cache;

pub use event::StoreEvent;

use crate::client::CatalogApi;
use aggregates::ItemSet;
use fetch_cache::{FetchCache, FetchClaim};
use parking_lot::RwLock;
use shared::{CatalogError, CatalogItem, CatalogResult, Category};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
///
/// Bounded by active screens, each of which drains promptly; a lagged
/// subscriber only loses intermediate events and re-projects from the
/// current snapshot.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Everything the store owns, behind one lock
#[derive(Default)]
struct StoreState {
    categories: Vec<Category>,
    items: ItemSet,
    /// Running Σ avg_budget over selected items; kept equal to
    /// `aggregates::total_price(&items)` at all times
    total_price: f64,
    /// Running per-category selected counts; kept equal to
    /// `aggregates::selected_counts(&items)` at all times
    selected_counts: HashMap<i64, i64>,
}

/// Single source of truth for the catalog screens
///
/// All mutations serialize through the internal write lock; events are
/// broadcast while the lock is held, so every subscriber observes mutations
/// in the same total order. Snapshot reads never block on network I/O.
pub struct CatalogStore {
    client: Arc<dyn CatalogApi>,
    state: RwLock<StoreState>,
    fetch_cache: FetchCache,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CatalogStore")
            .field("categories", &state.categories.len())
            .field("fetched_categories", &state.items.len())
            .field("total_price", &state.total_price)
            .finish()
    }
}

impl CatalogStore {
    /// Create a new store backed by the given catalog client
    pub fn new(client: Arc<dyn CatalogApi>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            state: RwLock::new(StoreState::default()),
            fetch_cache: FetchCache::new(),
            event_tx,
        }
    }

    /// Subscribe to state-change broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Load the category list from the remote catalog
    ///
    /// Performs a fresh fetch on every call; the category list is small and
    /// meant to reflect current remote state, so it is never cached (item
    /// caching is a separate concern). On success the whole list snapshot is
    /// replaced. On failure prior state stays untouched and the error is
    /// returned as a value.
    pub async fn load_categories(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.client.fetch_categories().await.map_err(|e| {
            tracing::error!(error = %e, "Category fetch failed");
            e
        })?;

        {
            let mut state = self.state.write();
            state.categories = categories.clone();
            self.broadcast(StoreEvent::CategoriesUpdated);
        }

        tracing::debug!(count = categories.len(), "Categories loaded");
        Ok(categories)
    }

    /// Current category list snapshot
    pub fn categories(&self) -> Vec<Category> {
        self.state.read().categories.clone()
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Ensure a category's items are cached, fetching them at most once
    ///
    /// Already cached: returns the cached list without touching the network.
    /// Uncached: performs exactly one fetch even under concurrent callers -
    /// losers of the claim race attach to the pending outcome and observe the
    /// same result. A failed fetch releases the claim so a later call can
    /// retry; it never overwrites existing state.
    pub async fn ensure_items(&self, category_id: i64) -> CatalogResult<Vec<CatalogItem>> {
        if let Some(items) = self.items(category_id) {
            return Ok(items);
        }

        match self.fetch_cache.claim(category_id) {
            FetchClaim::Owner => {
                // A previous owner may have completed between the snapshot
                // check and the claim; the item set is authoritative.
                if let Some(items) = self.items(category_id) {
                    self.fetch_cache.complete(category_id, Ok(()));
                    return Ok(items);
                }

                match self.client.fetch_items(category_id).await {
                    Ok(items) => {
                        let stored = self.apply_items(category_id, items);
                        self.fetch_cache.complete(category_id, Ok(()));
                        Ok(stored)
                    }
                    Err(e) => {
                        tracing::error!(category_id, error = %e, "Item fetch failed");
                        self.fetch_cache.complete(category_id, Err(e.clone()));
                        Err(e)
                    }
                }
            }
            FetchClaim::Joiner(mut outcome_rx) => match outcome_rx.recv().await {
                Ok(Ok(())) => self.items(category_id).ok_or_else(|| {
                    // Owner reported success, so the key must be present
                    CatalogError::Network("fetch completed without data".to_string())
                }),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(CatalogError::Network("fetch interrupted".to_string())),
            },
        }
    }

    /// Cached item list for a category, if its fetch completed
    pub fn items(&self, category_id: i64) -> Option<Vec<CatalogItem>> {
        self.state.read().items.get(&category_id).cloned()
    }

    /// Insert a fetched item list and recompute aggregates
    fn apply_items(&self, category_id: i64, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let mut state = self.state.write();
        state.items.insert(category_id, items.clone());

        // Bulk mutation: the pure functions are the definition
        state.total_price = aggregates::total_price(&state.items);
        state.selected_counts = aggregates::selected_counts(&state.items);

        self.broadcast(StoreEvent::ItemsLoaded { category_id });
        tracing::debug!(category_id, count = items.len(), "Items cached");
        items
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Flip `is_selected` for one item, addressed by stable item id
    ///
    /// Synchronous in-memory mutation; never suspends. Aggregates are updated
    /// with an O(1) delta (toggles are the hottest operation). An unknown
    /// category or item id leaves state unchanged and returns `NotFound`.
    pub fn toggle_selection(&self, category_id: i64, item_id: i64) -> CatalogResult<()> {
        let mut state = self.state.write();

        let items = state
            .items
            .get_mut(&category_id)
            .ok_or_else(|| CatalogError::NotFound(format!("Category {} not fetched", category_id)))?;

        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "Item {} not found in category {}",
                    item_id, category_id
                ))
            })?;

        *item = item.toggled();
        let (delta_price, delta_count) = if item.is_selected {
            (item.avg_budget, 1)
        } else {
            (-item.avg_budget, -1)
        };

        state.total_price += delta_price;
        *state.selected_counts.entry(category_id).or_insert(0) += delta_count;

        self.broadcast(StoreEvent::SelectionChanged {
            category_id,
            item_id,
        });
        Ok(())
    }

    // =========================================================================
    // Aggregate snapshots (pure reads, never block on network)
    // =========================================================================

    /// Current total price of all selected items
    pub fn total_price(&self) -> f64 {
        self.state.read().total_price
    }

    /// Selected-item count for one category; zero when never fetched
    pub fn selected_count(&self, category_id: i64) -> i64 {
        self.state
            .read()
            .selected_counts
            .get(&category_id)
            .copied()
            .unwrap_or(0)
    }

    /// Selected-item counts for every fetched category
    pub fn selected_counts(&self) -> HashMap<i64, i64> {
        self.state.read().selected_counts.clone()
    }

    /// All currently selected items, in category-list order
    ///
    /// Projection for the saved-summary screen.
    pub fn selected_items(&self) -> Vec<CatalogItem> {
        let state = self.state.read();
        state
            .categories
            .iter()
            .filter_map(|category| state.items.get(&category.id))
            .flatten()
            .filter(|item| item.is_selected)
            .cloned()
            .collect()
    }

    /// Send an event while the caller still holds the write lock
    ///
    /// `broadcast::Sender::send` never blocks, and sending under the lock is
    /// what gives every subscriber the same total order of mutations.
    fn broadcast(&self, event: StoreEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!(?event, "No active store subscribers");
        }
    }
}

#[cfg(test)]
mod tests;
