use super::aggregates;
use super::fetch_cache::{FetchCache, FetchClaim};
use super::{CatalogStore, StoreEvent};
use crate::client::CatalogApi;
use async_trait::async_trait;
use shared::{CatalogError, CatalogItem, CatalogResult, Category};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// ========================================================================
// Test catalog
// ========================================================================

struct TestCatalog {
    categories: Vec<Category>,
    items: Vec<(i64, Vec<CatalogItem>)>,
    category_calls: AtomicUsize,
    item_calls: AtomicUsize,
    fail: AtomicBool,
}

impl TestCatalog {
    fn new(categories: Vec<Category>, items: Vec<(i64, Vec<CatalogItem>)>) -> Arc<Self> {
        Arc::new(Self {
            categories,
            items,
            category_calls: AtomicUsize::new(0),
            item_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for TestCatalog {
    async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::Network("connection refused".to_string()));
        }
        Ok(self.categories.clone())
    }

    async fn fetch_items(&self, category_id: i64) -> CatalogResult<Vec<CatalogItem>> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::Network("connection refused".to_string()));
        }
        self.items
            .iter()
            .find(|(id, _)| *id == category_id)
            .map(|(_, items)| items.clone())
            .ok_or_else(|| CatalogError::Network(format!("HTTP 404 for {}", category_id)))
    }
}

fn category(id: i64, title: &str) -> Category {
    Category {
        id,
        title: title.to_string(),
        image: format!("https://example.com/{}.jpg", id),
    }
}

fn item(id: i64, avg_budget: f64) -> CatalogItem {
    CatalogItem {
        id,
        title: format!("item-{}", id),
        image: String::new(),
        min_budget: avg_budget / 2.0,
        max_budget: avg_budget * 2.0,
        avg_budget,
        is_selected: false,
    }
}

/// Scenario fixture: Venues (item 10 @ 100) and Catering (items 20 @ 40, 21 @ 60)
fn scenario_store() -> (CatalogStore, Arc<TestCatalog>) {
    let catalog = TestCatalog::new(
        vec![category(1, "Venues"), category(2, "Catering")],
        vec![
            (1, vec![item(10, 100.0)]),
            (2, vec![item(20, 40.0), item(21, 60.0)]),
        ],
    );
    (CatalogStore::new(catalog.clone()), catalog)
}

// ========================================================================
// Categories
// ========================================================================

#[tokio::test]
async fn test_load_categories_replaces_snapshot() {
    let (store, catalog) = scenario_store();

    let categories = store.load_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].title, "Venues");
    assert_eq!(store.categories(), categories);

    // No caching at this level: every call is a fresh fetch
    store.load_categories().await.unwrap();
    assert_eq!(catalog.category_calls(), 2);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_categories() {
    let (store, catalog) = scenario_store();
    store.load_categories().await.unwrap();

    catalog.set_failing(true);
    let err = store.load_categories().await.unwrap_err();
    assert_eq!(err, CatalogError::Network("connection refused".to_string()));

    // Prior snapshot untouched
    assert_eq!(store.categories().len(), 2);
}

// ========================================================================
// Item fetch caching
// ========================================================================

#[tokio::test]
async fn test_ensure_items_fetches_once() {
    let (store, catalog) = scenario_store();

    let first = store.ensure_items(1).await.unwrap();
    assert_eq!(first.len(), 1);

    // Second call is a cache hit: same content, no network
    let second = store.ensure_items(1).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(catalog.item_calls(), 1);
}

#[tokio::test]
async fn test_distinct_categories_fetch_independently() {
    let (store, catalog) = scenario_store();

    store.ensure_items(1).await.unwrap();
    store.ensure_items(2).await.unwrap();

    assert_eq!(catalog.item_calls(), 2);
    assert_eq!(store.items(1).unwrap().len(), 1);
    assert_eq!(store.items(2).unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_allows_retry() {
    let (store, catalog) = scenario_store();

    catalog.set_failing(true);
    assert!(store.ensure_items(1).await.is_err());
    assert_eq!(store.items(1), None);

    // Failed is not terminal: the next call goes back to the network
    catalog.set_failing(false);
    let items = store.ensure_items(1).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(catalog.item_calls(), 2);
}

// ========================================================================
// Toggling and aggregates
// ========================================================================

#[tokio::test]
async fn test_toggle_updates_aggregates() {
    let (store, _) = scenario_store();
    store.load_categories().await.unwrap();
    store.ensure_items(1).await.unwrap();

    store.toggle_selection(1, 10).unwrap();

    assert_eq!(store.total_price(), 100.0);
    assert_eq!(store.selected_count(1), 1);
}

#[tokio::test]
async fn test_double_toggle_is_idempotent() {
    let (store, _) = scenario_store();
    store.ensure_items(2).await.unwrap();

    let before = store.items(2).unwrap();
    store.toggle_selection(2, 20).unwrap();
    store.toggle_selection(2, 20).unwrap();

    assert_eq!(store.items(2).unwrap(), before);
    assert_eq!(store.total_price(), 0.0);
    assert_eq!(store.selected_count(2), 0);
}

#[tokio::test]
async fn test_toggle_preserves_item_identity() {
    let (store, _) = scenario_store();
    store.ensure_items(1).await.unwrap();

    store.toggle_selection(1, 10).unwrap();

    let toggled = &store.items(1).unwrap()[0];
    assert_eq!(toggled.id, 10);
    assert_eq!(toggled.avg_budget, 100.0);
    assert!(toggled.is_selected);
}

#[tokio::test]
async fn test_toggle_unknown_item_leaves_state_unchanged() {
    let (store, _) = scenario_store();
    store.ensure_items(1).await.unwrap();
    store.toggle_selection(1, 10).unwrap();

    let err = store.toggle_selection(1, 999).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    assert_eq!(store.total_price(), 100.0);
    assert_eq!(store.selected_count(1), 1);
}

#[tokio::test]
async fn test_toggle_unfetched_category_is_not_found() {
    let (store, _) = scenario_store();

    let err = store.toggle_selection(42, 1).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(store.total_price(), 0.0);
}

#[tokio::test]
async fn test_selected_count_zero_for_unfetched_category() {
    let (store, _) = scenario_store();
    assert_eq!(store.selected_count(2), 0);

    // Fetched but nothing selected: explicit zero entry
    store.ensure_items(2).await.unwrap();
    assert_eq!(store.selected_count(2), 0);
    assert_eq!(store.selected_counts().get(&2), Some(&0));
}

#[tokio::test]
async fn test_running_aggregates_match_pure_recompute() {
    let (store, _) = scenario_store();
    store.ensure_items(1).await.unwrap();
    store.ensure_items(2).await.unwrap();

    for (category_id, item_id) in [(1, 10), (2, 20), (2, 21), (2, 20), (1, 10), (2, 21)] {
        store.toggle_selection(category_id, item_id).unwrap();

        let mut item_set = aggregates::ItemSet::new();
        for id in [1, 2] {
            item_set.insert(id, store.items(id).unwrap());
        }
        assert_eq!(store.total_price(), aggregates::total_price(&item_set));
        assert_eq!(store.selected_counts(), aggregates::selected_counts(&item_set));
    }
}

#[tokio::test]
async fn test_selected_items_follow_category_order() {
    let (store, _) = scenario_store();
    store.load_categories().await.unwrap();
    store.ensure_items(1).await.unwrap();
    store.ensure_items(2).await.unwrap();

    store.toggle_selection(2, 21).unwrap();
    store.toggle_selection(1, 10).unwrap();

    let selected: Vec<i64> = store.selected_items().iter().map(|i| i.id).collect();
    assert_eq!(selected, vec![10, 21]);
}

// ========================================================================
// Event broadcasting
// ========================================================================

#[tokio::test]
async fn test_events_emitted_in_mutation_order() {
    let (store, _) = scenario_store();
    let mut rx = store.subscribe();

    store.load_categories().await.unwrap();
    store.ensure_items(1).await.unwrap();
    store.toggle_selection(1, 10).unwrap();

    assert_eq!(rx.recv().await.unwrap(), StoreEvent::CategoriesUpdated);
    assert_eq!(
        rx.recv().await.unwrap(),
        StoreEvent::ItemsLoaded { category_id: 1 }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        StoreEvent::SelectionChanged {
            category_id: 1,
            item_id: 10
        }
    );
}

#[tokio::test]
async fn test_failed_operations_emit_no_events() {
    let (store, catalog) = scenario_store();
    let mut rx = store.subscribe();

    catalog.set_failing(true);
    let _ = store.load_categories().await;
    let _ = store.ensure_items(1).await;
    let _ = store.toggle_selection(1, 10);

    assert!(rx.try_recv().is_err());
}

// ========================================================================
// Fetch cache state machine
// ========================================================================

#[tokio::test]
async fn test_claim_owner_then_joiners() {
    let cache = FetchCache::new();

    assert!(matches!(cache.claim(1), FetchClaim::Owner));
    assert!(matches!(cache.claim(1), FetchClaim::Joiner(_)));
    assert_eq!(cache.in_flight_count(), 1);

    // Independent key gets its own owner
    assert!(matches!(cache.claim(2), FetchClaim::Owner));
}

#[tokio::test]
async fn test_complete_resolves_joiners_and_releases_claim() {
    let cache = FetchCache::new();

    assert!(matches!(cache.claim(1), FetchClaim::Owner));
    let FetchClaim::Joiner(mut rx) = cache.claim(1) else {
        panic!("expected joiner");
    };

    cache.complete(1, Err(CatalogError::Network("boom".to_string())));
    assert_eq!(
        rx.recv().await.unwrap(),
        Err(CatalogError::Network("boom".to_string()))
    );

    // Failed → InFlight: the key is claimable again
    assert!(matches!(cache.claim(1), FetchClaim::Owner));
}
