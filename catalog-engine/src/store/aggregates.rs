//! Aggregate computation over the item set
//!
//! Pure and deterministic; these are the definition of the store's derived
//! values. The store keeps running counters for O(1) toggles, and tests hold
//! those counters to account against these functions.

use shared::CatalogItem;
use std::collections::HashMap;

/// Mapping from category id to the ordered item list fetched for it.
/// Key presence means "fetch completed" - this presence/absence IS the cache.
pub type ItemSet = HashMap<i64, Vec<CatalogItem>>;

/// Sum of `avg_budget` over every selected item across all fetched categories
pub fn total_price(items: &ItemSet) -> f64 {
    items
        .values()
        .flatten()
        .filter(|item| item.is_selected)
        .map(|item| item.avg_budget)
        .sum()
}

/// Selected-item count per fetched category
///
/// Every fetched category gets an entry, zero included. Categories never
/// fetched are simply absent (callers read that as zero).
pub fn selected_counts(items: &ItemSet) -> HashMap<i64, i64> {
    items
        .iter()
        .map(|(category_id, items)| {
            let count = items.iter().filter(|item| item.is_selected).count() as i64;
            (*category_id, count)
        })
        .collect()
}
