//! Screen contracts - intents, view states, side effects
//!
//! Intents flow UI → controller; view states flow controller → UI through a
//! watch channel; side effects (navigation) are one-shot signals on a
//! separate channel so they are delivered at most once and never replayed.

use shared::{CatalogItem, Category};
use std::collections::HashMap;

// =============================================================================
// Intents
// =============================================================================

/// User actions on the category list screen
#[derive(Debug, Clone)]
pub enum CategoriesIntent {
    /// Manual refetch of the category list (replaces the whole snapshot)
    FetchCategories,
    /// Navigate into a category's item list
    OpenItems(Category),
    /// Navigate to the saved-summary screen
    OpenSavedSummary,
}

/// User actions on the category items screen
#[derive(Debug, Clone)]
pub enum ItemsIntent {
    /// Bind the screen to a category and ensure its items are cached
    FetchItems(i64),
    /// Flip one item's selection, addressed by stable item id
    ToggleItem { category_id: i64, item_id: i64 },
}

// =============================================================================
// View states
// =============================================================================

/// Projection for the category list screen
#[derive(Debug, Clone, PartialEq)]
pub struct CategoriesViewState {
    pub is_loading: bool,
    pub categories: Vec<Category>,
    pub total_price: f64,
    pub selected_counts: HashMap<i64, i64>,
    pub error: Option<String>,
}

impl CategoriesViewState {
    /// Initial state while the first fetch is in flight
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            categories: Vec::new(),
            total_price: 0.0,
            selected_counts: HashMap::new(),
            error: None,
        }
    }
}

/// Projection for the category items screen
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsViewState {
    pub is_loading: bool,
    /// None until the screen is bound to a fetched category
    pub items: Option<Vec<CatalogItem>>,
    pub total_price: f64,
    pub error: Option<String>,
}

impl ItemsViewState {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            items: None,
            total_price: 0.0,
            error: None,
        }
    }
}

/// Projection for the saved-summary screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryViewState {
    pub total_price: f64,
    /// Every selected item across fetched categories, category-list order
    pub items: Vec<CatalogItem>,
}

// =============================================================================
// Side effects
// =============================================================================

/// One-shot navigation signals
///
/// Distinct from persistent state: a consumed effect is gone, resubscribing
/// never replays it.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    OpenItems(Category),
    OpenSavedSummary,
}
