//! Catalog domain models
//!
//! `Category` and `CatalogItem` are value objects deserialized from the
//! remote catalog. Wire field names for budgets are camelCase; `is_selected`
//! is purely local state and never comes from the wire.

use serde::{Deserialize, Serialize};

/// A top-level catalog grouping (e.g. "Venues")
///
/// Immutable once fetched. `id` is unique and stable across refetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    /// Image URL
    pub image: String,
}

/// A selectable budget line belonging to one category
///
/// `id` is unique within its owning category. `is_selected` is the only
/// mutable field; toggling produces a new value, identity never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    /// Image URL
    pub image: String,
    #[serde(rename = "minBudget")]
    pub min_budget: f64,
    #[serde(rename = "maxBudget")]
    pub max_budget: f64,
    #[serde(rename = "avgBudget")]
    pub avg_budget: f64,
    /// Local selection state, defaults to false on deserialization
    #[serde(default, skip_serializing)]
    pub is_selected: bool,
}

impl CatalogItem {
    /// Copy of this item with `is_selected` flipped
    pub fn toggled(&self) -> Self {
        Self {
            is_selected: !self.is_selected,
            ..self.clone()
        }
    }
}
