//! Store state-change events
//!
//! Broadcast to every subscriber after each mutation commits. Events carry
//! only what changed; subscribers re-project from store snapshots.

/// A committed store mutation
///
/// All subscribers observe these in the same total order because the store
/// sends them while still holding its write lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The category list snapshot was replaced
    CategoriesUpdated,
    /// A category's item list was fetched and cached
    ItemsLoaded { category_id: i64 },
    /// An item's selection flag flipped; aggregates were updated
    SelectionChanged { category_id: i64, item_id: i64 },
}
