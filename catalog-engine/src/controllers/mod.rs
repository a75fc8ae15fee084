//! Screen controllers
//!
//! One controller per screen, each a single worker task draining an intent
//! queue and re-projecting on store broadcasts:
//!
//! ```text
//! UI ── intents ──► controller worker ──► CatalogStore
//!  ▲                      │
//!  ├── watch state ◄──────┤ (projection per mutation)
//!  └── side effects ◄─────┘ (one-shot, never replayed)
//! ```
//!
//! Controllers hold no business truth: `is_loading` and `error` are
//! presentation flags layered on store calls, everything else is projected
//! from store snapshots.

mod categories;
pub mod contract;
mod items;
mod summary;

pub use categories::{CategoriesController, CategoriesHandle};
pub use contract::{
    CategoriesIntent, CategoriesViewState, ItemsIntent, ItemsViewState, SideEffect,
    SummaryViewState,
};
pub use items::{ItemsController, ItemsHandle};
pub use summary::{SummaryController, SummaryHandle};

/// Side-effect channel buffer
///
/// Effects are best-effort one-shots; a stalled UI drops navigation rather
/// than blocking the worker.
pub(crate) const SIDE_EFFECT_BUFFER: usize = 8;
