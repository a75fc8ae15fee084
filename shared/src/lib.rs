//! Shared types for the Fiesta catalog engine
//!
//! Domain models, error taxonomy, and small utilities used by every
//! crate in the workspace.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use models::{Category, CatalogItem};
pub use serde::{Deserialize, Serialize};
