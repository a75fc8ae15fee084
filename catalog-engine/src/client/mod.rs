//! Remote catalog collaborator
//!
//! The store talks to the catalog through the [`CatalogApi`] trait so tests
//! can substitute an in-process implementation. [`HttpCatalogClient`] is the
//! production implementation.

mod http;

pub use http::HttpCatalogClient;

use async_trait::async_trait;
use shared::{CatalogItem, CatalogResult, Category};

/// Remote catalog API
///
/// One attempt per call; the engine never retries on its own. Transport
/// details (URLs, JSON field names) belong to the implementation.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the full category list
    async fn fetch_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Fetch the item list for one category
    async fn fetch_items(&self, category_id: i64) -> CatalogResult<Vec<CatalogItem>>;
}
