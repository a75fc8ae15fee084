//! HTTP client for the remote catalog

use super::CatalogApi;
use crate::core::Config;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{CatalogError, CatalogItem, CatalogResult, Category};

/// HTTP client for making network requests to the catalog service
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &Config) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(CatalogError::network)?;

        Ok(Self {
            client,
            base_url: config.catalog_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let started = shared::util::now_millis();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Catalog request failed");
            return Err(CatalogError::Network(format!("HTTP {}", status)));
        }

        let body = response.json::<T>().await.map_err(CatalogError::network)?;
        tracing::debug!(
            url = %url,
            elapsed_ms = shared::util::now_millis() - started,
            "Catalog request completed"
        );
        Ok(body)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
        self.get("categories").await
    }

    async fn fetch_items(&self, category_id: i64) -> CatalogResult<Vec<CatalogItem>> {
        self.get(&format!("categories?categoryId={}", category_id))
            .await
    }
}
