//! kassal.app HTTP client with retry on transient failures

use crate::{ApiConfig, ApiError, ProductQuery, RetryPolicy};
use futures::future::join_all;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use pris_core::{
    ApiItem, ApiPage, Category, Product, ProductId, ProductPage, RawCategory, RawProduct,
    RawStore, Store,
};
use serde::de::DeserializeOwned;

// ============================================================================
// API CLIENT
// ============================================================================

/// Client for the product API
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Client configured from build-time environment
    pub fn from_build_env() -> Self {
        Self::new(ApiConfig::from_build_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// One page of the listing, or of search results when the query has a search term
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let raw: ApiPage<RawProduct> = self.get_json("/products", &query.params()).await?;
        Ok(ProductPage::from_raw(raw, query.page, query.size))
    }

    pub async fn get_products(&self, page: u32) -> Result<ProductPage, ApiError> {
        self.list_products(&ProductQuery::page(page, self.config.page_size))
            .await
    }

    pub async fn search_products(&self, search: &str, page: u32) -> Result<ProductPage, ApiError> {
        self.list_products(&ProductQuery::page(page, self.config.page_size).search(search))
            .await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let raw: ApiItem<RawProduct> = self.get_json(&format!("/products/{}", id), &[]).await?;
        Ok(raw.data.normalize()?)
    }

    /// Fetch several products concurrently, keeping each outcome
    pub async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Vec<(ProductId, Result<Product, ApiError>)> {
        let fetches = ids.iter().map(|&id| async move { (id, self.get_product(id).await) });
        join_all(fetches).await
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let raw: ApiPage<RawCategory> = self.get_json("/categories", &[]).await?;
        Ok(raw.data.into_iter().filter_map(RawCategory::normalize).collect())
    }

    pub async fn get_stores(&self) -> Result<Vec<Store>, ApiError> {
        let raw: ApiPage<RawStore> = self.get_json("/stores", &[]).await?;
        Ok(raw.data.into_iter().filter_map(RawStore::normalize).collect())
    }

    // ========================================================================
    // Transport
    // ========================================================================

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let policy = &self.config.retry_policy;
        let mut attempt = 0u32;

        loop {
            match self.get_json_once(path, params).await {
                Err(e) if e.is_retryable() && policy.should_retry(attempt) => {
                    let delay = policy.delay_ms(attempt);
                    tracing::warn!("GET {} failed ({}), retrying in {}ms", path, e, delay);
                    TimeoutFuture::new(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        let mut req = Request::get(&url)
            .header("Content-Type", "application/json")
            .query(params.iter().map(|(k, v)| (*k, v.as_str())));
        if let Some(auth) = self.config.auth_header() {
            req = req.header("Authorization", &auth);
        }

        tracing::debug!("GET {}", url);
        let resp = req.send().await.map_err(|e| {
            tracing::error!("API request failed for {}: {}", path, e);
            ApiError::Network(e.to_string())
        })?;

        if resp.status() == 404 {
            return Err(ApiError::NotFound);
        }
        if !resp.ok() {
            return Err(ApiError::Status {
                status: resp.status(),
                status_text: resp.status_text(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_build_env()
    }
}
