//! Session catalog retrieval
//!
//! Downloads the catalog document over HTTP and keeps the parsed payload for
//! the configured TTL, so that a burst of search/update calls costs one
//! request. The payload is shared read-only; records are rebuilt from it on
//! every match pass.

use crate::config::AgentConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::models::RawCatalog;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Anything that can hand out the current catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> CatalogResult<Arc<RawCatalog>>;
}

struct CachedCatalog {
    fetched_at: Instant,
    catalog: Arc<RawCatalog>,
}

/// HTTP catalog source with time-based cache
pub struct HttpCatalogSource {
    http_client: reqwest::Client,
    url: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedCatalog>>,
}

impl HttpCatalogSource {
    pub fn new(config: &AgentConfig) -> CatalogResult<Self> {
        Ok(Self {
            http_client: build_http_client(config)?,
            url: config.catalog_url.clone(),
            cache_ttl: config.cache_ttl,
            cache: Mutex::new(None),
        })
    }

    /// Drop the cached payload so the next call refetches
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn download(&self) -> CatalogResult<RawCatalog> {
        tracing::debug!(url = %self.url, "Fetching session catalog");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let catalog: RawCatalog =
            serde_json::from_slice(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(
            url = %self.url,
            tracks = catalog.tracks.len(),
            sessions = catalog.contents.len(),
            "Retrieved session catalog"
        );

        Ok(catalog)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> CatalogResult<Arc<RawCatalog>> {
        // Held across the download so concurrent callers share one request
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                tracing::debug!(
                    age = ?cached.fetched_at.elapsed(),
                    "Using cached session catalog"
                );
                return Ok(Arc::clone(&cached.catalog));
            }
        }

        let catalog = Arc::new(self.download().await?);
        *cache = Some(CachedCatalog {
            fetched_at: Instant::now(),
            catalog: Arc::clone(&catalog),
        });

        Ok(catalog)
    }
}

/// Catalog already in memory; never expires
pub struct StaticCatalogSource {
    catalog: Arc<RawCatalog>,
}

impl StaticCatalogSource {
    pub fn new(catalog: RawCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_catalog(&self) -> CatalogResult<Arc<RawCatalog>> {
        Ok(Arc::clone(&self.catalog))
    }
}

/// HTTP client shared by catalog and artwork requests
pub(crate) fn build_http_client(config: &AgentConfig) -> CatalogResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| CatalogError::Network(e.to_string()))
}
