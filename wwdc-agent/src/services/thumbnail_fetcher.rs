//! Session artwork download

use crate::config::AgentConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::services::catalog_client::build_http_client;
use async_trait::async_trait;

/// Downloads artwork bytes for a URL
#[async_trait]
pub trait ThumbnailFetcher: Send + Sync {
    async fn fetch_thumbnail(&self, url: &str) -> CatalogResult<Vec<u8>>;
}

/// Artwork fetcher over HTTP
pub struct HttpThumbnailFetcher {
    http_client: reqwest::Client,
}

impl HttpThumbnailFetcher {
    pub fn new(config: &AgentConfig) -> CatalogResult<Self> {
        Ok(Self {
            http_client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl ThumbnailFetcher for HttpThumbnailFetcher {
    async fn fetch_thumbnail(&self, url: &str) -> CatalogResult<Vec<u8>> {
        tracing::debug!(url = %url, "Fetching thumbnail");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api(status.as_u16(), url.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
