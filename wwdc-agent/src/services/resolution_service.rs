//! Resolution service
//!
//! The two questions the host asks:
//! - search: which sessions could this file be?
//! - update: given the session the user picked, what are its details?

use crate::config::AgentConfig;
use crate::error::CatalogResult;
use crate::models::{CatalogRecord, MovieMetadata, SearchResult, SessionIdentity};
use crate::services::catalog_client::{CatalogSource, HttpCatalogSource};
use crate::services::catalog_matcher::{match_sessions, MatchMode, MatchTarget};
use crate::services::filename_parser::extract_identity;
use crate::services::thumbnail_fetcher::{HttpThumbnailFetcher, ThumbnailFetcher};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

/// Ties filename extraction, catalog retrieval and matching together
///
/// Stateless between calls apart from whatever the catalog source caches.
pub struct ResolutionService {
    catalog: Arc<dyn CatalogSource>,
    thumbnails: Arc<dyn ThumbnailFetcher>,
}

impl ResolutionService {
    pub fn new(catalog: Arc<dyn CatalogSource>, thumbnails: Arc<dyn ThumbnailFetcher>) -> Self {
        Self {
            catalog,
            thumbnails,
        }
    }

    /// Service backed by the HTTP catalog and artwork fetchers
    pub fn from_config(config: &AgentConfig) -> CatalogResult<Self> {
        Ok(Self::new(
            Arc::new(HttpCatalogSource::new(config)?),
            Arc::new(HttpThumbnailFetcher::new(config)?),
        ))
    }

    /// Candidate sessions for a file, in catalog order
    ///
    /// # Arguments
    /// * `path` - File path as supplied by the host (may be percent-encoded)
    /// * `hinted_year` - Year the host already knows, used when the path has none
    /// * `hinted_title` - Title the host already knows, used for title scoring
    ///
    /// Returns an empty list without touching the catalog when neither a year
    /// nor an id could be determined.
    pub async fn find_candidates(
        &self,
        path: &str,
        hinted_year: Option<u32>,
        hinted_title: Option<&str>,
    ) -> CatalogResult<Vec<SearchResult>> {
        let path = decode_path(path);
        let mut identity = extract_identity(&path);

        if identity.year.is_none() {
            identity.year = hinted_year;
        }

        if identity.is_empty() {
            debug!(path = %path, "No year or session id in path, skipping search");
            return Ok(Vec::new());
        }

        let catalog = self.catalog.fetch_catalog().await?;
        let target = MatchTarget::new(identity.year, identity.id, hinted_title);
        let records = match_sessions(&catalog, &target, MatchMode::Ranked);

        let results: Vec<SearchResult> = records
            .into_iter()
            .filter_map(|record| {
                // A session without a year can never be resolved again
                let id = record.metadata_id()?;
                Some(SearchResult {
                    id,
                    name: record.title,
                    year: record.year,
                    score: record.score,
                })
            })
            .collect();

        info!(
            path = %path,
            year = ?identity.year,
            id = ?identity.id,
            candidates = results.len(),
            "Search complete"
        );

        Ok(results)
    }

    /// The single session a compact identity refers to
    ///
    /// `None` when the identity cannot be parsed, or when the catalog holds
    /// zero or several sessions with that (year, id).
    pub async fn resolve_exact(&self, metadata_id: &str) -> CatalogResult<Option<CatalogRecord>> {
        let identity = match metadata_id.parse::<SessionIdentity>() {
            Ok(identity) => identity,
            Err(e) => {
                debug!(metadata_id = %metadata_id, error = %e, "Unparseable session identity");
                return Ok(None);
            }
        };

        let catalog = self.catalog.fetch_catalog().await?;
        let target = MatchTarget::new(Some(identity.year), Some(identity.id), None);
        let mut records = match_sessions(&catalog, &target, MatchMode::Exact);

        if records.len() != 1 {
            debug!(
                metadata_id = %metadata_id,
                matches = records.len(),
                "No unique session for identity"
            );
            return Ok(None);
        }

        Ok(records.pop())
    }

    /// Fill a host metadata object from the session its id refers to
    ///
    /// Returns `true` when a session was found and applied. With `force`
    /// unset only empty fields are written.
    pub async fn update_metadata(
        &self,
        metadata: &mut MovieMetadata,
        force: bool,
    ) -> CatalogResult<bool> {
        let Some(record) = self.resolve_exact(&metadata.id).await? else {
            return Ok(false);
        };

        apply_record(metadata, &record, force);
        self.attach_thumbnail(metadata, &record).await;

        info!(
            id = %metadata.id,
            title = ?metadata.title,
            force,
            "Metadata updated"
        );

        Ok(true)
    }

    /// Download the record's artwork into `metadata.art` if not already there
    ///
    /// Best effort: a failed download is logged and dropped, leaving the art
    /// unset without failing the surrounding update.
    pub async fn attach_thumbnail(&self, metadata: &mut MovieMetadata, record: &CatalogRecord) {
        let Some(url) = &record.thumbnail else {
            return;
        };
        if metadata.art.contains_key(url) {
            return;
        }

        match self.thumbnails.fetch_thumbnail(url).await {
            Ok(bytes) => {
                metadata.art.insert(url.clone(), bytes);
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Thumbnail fetch failed, ignoring");
            }
        }
    }
}

/// Copy record fields into host metadata
///
/// Each field is written when `force` is set or the field is currently
/// empty. The date is only written when the record has one.
pub fn apply_record(metadata: &mut MovieMetadata, record: &CatalogRecord, force: bool) {
    if force || metadata.title.as_deref().map_or(true, str::is_empty) {
        metadata.title = record.title.clone();
    }

    if force || metadata.year.is_none() {
        metadata.year = record.year;
    }

    if (force || metadata.originally_available_at.is_none()) && record.date.is_some() {
        metadata.originally_available_at = record.date;
    }

    if force || metadata.summary.as_deref().map_or(true, str::is_empty) {
        metadata.summary = record.description.clone();
    }

    if force || metadata.collections.is_empty() {
        metadata.collections = record.categories.clone();
    }
}

/// Undo host percent-encoding; undecodable input is used as is
fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}
