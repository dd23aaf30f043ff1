//! Test Helper Utilities
//!
//! Shared fakes for the catalog source and artwork fetcher

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wwdc_agent::models::RawCatalog;
use wwdc_agent::services::{CatalogSource, ResolutionService, ThumbnailFetcher};
use wwdc_agent::{CatalogError, CatalogResult};

/// Catalog document shaped like the published feed
pub fn sample_catalog_json() -> serde_json::Value {
    json!({
        "tracks": [
            {"id": "1", "name": "Developer Tools"},
            {"id": "2", "name": "Swift"}
        ],
        "contents": [
            {
                "id": "wwdc2019-401",
                "eventId": "wwdc2019",
                "eventContentId": "401",
                "title": "What's New in Xcode 11",
                "description": "Xcode 11 is packed with new features.",
                "trackId": "1",
                "platforms": ["iOS", "macOS"]
            },
            {
                "id": "wwdc2019-402",
                "eventId": "wwdc2019",
                "eventContentId": "402",
                "title": "What's New in Swift",
                "description": "Swift 5.1 brings module stability.",
                "trackId": "2",
                "platforms": ["iOS", 42, "macOS", "tvOS", "watchOS"]
            },
            {
                "id": "wwdc2018-401",
                "eventId": "wwdc2018",
                "eventContentId": "401",
                "title": "What's New in Swift",
                "description": "Swift 4.2 overview.",
                "trackId": "2"
            },
            {
                "id": "wwdc2020-10170",
                "eventId": "wwdc2020",
                "eventContentId": "10170",
                "title": "What's new in SwiftUI",
                "description": "SwiftUI keeps growing.",
                "trackId": "9"
            },
            {
                "id": "tech-talks-401",
                "eventId": "tech-talks",
                "eventContentId": "401",
                "title": "Designing Great Widgets",
                "description": "No year on this one."
            }
        ]
    })
}

pub fn sample_catalog() -> RawCatalog {
    serde_json::from_value(sample_catalog_json()).unwrap()
}

/// Same catalog with a second 2019-401 entry appended
pub fn duplicate_catalog() -> RawCatalog {
    let mut value = sample_catalog_json();
    value["contents"].as_array_mut().unwrap().push(json!({
        "eventId": "wwdc2019",
        "eventContentId": "401",
        "title": "What's New in Xcode 11 (repeat)",
        "description": "Duplicate feed entry.",
        "trackId": "1"
    }));
    serde_json::from_value(value).unwrap()
}

/// In-memory catalog that counts how often it was asked
pub struct CountingCatalogSource {
    catalog: Arc<RawCatalog>,
    fetches: AtomicUsize,
}

impl CountingCatalogSource {
    pub fn new(catalog: RawCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for CountingCatalogSource {
    async fn fetch_catalog(&self) -> CatalogResult<Arc<RawCatalog>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.catalog))
    }
}

/// Catalog source whose transport is down
pub struct UnreachableCatalogSource;

#[async_trait]
impl CatalogSource for UnreachableCatalogSource {
    async fn fetch_catalog(&self) -> CatalogResult<Arc<RawCatalog>> {
        Err(CatalogError::Network("connection refused".to_string()))
    }
}

/// Artwork fetcher returning fixed bytes and recording requested URLs
#[derive(Default)]
pub struct RecordingThumbnailFetcher {
    pub requests: Mutex<Vec<String>>,
}

#[async_trait]
impl ThumbnailFetcher for RecordingThumbnailFetcher {
    async fn fetch_thumbnail(&self, url: &str) -> CatalogResult<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(vec![0xFF, 0xD8, 0xFF])
    }
}

/// Artwork fetcher that always fails
pub struct FailingThumbnailFetcher;

#[async_trait]
impl ThumbnailFetcher for FailingThumbnailFetcher {
    async fn fetch_thumbnail(&self, _url: &str) -> CatalogResult<Vec<u8>> {
        Err(CatalogError::Api(404, "not found".to_string()))
    }
}

/// Service over the sample catalog, plus the source for fetch counting
pub fn sample_service() -> (ResolutionService, Arc<CountingCatalogSource>) {
    service_with(sample_catalog())
}

pub fn service_with(catalog: RawCatalog) -> (ResolutionService, Arc<CountingCatalogSource>) {
    let source = Arc::new(CountingCatalogSource::new(catalog));
    let service = ResolutionService::new(
        source.clone(),
        Arc::new(RecordingThumbnailFetcher::default()),
    );
    (service, source)
}
