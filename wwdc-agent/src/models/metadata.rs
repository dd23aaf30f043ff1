//! Host-facing containers
//!
//! What the media catalog application hands to the agent and receives back.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One ranked candidate for a filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Compact identity (`"{year}-{id}"`)
    pub id: String,
    pub name: Option<String>,
    pub year: Option<u32>,
    /// 0-100
    pub score: u32,
}

/// Order candidates best-first, keeping catalog order among equal scores
pub fn sort_best_first(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Metadata object owned by the host and filled by an update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieMetadata {
    /// Compact identity chosen during search
    pub id: String,
    pub title: Option<String>,
    pub year: Option<u32>,
    pub originally_available_at: Option<NaiveDate>,
    pub summary: Option<String>,
    pub collections: Vec<String>,
    /// Artwork keyed by source URL
    #[serde(skip)]
    pub art: BTreeMap<String, Vec<u8>>,
}

impl MovieMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}
