//! Session record and compact identity

use crate::models::catalog::{RawContent, RawId};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use wwdc_common::Error;

/// First `digits-digits` pair anywhere in a compact identity string
static METADATA_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)-([0-9]+)").expect("valid metadata id regex"));

static DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit run regex"));

/// Durable (year, id) reference to one session, persisted by the host as
/// `"{year}-{id}"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionIdentity {
    pub year: u32,
    pub id: u64,
}

impl SessionIdentity {
    pub fn new(year: u32, id: u64) -> Self {
        Self { year, id }
    }
}

impl fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.id)
    }
}

impl FromStr for SessionIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = CatalogRecord::from_metadata_id(s);
        record
            .identity()
            .ok_or_else(|| Error::InvalidInput(format!("Not a session identity: {:?}", s)))
    }
}

/// One conference session
///
/// Immutable once built, except for `score`, which the matcher sets while
/// ranking and which means nothing outside of one ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogRecord {
    pub year: Option<u32>,
    pub id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Originally-available date; the catalog does not provide one
    pub date: Option<NaiveDate>,
    /// Track name first, then platform tags in catalog order
    pub categories: Vec<String>,
    /// Artwork URL; the catalog does not provide one
    pub thumbnail: Option<String>,
    pub score: u32,
}

impl CatalogRecord {
    /// Build a record from one catalog entry
    ///
    /// `tracks` maps track ids to names. Returns `None` when the entry has no
    /// usable content id, since such an entry cannot be identified at all.
    /// Every other malformed field is skipped on its own.
    pub fn from_catalog_entry(entry: &RawContent, tracks: &HashMap<u64, String>) -> Option<Self> {
        let id = entry.event_content_id.as_ref().and_then(RawId::as_u64)?;

        let mut record = CatalogRecord {
            year: entry.event_id.as_deref().and_then(parse_event_year),
            id: Some(id),
            title: entry.title.clone(),
            description: entry.description.clone(),
            ..Default::default()
        };

        if let Some(track) = entry
            .track_id
            .as_ref()
            .and_then(RawId::as_u64)
            .and_then(|track_id| tracks.get(&track_id))
        {
            record.categories.push(track.clone());
        }

        if let Some(serde_json::Value::Array(platforms)) = &entry.platforms {
            record
                .categories
                .extend(platforms.iter().filter_map(|p| p.as_str()).map(str::to_string));
        }

        Some(record)
    }

    /// Rebuild the (year, id) pair from a compact identity string
    ///
    /// No two-digit year expansion here: the string was produced from an
    /// already expanded year. If no `digits-digits` pair is present both
    /// fields stay unknown.
    pub fn from_metadata_id(metadata_id: &str) -> Self {
        let mut record = CatalogRecord::default();

        if let Some(caps) = METADATA_ID_RE.captures(metadata_id) {
            record.year = caps.get(1).and_then(|m| m.as_str().parse().ok());
            record.id = caps.get(2).and_then(|m| m.as_str().parse().ok());
        }

        record
    }

    /// Identity key, when both halves are known
    pub fn identity(&self) -> Option<SessionIdentity> {
        Some(SessionIdentity::new(self.year?, self.id?))
    }

    /// Compact identity string for the host
    pub fn metadata_id(&self) -> Option<String> {
        self.identity().map(|identity| identity.to_string())
    }
}

/// Year of a catalog event, taken from the first digit run of its identifier
/// ("wwdc2019" → 2019)
///
/// The catalog feed historically used -1 for "no year"; that value never
/// leaves this function.
pub fn parse_event_year(event_id: &str) -> Option<u32> {
    DIGIT_RUN_RE
        .find(event_id)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}
