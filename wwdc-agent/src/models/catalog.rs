//! Remote catalog payload
//!
//! Serde model of the session catalog document. Fields the agent does not
//! read are ignored. Every field it does read is decoded leniently: a missing
//! or wrong-typed value becomes `None`, and a list element that is not an
//! object is dropped, so that one malformed entry cannot fail the whole
//! document. Validation happens in
//! [`CatalogRecord::from_catalog_entry`](crate::models::CatalogRecord::from_catalog_entry).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Numeric identifier that the catalog encodes either as a JSON number or as
/// a decimal string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Interpret as a non-negative integer
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RawId::Number(n) => u64::try_from(*n).ok(),
            RawId::Text(s) => s.trim().parse::<u64>().ok(),
        }
    }
}

/// Whole catalog document
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCatalog {
    #[serde(default, deserialize_with = "lenient_list")]
    pub tracks: Vec<RawTrack>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub contents: Vec<RawContent>,
}

/// Track definition (subject-area grouping)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTrack {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// One session entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    /// Event identifier such as "wwdc2019"; the year is its first digit run
    #[serde(default, deserialize_with = "lenient")]
    pub event_id: Option<String>,
    /// Session number within the event
    #[serde(default, deserialize_with = "lenient")]
    pub event_content_id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub track_id: Option<RawId>,
    /// Platform/focus tags; only an array of strings is meaningful
    #[serde(default)]
    pub platforms: Option<serde_json::Value>,
}

/// Decode a field, mapping a wrong-typed value to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode a list, dropping elements that do not fit and treating a
/// non-list as empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if kept.len() < total {
        tracing::warn!(dropped = total - kept.len(), "Dropped malformed catalog list elements");
    }

    Ok(kept)
}

impl RawCatalog {
    /// Map of track id to track name
    ///
    /// Tracks with an unparseable id or an empty name are left out.
    pub fn track_names(&self) -> HashMap<u64, String> {
        self.tracks
            .iter()
            .filter_map(|track| {
                let id = track.id.as_ref()?.as_u64()?;
                let name = track.name.as_ref().filter(|n| !n.is_empty())?;
                Some((id, name.clone()))
            })
            .collect()
    }
}
