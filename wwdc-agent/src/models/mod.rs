//! Data models for the WWDC agent
//!
//! - Raw catalog payload as delivered by the remote source
//! - Normalized session records and compact identities
//! - Host search-result and metadata containers

pub mod catalog;
pub mod metadata;
pub mod session;

pub use catalog::{RawCatalog, RawContent, RawId, RawTrack};
pub use metadata::{sort_best_first, MovieMetadata, SearchResult};
pub use session::{parse_event_year, CatalogRecord, SessionIdentity};
