//! Service modules for session identity resolution

pub mod catalog_client;
pub mod catalog_matcher;
pub mod filename_parser;
pub mod resolution_service;
pub mod thumbnail_fetcher;
pub mod title_ranker;

pub use catalog_client::{CatalogSource, HttpCatalogSource, StaticCatalogSource};
pub use catalog_matcher::{match_sessions, score_record, MatchMode, MatchTarget};
pub use filename_parser::{extract_identity, ExtractedIdentity};
pub use resolution_service::{apply_record, ResolutionService};
pub use thumbnail_fetcher::{HttpThumbnailFetcher, ThumbnailFetcher};
pub use title_ranker::rank_match;
