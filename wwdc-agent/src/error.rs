//! Error types for wwdc-agent
//!
//! Only the transport can fail. Inputs that cannot be parsed and lookups
//! that find nothing are reported as empty results, not errors.

use thiserror::Error;

/// Catalog and artwork transport errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Connection, timeout or client construction failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body was not a valid catalog document
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
