//! # WWDC Common Library
//!
//! Shared code for the WWDC metadata agent:
//! - Error types
//! - TOML configuration file loading

pub mod config;
pub mod error;

pub use error::{Error, Result};
