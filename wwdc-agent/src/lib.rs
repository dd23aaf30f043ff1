//! wwdc-agent library interface
//!
//! Resolves local conference-talk videos to catalog sessions: guesses the
//! (year, session id) of a file from its path, ranks catalog sessions against
//! that guess, and projects a chosen session onto host metadata.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{CatalogError, CatalogResult};

/// How the host registers this agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentDescriptor {
    pub name: &'static str,
    /// ISO 639-1 codes
    pub languages: &'static [&'static str],
    pub primary_provider: bool,
    pub fallback_agent: bool,
    /// Agents whose results this one accepts
    pub accepts_from: &'static [&'static str],
}

pub const DESCRIPTOR: AgentDescriptor = AgentDescriptor {
    name: "WWDC",
    languages: &["en"],
    primary_provider: true,
    fallback_agent: false,
    accepts_from: &["com.plexapp.agents.localmedia"],
};
