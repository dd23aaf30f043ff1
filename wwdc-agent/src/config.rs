//! Configuration resolution for wwdc-agent
//!
//! Each setting is resolved with ENV → TOML → compiled default priority.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
use wwdc_common::config::TomlConfig;

/// Session catalog published alongside the developer videos
pub const DEFAULT_CATALOG_URL: &str = "https://devimages-cdn.apple.com/wwdc-services/h8a19f8f/049CCC2F-0D8A-4F7D-BAB9-2D8F5BAA7030/contents.json";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const ENV_CATALOG_URL: &str = "WWDC_CATALOG_URL";
pub const ENV_CACHE_TTL_SECS: &str = "WWDC_CACHE_TTL_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "WWDC_HTTP_TIMEOUT_SECS";

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub catalog_url: String,
    /// How long a fetched catalog is reused before refetching
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: user_agent(),
        }
    }
}

/// User-Agent sent with every request
pub fn user_agent() -> String {
    format!("WWDC-Agent/{}", env!("CARGO_PKG_VERSION"))
}

/// Resolve all settings from environment, TOML config and defaults
pub fn resolve_agent_config(toml_config: &TomlConfig) -> AgentConfig {
    let catalog_url = resolve_setting(
        "catalog URL",
        ENV_CATALOG_URL,
        toml_config.catalog_url.clone(),
        DEFAULT_CATALOG_URL.to_string(),
    );
    let cache_ttl_secs = resolve_setting(
        "cache TTL",
        ENV_CACHE_TTL_SECS,
        toml_config.cache_ttl_secs,
        DEFAULT_CACHE_TTL_SECS,
    );
    let timeout_secs = resolve_setting(
        "HTTP timeout",
        ENV_HTTP_TIMEOUT_SECS,
        toml_config.http_timeout_secs,
        DEFAULT_HTTP_TIMEOUT_SECS,
    );

    AgentConfig {
        catalog_url,
        cache_ttl: Duration::from_secs(cache_ttl_secs),
        request_timeout: Duration::from_secs(timeout_secs),
        user_agent: user_agent(),
    }
}

/// Pick one setting by priority
///
/// An environment value that fails to parse is ignored with a warning.
fn resolve_setting<T>(name: &str, env_var: &str, toml_value: Option<T>, default: T) -> T
where
    T: FromStr + Display + PartialEq,
{
    let env_value = std::env::var(env_var).ok().and_then(|raw| match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(env_var, value = %raw, "Ignoring unparseable {} from environment", name);
            None
        }
    });

    if let (Some(env), Some(toml)) = (&env_value, &toml_value) {
        if env != toml {
            warn!(
                "{} set in both environment ({}) and TOML ({}). Using environment (highest priority).",
                name, env, toml
            );
        }
    }

    if let Some(value) = env_value {
        info!("{} loaded from environment variable: {}", name, value);
        return value;
    }

    if let Some(value) = toml_value {
        info!("{} loaded from TOML config: {}", name, value);
        return value;
    }

    default
}
