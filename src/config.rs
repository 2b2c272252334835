//! Service configuration parsed from environment variables.
//!
//! Required (exactly one):
//! - `CATALOG_PATH`: JSON asset list on local disk
//! - `CATALOG_URL`: endpoint returning the same JSON asset list
//!
//! Optional:
//! - `PORT`: default 3000
//! - `CATALOG_TIMEOUT_SECS`: HTTP catalog fetch timeout, default 10
//! - `SESSION_IDLE_SECS`: sessions untouched this long are swept, default 1800
//! - `SESSION_SWEEP_SECS`: sweep interval, default 60
//! - `MAX_SESSIONS`: live session cap, default 1000
//! - `MAX_QUOTES`: stored quote cap, default 1000

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;
pub const DEFAULT_SESSION_SWEEP_SECS: u64 = 60;
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_MAX_QUOTES: usize = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigLoadError {
    #[error("no catalog source; set CATALOG_PATH or CATALOG_URL")]
    MissingCatalogSource,
    #[error("CATALOG_PATH and CATALOG_URL are mutually exclusive")]
    AmbiguousCatalogSource,
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Where the asset catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    File(PathBuf),
    Url(String),
}

/// Session lifetime plus session and quote capacity limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub idle: Duration,
    pub sweep_every: Duration,
    pub max_sessions: usize,
    pub max_quotes: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            sweep_every: Duration::from_secs(DEFAULT_SESSION_SWEEP_SECS),
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_quotes: DEFAULT_MAX_QUOTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub catalog: CatalogLocation,
    pub catalog_timeout: Duration,
    pub sessions: SessionLimits,
}

impl ServiceConfig {
    /// Build typed service config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog source is configured, both are, or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed service config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog = match (non_empty(get("CATALOG_PATH")), non_empty(get("CATALOG_URL"))) {
            (Some(path), None) => CatalogLocation::File(PathBuf::from(path)),
            (None, Some(url)) => CatalogLocation::Url(url.trim_end_matches('/').to_owned()),
            (Some(_), Some(_)) => return Err(ConfigLoadError::AmbiguousCatalogSource),
            (None, None) => return Err(ConfigLoadError::MissingCatalogSource),
        };

        Ok(Self {
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            catalog,
            catalog_timeout: Duration::from_secs(parse_or(&get, "CATALOG_TIMEOUT_SECS", DEFAULT_CATALOG_TIMEOUT_SECS)?),
            sessions: SessionLimits {
                idle: Duration::from_secs(parse_or(&get, "SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?),
                sweep_every: Duration::from_secs(
                    parse_or(&get, "SESSION_SWEEP_SECS", DEFAULT_SESSION_SWEEP_SECS)?.max(1),
                ),
                max_sessions: parse_or(&get, "MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
                max_quotes: parse_or(&get, "MAX_QUOTES", DEFAULT_MAX_QUOTES)?,
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Missing keys take the default; present but unparsable keys are an error.
fn parse_or<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(get(key)) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigLoadError::Invalid { key, value: raw }),
    }
}
