//! Catalog loading.
//!
//! DESIGN
//! ======
//! The engine never performs I/O; it receives a parsed [`Catalog`]. This
//! module is the collaborator that fetches one, behind the [`CatalogSource`]
//! trait so the service can read a local file in development, call the
//! shop's asset endpoint in production, and use a fixed catalog in tests.
//!
//! ERROR HANDLING
//! ==============
//! A failed load at startup leaves the service on an empty catalog, which
//! prices every design at the base fee. A failed reload keeps the previous
//! catalog in place and reports the error to the caller.

#[cfg(test)]
#[path = "catalog_source_test.rs"]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cake::{Asset, Catalog, CatalogError};

use crate::config::{CatalogLocation, ServiceConfig};

const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum CatalogSourceError {
    #[error("catalog read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog fetch failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to build catalog HTTP client: {0}")]
    HttpClientBuild(String),
    #[error(transparent)]
    Parse(#[from] CatalogError),
}

/// Anything that can produce the current asset catalog.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogSourceError`] if the catalog cannot be read or parsed.
    async fn load(&self) -> Result<Catalog, CatalogSourceError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// FILE
// =============================================================================

pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogSourceError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(Catalog::from_json(&raw)?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

// =============================================================================
// HTTP
// =============================================================================

pub struct HttpCatalogSource {
    http: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogSourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogSourceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogSourceError> {
        let assets: Vec<Asset> = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(Catalog::from_assets(assets))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// =============================================================================
// STATIC
// =============================================================================

/// A fixed catalog held in memory.
#[cfg(test)]
pub struct StaticCatalogSource {
    catalog: Catalog,
}

#[cfg(test)]
impl StaticCatalogSource {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogSourceError> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        "static".into()
    }
}

/// Build the source named by the service configuration.
///
/// # Errors
///
/// Returns an error if an HTTP source is configured and its client cannot be built.
pub fn from_config(config: &ServiceConfig) -> Result<Arc<dyn CatalogSource>, CatalogSourceError> {
    Ok(match &config.catalog {
        CatalogLocation::File(path) => Arc::new(FileCatalogSource::new(path.clone())),
        CatalogLocation::Url(url) => Arc::new(HttpCatalogSource::new(url.clone(), config.catalog_timeout)?),
    })
}
