//! Catalog sources.
//!
//! The wizard consumes the catalog through the narrow [`CatalogSource`]
//! seam: fetch once, get a validated snapshot or one of the load error
//! classes. Retry is always a fresh `fetch()` by the caller.

use crate::error::{Error, Result};
use crate::schema::parse_document_unvalidated;
use async_trait::async_trait;
use motobook_types::Catalog;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::path::PathBuf;
use std::time::Duration;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One fetch attempt, parsed but not integrity-checked.
    async fn fetch_unvalidated(&self) -> Result<Catalog>;

    /// One fetch attempt; the snapshot is accepted whole or not at all.
    async fn fetch(&self) -> Result<Catalog> {
        let catalog = self.fetch_unvalidated().await?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Human-readable origin for error messages and `catalog show`.
    fn describe(&self) -> String;
}

/// Fetches the catalog from the endpoint with a cache-busting timestamp.
pub struct HttpCatalogSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(HttpCatalogSource { endpoint: endpoint.into(), client })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_unvalidated(&self) -> Result<Catalog> {
        let cache_buster = chrono::Utc::now().timestamp_millis();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("t", cache_buster.to_string())])
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("endpoint returned {}", status)));
        }

        let body = response.text().await.map_err(|e| Error::Fetch(e.to_string()))?;
        parse_document_unvalidated(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Reads a local JSON file through the same parse path as the endpoint.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCatalogSource { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_unvalidated(&self) -> Result<Catalog> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_document_unvalidated(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves an in-memory snapshot. Unit-test seam.
pub struct StaticCatalogSource {
    catalog: Catalog,
}

impl StaticCatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        StaticCatalogSource { catalog }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_unvalidated(&self) -> Result<Catalog> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}
