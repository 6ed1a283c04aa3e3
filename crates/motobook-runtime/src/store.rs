//! Catalog load lifecycle.
//!
//! The snapshot is written only after the awaited fetch resolves, so
//! dropping an in-flight `load()` future cancels the load without handing
//! the store a partial snapshot. A retry is a fresh `load()` call; nothing
//! retries automatically.

use crate::{Error, Result};
use motobook_providers::CatalogSource;
use motobook_types::Catalog;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    state: LoadState,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        match &self.state {
            LoadState::Ready(catalog) => Some(catalog.clone()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// One fetch attempt against the source, bounded by `timeout`.
    pub async fn load(
        &mut self,
        source: &dyn CatalogSource,
        timeout: Duration,
    ) -> Result<Arc<Catalog>> {
        self.state = LoadState::Loading;

        match tokio::time::timeout(timeout, source.fetch()).await {
            Err(_) => {
                let message =
                    format!("catalog load from {} exceeded {:?}", source.describe(), timeout);
                self.state = LoadState::Failed(message.clone());
                Err(Error::Timeout(message))
            }
            Ok(Err(err)) => {
                self.state = LoadState::Failed(err.to_string());
                Err(Error::Provider(err))
            }
            Ok(Ok(catalog)) => {
                let snapshot = Arc::new(catalog);
                self.state = LoadState::Ready(snapshot.clone());
                Ok(snapshot)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motobook_providers::{CatalogSource, FileCatalogSource, StaticCatalogSource};

    /// A source whose fetch never resolves.
    struct StalledSource;

    #[async_trait::async_trait]
    impl CatalogSource for StalledSource {
        async fn fetch_unvalidated(&self) -> motobook_providers::Result<Catalog> {
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "stalled source".to_string()
        }
    }

    #[tokio::test]
    async fn test_load_success_keeps_snapshot() {
        let mut store = CatalogStore::new();
        let source = StaticCatalogSource::new(Catalog::default());

        assert!(!store.is_ready());
        store.load(&source, Duration::from_secs(1)).await.unwrap();
        assert!(store.is_ready());
        assert!(store.snapshot().is_some());
    }

    #[tokio::test]
    async fn test_load_failure_records_message() {
        let mut store = CatalogStore::new();
        let source = FileCatalogSource::new("/nonexistent/catalog.json");

        assert!(store.load(&source, Duration::from_secs(1)).await.is_err());
        assert!(matches!(store.state(), LoadState::Failed(_)));
        assert!(store.snapshot().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_timeout_records_failure() {
        let mut store = CatalogStore::new();

        let err = store.load(&StalledSource, Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
        assert!(err.to_string().contains("stalled source"));
        assert!(matches!(store.state(), LoadState::Failed(_)));
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_retry_is_a_fresh_load() {
        let mut store = CatalogStore::new();
        let bad = FileCatalogSource::new("/nonexistent/catalog.json");
        let good = StaticCatalogSource::new(Catalog::default());

        let _ = store.load(&bad, Duration::from_secs(1)).await;
        store.load(&good, Duration::from_secs(1)).await.unwrap();
        assert!(store.is_ready());
    }
}
