//! Shared application state

use std::sync::Arc;

use karate_core::{GraphSnapshot, GraphStore, LayoutConfig, MetricsConfig};
use tokio::sync::RwLock;

use crate::config::KarateConfig;
use crate::error::Result;

/// State shared by every handler.
///
/// The store sits behind a read/write lock: mutations hold the write lock,
/// readers hold the read lock only long enough to take a snapshot.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<RwLock<GraphStore>>,
    pub layout: Arc<LayoutConfig>,
    pub metrics: Arc<MetricsConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(store: GraphStore, config: &KarateConfig) -> Self {
        Self {
            graph: Arc::new(RwLock::new(store)),
            layout: Arc::new(config.layout.clone()),
            metrics: Arc::new(config.metrics.clone()),
        }
    }

    /// State holding the canonical graph.
    #[must_use]
    pub fn karate_club(config: &KarateConfig) -> Self {
        Self::new(GraphStore::karate_club(), config)
    }

    pub async fn snapshot(&self) -> GraphSnapshot {
        self.graph.read().await.snapshot()
    }

    /// Run `f` on a fresh snapshot in the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the task panics or is cancelled.
    pub async fn compute<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&GraphSnapshot, &LayoutConfig, &MetricsConfig) -> T + Send + 'static,
    {
        let snapshot = self.snapshot().await;
        let layout = Arc::clone(&self.layout);
        let metrics = Arc::clone(&self.metrics);
        let value = tokio::task::spawn_blocking(move || f(&snapshot, &layout, &metrics)).await?;
        Ok(value)
    }
}
