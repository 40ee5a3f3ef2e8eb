//! Vector-index manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use archiva_core::config::vector::VectorIndexConfig;
use archiva_core::result::AppResult;
use archiva_core::traits::vector::VectorIndexProvider;

/// Vector-index manager wrapping the configured provider.
///
/// A disabled configuration dispatches to a no-op provider so that the
/// rest of the application never branches on whether the index exists.
#[derive(Debug, Clone)]
pub struct VectorIndexManager {
    /// The inner provider.
    inner: Arc<dyn VectorIndexProvider>,
}

impl VectorIndexManager {
    /// Create a new vector-index manager from configuration.
    pub fn new(config: &VectorIndexConfig) -> AppResult<Self> {
        let inner: Arc<dyn VectorIndexProvider> = if config.enabled {
            info!(endpoint = %config.endpoint, collection = %config.collection, "Initializing vector-index client");
            Arc::new(crate::http::HttpVectorIndex::new(config)?)
        } else {
            info!("Vector index disabled");
            Arc::new(crate::noop::NoopVectorIndex)
        };

        Ok(Self { inner })
    }

    /// Create a manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn VectorIndexProvider>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl VectorIndexProvider for VectorIndexManager {
    async fn delete_document(&self, document_id: i64) -> AppResult<()> {
        self.inner.delete_document(document_id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
