//! No-op provider used when the vector index is disabled.

use async_trait::async_trait;

use archiva_core::result::AppResult;
use archiva_core::traits::vector::VectorIndexProvider;

/// Provider that accepts every call and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVectorIndex;

#[async_trait]
impl VectorIndexProvider for NoopVectorIndex {
    async fn delete_document(&self, _document_id: i64) -> AppResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
