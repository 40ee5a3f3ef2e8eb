//! Vector index provider trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for the external vector store holding document embeddings.
///
/// Archiva never computes embeddings itself; the upload pipeline inserts
/// them out of band. The core only has to keep the index consistent when
/// documents disappear, and every call is best-effort: failures are
/// logged by the caller and never fail the primary mutation.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Remove the embedding entry for a document.
    async fn delete_document(&self, document_id: i64) -> AppResult<()>;

    /// Check that the vector store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
