//! Document repository.

use sqlx::PgPool;

use archiva_core::error::{AppError, ErrorKind};
use archiva_core::result::AppResult;
use archiva_entity::document::{CreateDocument, Document};

/// Repository for document CRUD and the soft-delete cascade to detail rows.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |e| AppError::with_source(ErrorKind::Database, context, e)
    }

    /// Find a document by ID regardless of status.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_err("Failed to find document"))
    }

    /// Find an active document by ID.
    pub async fn find_active_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1 AND status = 'active'")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_err("Failed to find document"))
    }

    /// Register a document after a completed blob upload.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (folder_id, name, blob_key, size_bytes, extension, validation_status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(data.blob_key)
        .bind(data.size_bytes)
        .bind(Document::extension_of(&data.name))
        .bind(&data.validation_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err)
                if db_err.constraint() == Some("documents_blob_key_key") =>
            {
                AppError::conflict("A document with this blob key already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
        })
    }

    /// Count active documents in a folder.
    pub async fn count_in_folder(&self, folder_id: i64) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE folder_id = $1 AND status = 'active'",
        )
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_err("Failed to count documents"))?;
        Ok(count as u64)
    }

    /// List active documents in a folder, ordered by name then id.
    pub async fn list_in_folder(
        &self,
        folder_id: i64,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE folder_id = $1 AND status = 'active' \
             ORDER BY name ASC, id ASC LIMIT $2 OFFSET $3",
        )
        .bind(folder_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err("Failed to list documents"))
    }

    /// Move a document to another folder. Documents carry no materialized
    /// path of their own, so no cascade is needed.
    pub async fn move_to_folder(&self, id: i64, folder_id: i64) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET folder_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'active' RETURNING *",
        )
        .bind(id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_err("Failed to move document"))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Soft-delete a document together with its academic records, in one
    /// transaction.
    pub async fn soft_delete_cascade(&self, id: i64) -> AppResult<Document> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(Self::db_err("Failed to begin transaction"))?;

        let document = sqlx::query_as::<_, Document>(
            "UPDATE documents SET status = 'deleted', updated_at = NOW() \
             WHERE id = $1 AND status = 'active' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Self::db_err("Failed to delete document"))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;

        sqlx::query(
            "UPDATE academic_records SET status = 'deleted', updated_at = NOW() \
             WHERE document_id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Self::db_err("Failed to delete academic records"))?;

        tx.commit()
            .await
            .map_err(Self::db_err("Failed to commit delete"))?;

        Ok(document)
    }
}
