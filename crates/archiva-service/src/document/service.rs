//! Document use cases.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use archiva_core::error::AppError;
use archiva_core::result::AppResult;
use archiva_core::traits::vector::VectorIndexProvider;
use archiva_database::repositories::document::DocumentRepository;
use archiva_database::repositories::folder::FolderRepository;
use archiva_database::repositories::record::AcademicRecordRepository;
use archiva_entity::document::{AcademicRecord, AcademicRecordPatch, CreateDocument, Document};
use archiva_entity::folder::Folder;
use archiva_vector::VectorIndexManager;

use crate::context::RequestContext;

/// Handles document registration, moves, record updates, and deletion.
///
/// Blob content never passes through this service: the upload pipeline
/// stores the blob and hands over its key, and documents only reference
/// it. Content is immutable once registered.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    document_repo: Arc<DocumentRepository>,
    /// Academic-record repository.
    record_repo: Arc<AcademicRecordRepository>,
    /// Folder repository (for placement checks).
    folder_repo: Arc<FolderRepository>,
    /// Vector index, cleaned up best-effort on deletes.
    vector: Arc<VectorIndexManager>,
}

/// Input for registering a completed upload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterDocumentInput {
    /// The folder to place the document in.
    pub folder_id: i64,
    /// Document name, including extension.
    pub name: String,
    /// Blob store key produced by the upload pipeline.
    pub blob_key: Uuid,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Validation workflow tag.
    pub validation_status: Option<String>,
    /// Optional academic-record fields captured at upload time.
    pub record: Option<AcademicRecordPatch>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        record_repo: Arc<AcademicRecordRepository>,
        folder_repo: Arc<FolderRepository>,
        vector: Arc<VectorIndexManager>,
    ) -> Self {
        Self {
            document_repo,
            record_repo,
            folder_repo,
            vector,
        }
    }

    /// Gets an active document visible to the caller.
    ///
    /// A document inherits visibility from its containing folder; one in
    /// a folder the caller cannot see is reported as not found.
    pub async fn get_document(&self, ctx: &RequestContext, document_id: i64) -> AppResult<Document> {
        let document = self
            .document_repo
            .find_active_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))?;

        self.require_visible_folder(ctx, document.folder_id)
            .await
            .map_err(|_| AppError::not_found(format!("Document {document_id} not found")))?;

        Ok(document)
    }

    /// Gets the active academic records of a document.
    pub async fn get_records(
        &self,
        ctx: &RequestContext,
        document_id: i64,
    ) -> AppResult<Vec<AcademicRecord>> {
        self.get_document(ctx, document_id).await?;
        self.record_repo.find_by_document(document_id).await
    }

    /// Registers a document after its blob upload completed, optionally
    /// creating the academic record captured alongside it.
    pub async fn register_document(
        &self,
        ctx: &RequestContext,
        input: RegisterDocumentInput,
    ) -> AppResult<Document> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation("Document name cannot be empty"));
        }
        if input.size_bytes < 0 {
            return Err(AppError::validation("Document size cannot be negative"));
        }

        self.require_visible_folder(ctx, input.folder_id).await?;

        let document = self
            .document_repo
            .create(&CreateDocument {
                folder_id: input.folder_id,
                name: input.name.trim().to_string(),
                blob_key: input.blob_key,
                size_bytes: input.size_bytes,
                validation_status: input.validation_status,
            })
            .await?;

        if let Some(record) = input.record.filter(|r| !r.is_empty()) {
            self.record_repo.create(document.id, &record).await?;
        }

        info!(
            subject = %ctx.subject,
            document_id = document.id,
            folder_id = document.folder_id,
            "Document registered"
        );

        Ok(document)
    }

    /// Moves a document to another folder.
    pub async fn move_document(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        target_folder_id: i64,
    ) -> AppResult<Document> {
        self.get_document(ctx, document_id).await?;
        self.require_visible_folder(ctx, target_folder_id).await?;

        let document = self
            .document_repo
            .move_to_folder(document_id, target_folder_id)
            .await?;

        info!(
            subject = %ctx.subject,
            document_id,
            target_folder_id,
            "Document moved"
        );

        Ok(document)
    }

    /// Applies a partial update to a document's academic record, creating
    /// the record when none exists yet.
    pub async fn update_record(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        patch: AcademicRecordPatch,
    ) -> AppResult<AcademicRecord> {
        if patch.is_empty() {
            return Err(AppError::validation("Record update contains no fields"));
        }

        self.get_document(ctx, document_id).await?;

        let existing = self.record_repo.find_by_document(document_id).await?;
        let record = if existing.is_empty() {
            self.record_repo.create(document_id, &patch).await?
        } else {
            self.record_repo.update_for_document(document_id, &patch).await?
        };

        info!(subject = %ctx.subject, document_id, record_id = record.id, "Record updated");

        Ok(record)
    }

    /// Soft-deletes a document together with its academic records, then
    /// removes its vector-index entry best-effort.
    pub async fn delete_document(&self, ctx: &RequestContext, document_id: i64) -> AppResult<Document> {
        self.get_document(ctx, document_id).await?;

        let document = self.document_repo.soft_delete_cascade(document_id).await?;

        // The database is the source of truth; a failed index cleanup is
        // only logged and never rolls back the delete.
        if let Err(e) = self.vector.delete_document(document_id).await {
            warn!(document_id, error = %e, "Vector-index cleanup failed");
        }

        info!(subject = %ctx.subject, document_id, "Document deleted");

        Ok(document)
    }

    async fn require_visible_folder(
        &self,
        ctx: &RequestContext,
        folder_id: i64,
    ) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .find_active_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        if !folder.visible_to(&ctx.program_ids) {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        Ok(folder)
    }
}
