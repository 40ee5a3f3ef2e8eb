//! Academic-record repository.

use sqlx::PgPool;

use archiva_core::error::{AppError, ErrorKind};
use archiva_core::result::AppResult;
use archiva_entity::document::{AcademicRecord, AcademicRecordPatch};

/// Repository for the academic-record detail rows attached to documents.
#[derive(Debug, Clone)]
pub struct AcademicRecordRepository {
    pool: PgPool,
}

impl AcademicRecordRepository {
    /// Create a new academic-record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |e| AppError::with_source(ErrorKind::Database, context, e)
    }

    /// Create a record for a document.
    pub async fn create(
        &self,
        document_id: i64,
        fields: &AcademicRecordPatch,
    ) -> AppResult<AcademicRecord> {
        sqlx::query_as::<_, AcademicRecord>(
            "INSERT INTO academic_records (document_id, student_name, student_code, period, notes) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(document_id)
        .bind(&fields.student_name)
        .bind(&fields.student_code)
        .bind(&fields.period)
        .bind(&fields.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_err("Failed to create academic record"))
    }

    /// List active records for a document.
    pub async fn find_by_document(&self, document_id: i64) -> AppResult<Vec<AcademicRecord>> {
        sqlx::query_as::<_, AcademicRecord>(
            "SELECT * FROM academic_records \
             WHERE document_id = $1 AND status = 'active' ORDER BY id ASC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err("Failed to list academic records"))
    }

    /// Apply a partial update to the active record of a document. Fields
    /// left `None` keep their current value.
    pub async fn update_for_document(
        &self,
        document_id: i64,
        patch: &AcademicRecordPatch,
    ) -> AppResult<AcademicRecord> {
        sqlx::query_as::<_, AcademicRecord>(
            "UPDATE academic_records SET \
                student_name = COALESCE($2, student_name), \
                student_code = COALESCE($3, student_code), \
                period = COALESCE($4, period), \
                notes = COALESCE($5, notes), \
                updated_at = NOW() \
             WHERE id = ( \
                SELECT id FROM academic_records \
                WHERE document_id = $1 AND status = 'active' \
                ORDER BY id ASC LIMIT 1 \
             ) RETURNING *",
        )
        .bind(document_id)
        .bind(&patch.student_name)
        .bind(&patch.student_code)
        .bind(&patch.period)
        .bind(&patch.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_err("Failed to update academic record"))?
        .ok_or_else(|| {
            AppError::not_found(format!("No academic record for document {document_id}"))
        })
    }
}
