//! Document handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use archiva_core::error::AppError;
use archiva_core::types::response::ApiEnvelope;
use archiva_entity::document::{AcademicRecord, Document};
use archiva_service::document::service::RegisterDocumentInput;

use crate::dto::request::{MoveDocumentRequest, RegisterDocumentRequest, UpdateRecordRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /files/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Document>>, ApiError> {
    let document = state.document_service.get_document(&auth, id).await?;
    Ok(Json(ApiEnvelope::ok(document)))
}

/// GET /files/{id}/record
pub async fn get_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Vec<AcademicRecord>>>, ApiError> {
    let records = state.document_service.get_records(&auth, id).await?;
    Ok(Json(ApiEnvelope::ok(records)))
}

/// POST /files
pub async fn register_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RegisterDocumentRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<Document>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let document = state
        .document_service
        .register_document(
            &auth,
            RegisterDocumentInput {
                folder_id: req.folder_id,
                name: req.name,
                blob_key: req.blob_key,
                size_bytes: req.size_bytes,
                validation_status: req.validation_status,
                record: req.record.map(Into::into),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiEnvelope::created(document))))
}

/// PATCH /files/{id}
pub async fn move_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<MoveDocumentRequest>,
) -> Result<Json<ApiEnvelope<Document>>, ApiError> {
    let document = state
        .document_service
        .move_document(&auth, id, req.folder_id)
        .await?;
    Ok(Json(ApiEnvelope::ok(document)))
}

/// PUT /files/{id}/record
pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRecordRequest>,
) -> Result<Json<ApiEnvelope<AcademicRecord>>, ApiError> {
    let record = state
        .document_service
        .update_record(&auth, id, req.into())
        .await?;
    Ok(Json(ApiEnvelope::ok(record)))
}

/// DELETE /files/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Document>>, ApiError> {
    let document = state.document_service.delete_document(&auth, id).await?;
    Ok(Json(ApiEnvelope::with_message("deleted", 200, document)))
}
