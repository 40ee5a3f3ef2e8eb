//! Folder CRUD and listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use archiva_core::error::AppError;
use archiva_core::types::pagination::PageResponse;
use archiva_core::types::response::ApiEnvelope;
use archiva_entity::ChildEntry;
use archiva_entity::folder::Folder;
use archiva_service::folder::service::CreateFolderInput;

use crate::dto::request::{CreateFolderRequest, MoveFolderRequest, RenameFolderRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /folders
pub async fn list_root_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiEnvelope<PageResponse<Folder>>>, ApiError> {
    let page = params.into_page_request()?;
    let folders = state.folder_service.list_roots(&auth, page).await?;
    Ok(Json(ApiEnvelope::ok(folders)))
}

/// GET /folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Folder>>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiEnvelope::ok(folder)))
}

/// GET /folders/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiEnvelope<PageResponse<ChildEntry>>>, ApiError> {
    let page = params.into_page_request()?;
    let children = state.folder_service.list_children(&auth, id, page).await?;
    Ok(Json(ApiEnvelope::ok(children)))
}

/// POST /folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<Folder>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            CreateFolderInput {
                name: req.nombre,
                parent_id: req.parent_id,
                program_id: req.program_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiEnvelope::created(folder))))
}

/// PUT /folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<RenameFolderRequest>,
) -> Result<Json<ApiEnvelope<Folder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .rename_folder(&auth, id, &req.nombre)
        .await?;
    Ok(Json(ApiEnvelope::ok(folder)))
}

/// PATCH /folders/{id}
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<MoveFolderRequest>,
) -> Result<Json<ApiEnvelope<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .move_folder(&auth, id, req.parent_id)
        .await?;
    Ok(Json(ApiEnvelope::ok(folder)))
}

/// DELETE /folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Folder>>, ApiError> {
    let folder = state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiEnvelope::with_message("deleted", 200, folder)))
}
