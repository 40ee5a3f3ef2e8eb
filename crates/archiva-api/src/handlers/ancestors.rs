//! Ancestor-chain (breadcrumb) handlers.

use axum::Json;
use axum::extract::{Path, State};

use archiva_core::types::response::ApiEnvelope;
use archiva_service::folder::AncestorEntry;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /parentFolders/folderId/{id}
///
/// The chain of ancestors of a folder, root first, excluding the folder
/// itself.
pub async fn chain_of_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Vec<AncestorEntry>>>, ApiError> {
    let chain = state.ancestor_service.chain_of_folder(&auth, id).await?;
    Ok(Json(ApiEnvelope::ok(chain)))
}

/// GET /parentFolders/fileId/{id}
///
/// The chain of folders from the root down to, and including, the folder
/// containing the document.
pub async fn chain_of_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiEnvelope<Vec<AncestorEntry>>>, ApiError> {
    let chain = state.ancestor_service.chain_of_document(&auth, id).await?;
    Ok(Json(ApiEnvelope::ok(chain)))
}
