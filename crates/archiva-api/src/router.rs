//! Route definitions for the Archiva HTTP API.
//!
//! Paths follow the legacy client's contract (no `/api` prefix, the
//! `parentFolders` breadcrumb endpoints). The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(folder_routes())
        .merge(ancestor_routes())
        .merge(file_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Folder CRUD and merged child listings
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_root_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::rename_folder))
        .route("/folders/{id}", patch(handlers::folder::move_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route(
            "/folders/{id}/children",
            get(handlers::folder::list_children),
        )
}

/// Breadcrumb endpoints
fn ancestor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parentFolders/folderId/{id}",
            get(handlers::ancestors::chain_of_folder),
        )
        .route(
            "/parentFolders/fileId/{id}",
            get(handlers::ancestors::chain_of_document),
        )
}

/// Document registration, moves, records, and deletion
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::register_document))
        .route("/files/{id}", get(handlers::file::get_document))
        .route("/files/{id}", patch(handlers::file::move_document))
        .route("/files/{id}", delete(handlers::file::delete_document))
        .route("/files/{id}/record", get(handlers::file::get_records))
        .route("/files/{id}/record", put(handlers::file::update_record))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
