//! Application builder — wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use archiva_cache::provider::CacheManager;
use archiva_core::config::AppConfig;
use archiva_core::error::AppError;
use archiva_database::repositories::document::DocumentRepository;
use archiva_database::repositories::folder::FolderRepository;
use archiva_database::repositories::record::AcademicRecordRepository;
use archiva_service::document::DocumentService;
use archiva_service::folder::{AncestorService, FolderService};
use archiva_vector::VectorIndexManager;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the shared application state from configuration and a pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let vector = Arc::new(VectorIndexManager::new(&config.vector_index)?);

    let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
    let record_repo = Arc::new(AcademicRecordRepository::new(db_pool.clone()));

    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&document_repo),
        Arc::clone(&cache),
    ));
    let ancestor_service = Arc::new(AncestorService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&document_repo),
        Arc::clone(&cache),
    ));
    let document_service = Arc::new(DocumentService::new(
        Arc::clone(&document_repo),
        Arc::clone(&record_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&vector),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        cache,
        vector,
        folder_repo,
        document_repo,
        record_repo,
        folder_service,
        ancestor_service,
        document_service,
    })
}

/// Runs the Archiva server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting Archiva server...");

    let host = config.server.host.clone();
    let port = config.server.port;

    let state = build_state(config, db_pool).await?;
    let app = build_app(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Archiva server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
