//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use archiva_cache::provider::CacheManager;
use archiva_core::config::AppConfig;
use archiva_database::repositories::document::DocumentRepository;
use archiva_database::repositories::folder::FolderRepository;
use archiva_database::repositories::record::AcademicRecordRepository;
use archiva_service::document::DocumentService;
use archiva_service::folder::{AncestorService, FolderService};
use archiva_vector::VectorIndexManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Vector index manager
    pub vector: Arc<VectorIndexManager>,

    // ── Repositories ─────────────────────────────────────────
    /// Folder repository
    pub folder_repo: Arc<FolderRepository>,
    /// Document repository
    pub document_repo: Arc<DocumentRepository>,
    /// Academic-record repository
    pub record_repo: Arc<AcademicRecordRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// Ancestor-chain service
    pub ancestor_service: Arc<AncestorService>,
    /// Document service
    pub document_service: Arc<DocumentService>,
}
