//! Health check handler.

use axum::Json;
use axum::extract::State;

use archiva_core::traits::cache::CacheProvider;
use archiva_core::traits::vector::VectorIndexProvider;
use archiva_core::types::response::ApiEnvelope;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Unauthenticated. Reports reachability of the database, the cache, and
/// the vector index; a failing dependency degrades the status rather
/// than failing the endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiEnvelope<HealthResponse>> {
    let database = archiva_database::connection::health_check(&state.db_pool)
        .await
        .unwrap_or(false);
    let cache = state.cache.health_check().await.unwrap_or(false);
    let vector_index = state.vector.health_check().await.unwrap_or(false);

    let status = if database && cache && vector_index {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiEnvelope::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        cache,
        vector_index,
    }))
}
