//! Response DTOs.
//!
//! Entities serialize directly inside the success envelope; this module
//! only holds the shapes with no entity counterpart.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Database reachability.
    pub database: bool,
    /// Cache reachability.
    pub cache: bool,
    /// Vector-index reachability.
    pub vector_index: bool,
}
