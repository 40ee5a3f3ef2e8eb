//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;
pub mod server;
pub mod vector;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::cache::CacheConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::server::ServerConfig;
use self::vector::VectorIndexConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Identity-provider token validation settings.
    pub auth: AuthConfig,
    /// Vector index settings.
    #[serde(default)]
    pub vector_index: VectorIndexConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, an optional `ARCHIVA_ENV`
    /// overlay file, and `ARCHIVA__`-prefixed environment variables.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let env = std::env::var("ARCHIVA_ENV").unwrap_or_else(|_| "development".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(config::Environment::with_prefix("ARCHIVA").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
