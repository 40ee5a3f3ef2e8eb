//! Shared test helpers for integration tests.
//!
//! These tests require a running PostgreSQL reachable through
//! `tests/fixtures/test_config.toml` and are `#[ignore]`d by default.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use archiva_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config =
            AppConfig::load("tests/fixtures/test_config.toml").expect("Failed to load test config");

        let db_pool = archiva_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        archiva_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = archiva_api::app::build_state(config.clone(), db_pool.clone())
            .await
            .expect("Failed to build app state");
        let router = archiva_api::router::build_router(state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        for table in ["academic_records", "documents", "folders"] {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Issue an identity-provider token for the given program scope
    pub fn token_for(&self, subject: &str, programs: &[i64]) -> String {
        let claims = json!({
            "sub": subject,
            "name": subject,
            "programs": programs,
            "iss": self.config.auth.issuer,
            "iat": jsonwebtoken::get_current_timestamp(),
            "exp": jsonwebtoken::get_current_timestamp() + 3600,
        });

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.auth.token_secret.as_bytes()),
        )
        .expect("Failed to sign test token")
    }

    /// Create a folder through the API and return its id
    pub async fn create_folder(
        &self,
        token: &str,
        name: &str,
        parent_id: Option<i64>,
    ) -> i64 {
        let body = json!({ "Nombre": name, "IdCarpetaPadre": parent_id });
        let response = self.request("POST", "/folders", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Folder create failed: {:?}",
            response.body
        );
        response.body["data"]["id"].as_i64().expect("No folder id")
    }

    /// Register a document through the API and return its id
    pub async fn register_document(&self, token: &str, folder_id: i64, name: &str) -> i64 {
        let body = json!({
            "folder_id": folder_id,
            "name": name,
            "blob_key": Uuid::new_v4(),
            "size_bytes": 1024,
        });
        let response = self.request("POST", "/files", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Document register failed: {:?}",
            response.body
        );
        response.body["data"]["id"].as_i64().expect("No document id")
    }

    /// Fetch a folder's materialized path straight from the database
    pub async fn path_of(&self, folder_id: i64) -> String {
        sqlx::query_scalar("SELECT path FROM folders WHERE id = $1")
            .bind(folder_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Folder missing")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body was not JSON)
    pub body: Value,
}
