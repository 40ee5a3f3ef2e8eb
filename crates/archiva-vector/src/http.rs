//! HTTP client for the external vector store.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use archiva_core::config::vector::VectorIndexConfig;
use archiva_core::error::{AppError, ErrorKind};
use archiva_core::result::AppResult;
use archiva_core::traits::vector::VectorIndexProvider;

/// HTTP-backed vector-index provider.
///
/// Targets a Qdrant-compatible points API: deletes are issued as a
/// filtered points-delete against the configured collection.
#[derive(Debug, Clone)]
pub struct HttpVectorIndex {
    client: reqwest::Client,
    endpoint: String,
    collection: String,
    api_key: Option<String>,
}

impl HttpVectorIndex {
    /// Create a new client from configuration.
    pub fn new(config: &VectorIndexConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to build vector-index HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl VectorIndexProvider for HttpVectorIndex {
    async fn delete_document(&self, document_id: i64) -> AppResult<()> {
        let url = format!(
            "{}/collections/{}/points/delete",
            self.endpoint, self.collection
        );
        let body = json!({
            "filter": {
                "must": [
                    { "key": "document_id", "match": { "value": document_id } }
                ]
            }
        });

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Vector-index delete request failed",
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::new(
                ErrorKind::ExternalService,
                format!(
                    "Vector-index delete returned status {}",
                    response.status()
                ),
            ));
        }

        debug!(document_id, "Removed document from vector index");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let url = format!("{}/collections/{}", self.endpoint, self.collection);
        let response = self.authorize(self.client.get(&url)).send().await;

        match response {
            Ok(r) => Ok(r.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}
