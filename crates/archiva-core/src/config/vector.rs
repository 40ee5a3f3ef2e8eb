//! Vector index configuration.

use serde::{Deserialize, Serialize};

/// External vector-index configuration.
///
/// The vector store itself is an external collaborator; Archiva only
/// needs to remove a document's embedding entry when the document is
/// soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    /// Whether vector-index bookkeeping is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the vector store HTTP API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Collection holding document embeddings.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Optional API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            collection: default_collection(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:6333".to_string()
}

fn default_collection() -> String {
    "documents".to_string()
}

fn default_timeout() -> u64 {
    5
}
