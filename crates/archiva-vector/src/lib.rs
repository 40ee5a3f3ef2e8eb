//! # archiva-vector
//!
//! Client for the external vector store holding document embeddings.
//! Semantic search itself is served elsewhere; Archiva only removes a
//! document's embedding entry when the document is soft-deleted, and
//! does so best-effort.

pub mod http;
pub mod noop;
pub mod provider;

pub use provider::VectorIndexManager;
