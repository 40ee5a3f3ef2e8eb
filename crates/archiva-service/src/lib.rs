//! # archiva-service
//!
//! Business logic service layer for Archiva. Each service orchestrates
//! repositories, the cache, and the vector index to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod document;
pub mod folder;

pub use context::RequestContext;
pub use document::DocumentService;
pub use folder::{AncestorEntry, AncestorService, FolderService};
