//! Folder management and ancestor-chain services.

pub mod ancestors;
pub mod service;

pub use ancestors::{AncestorEntry, AncestorService};
pub use service::FolderService;
