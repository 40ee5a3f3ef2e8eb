//! Document registration, moves, record updates, and deletion.

pub mod service;

pub use service::DocumentService;
