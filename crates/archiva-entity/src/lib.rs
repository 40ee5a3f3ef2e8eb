//! # archiva-entity
//!
//! Domain entity models for Archiva. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod document;
pub mod folder;
pub mod listing;
pub mod status;

pub use listing::ChildEntry;
pub use status::EntityStatus;
