//! Shared value types used across Archiva crates.

pub mod pagination;
pub mod response;

pub use pagination::{PageRequest, PageResponse};
