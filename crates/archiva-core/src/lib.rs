//! # archiva-core
//!
//! Core crate for Archiva. Contains traits, configuration schemas,
//! pagination and response-envelope types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Archiva crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
