//! HTTP request handlers, organized by domain.

pub mod ancestors;
pub mod file;
pub mod folder;
pub mod health;
