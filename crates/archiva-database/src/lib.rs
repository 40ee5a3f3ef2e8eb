//! # archiva-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Archiva entities. Cascading tree mutations
//! run inside a single transaction serialized by per-tree advisory locks.

pub mod connection;
pub mod migration;
pub mod repositories;
