//! Trait seams for pluggable infrastructure backends.

pub mod cache;
pub mod vector;

pub use cache::CacheProvider;
pub use vector::VectorIndexProvider;
