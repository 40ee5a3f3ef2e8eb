//! Folder entity and materialized-path helpers.

pub mod model;
pub mod paths;

pub use model::{CreateFolder, Folder};
pub use paths::{PathNode, child_path, recompute_descendant_paths};
