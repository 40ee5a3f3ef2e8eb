//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::status::EntityStatus;

/// A folder in the document hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: i64,
    /// Folder name (3–20 characters, enforced by the service layer).
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<i64>,
    /// Academic program this folder is restricted to.
    ///
    /// `None` means the folder is visible to every program.
    pub program_id: Option<i64>,
    /// Materialized path (e.g., `/Sistemas/2021`), slash-joined names
    /// from the root down to this folder, recomputed on every rename
    /// and move.
    pub path: String,
    /// Soft-deletion status.
    pub status: EntityStatus,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check whether the folder is visible to a caller limited to the
    /// given program ids. Unscoped folders are visible to everyone.
    pub fn visible_to(&self, program_ids: &[i64]) -> bool {
        match self.program_id {
            None => true,
            Some(pid) => program_ids.contains(&pid),
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<i64>,
    /// Program scoping (None for shared visibility).
    pub program_id: Option<i64>,
    /// Full materialized path.
    pub path: String,
}
