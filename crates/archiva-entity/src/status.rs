//! Soft-deletion status enumeration shared by folders, documents, and
//! academic records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a soft-deletable entity.
///
/// Rows are never physically removed; queries over live data filter on
/// `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entity_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// Visible to queries and mutations.
    Active,
    /// Hidden from active queries; the row remains for audit purposes.
    Deleted,
}

impl EntityStatus {
    /// Check whether the entity is live.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
