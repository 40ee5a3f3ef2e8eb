//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::status::EntityStatus;

/// A document (leaf node) in the content tree.
///
/// The binary content lives in the external blob store; this row holds
/// only metadata and the opaque blob key. Content is immutable once the
/// record exists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: i64,
    /// The folder containing this document. Must reference an active folder.
    pub folder_id: i64,
    /// Document name (including extension).
    pub name: String,
    /// Opaque key into the blob store. Unique and immutable once set.
    pub blob_key: Uuid,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Lowercase file extension, if any.
    pub extension: Option<String>,
    /// Free-form validation workflow tag (e.g. `"validado"`).
    pub validation_status: Option<String>,
    /// Soft-deletion status.
    pub status: EntityStatus,
    /// When the blob upload completed.
    pub uploaded_at: DateTime<Utc>,
    /// When the metadata was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Derive the lowercase extension from a file name.
    pub fn extension_of(name: &str) -> Option<String> {
        name.rsplit('.')
            .next()
            .filter(|ext| *ext != name && !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to register a document after a completed blob upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The folder to place the document in.
    pub folder_id: i64,
    /// Document name.
    pub name: String,
    /// Blob store key produced by the upload pipeline.
    pub blob_key: Uuid,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Validation workflow tag.
    pub validation_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(Document::extension_of("acta.PDF"), Some("pdf".to_string()));
        assert_eq!(
            Document::extension_of("notas.final.xlsx"),
            Some("xlsx".to_string())
        );
    }

    #[test]
    fn extensionless_names_yield_none() {
        assert_eq!(Document::extension_of("README"), None);
        assert_eq!(Document::extension_of("archive."), None);
    }
}
