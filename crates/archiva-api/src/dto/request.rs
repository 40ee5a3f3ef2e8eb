//! Request DTOs with validation.
//!
//! The folder endpoints keep the legacy client's Spanish wire field
//! names (`Nombre`, `IdCarpetaPadre`); the registration and record
//! endpoints are consumed by the upload pipeline and use snake_case.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use archiva_entity::document::AcademicRecordPatch;

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[serde(rename = "Nombre")]
    #[validate(length(min = 3, max = 20, message = "Nombre must be 3-20 characters"))]
    pub nombre: String,
    /// Parent folder ID (absent for a root folder).
    #[serde(rename = "IdCarpetaPadre", default)]
    pub parent_id: Option<i64>,
    /// Program scope (absent for an unscoped folder).
    #[serde(rename = "IdPrograma", default)]
    pub program_id: Option<i64>,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[serde(rename = "Nombre")]
    #[validate(length(min = 3, max = 20, message = "Nombre must be 3-20 characters"))]
    pub nombre: String,
}

/// Move folder request. A null (or absent) parent detaches to the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder ID.
    #[serde(rename = "IdCarpetaPadre", default)]
    pub parent_id: Option<i64>,
}

/// Move document request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDocumentRequest {
    /// Target folder ID.
    #[serde(rename = "IdCarpetaPadre")]
    pub folder_id: i64,
}

/// Document registration request, sent by the upload pipeline once the
/// blob is stored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDocumentRequest {
    /// Folder to place the document in.
    pub folder_id: i64,
    /// Document name including extension.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Blob store key.
    pub blob_key: Uuid,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Validation workflow tag.
    #[serde(default)]
    pub validation_status: Option<String>,
    /// Academic-record fields captured at upload time.
    #[serde(default)]
    pub record: Option<UpdateRecordRequest>,
}

/// Academic-record update request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    /// Student full name.
    pub student_name: Option<String>,
    /// Institutional student code.
    pub student_code: Option<String>,
    /// Academic period.
    pub period: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl From<UpdateRecordRequest> for AcademicRecordPatch {
    fn from(req: UpdateRecordRequest) -> Self {
        Self {
            student_name: req.student_name,
            student_code: req.student_code,
            period: req.period,
            notes: req.notes,
        }
    }
}
