//! Academic-record detail rows attached to a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::status::EntityStatus;

/// An academic-record entry extracted from a document.
///
/// These are the editable metadata of an otherwise immutable document.
/// They soft-delete together with their parent document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AcademicRecord {
    /// Unique record identifier.
    pub id: i64,
    /// The document this record belongs to.
    pub document_id: i64,
    /// Student full name.
    pub student_name: Option<String>,
    /// Institutional student code.
    pub student_code: Option<String>,
    /// Academic period (e.g. `"2021-II"`).
    pub period: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Soft-deletion status.
    pub status: EntityStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to an academic record. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcademicRecordPatch {
    /// New student name.
    pub student_name: Option<String>,
    /// New student code.
    pub student_code: Option<String>,
    /// New academic period.
    pub period: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

impl AcademicRecordPatch {
    /// Check whether the patch changes anything.
    pub fn is_empty(&self) -> bool {
        self.student_name.is_none()
            && self.student_code.is_none()
            && self.period.is_none()
            && self.notes.is_none()
    }
}
