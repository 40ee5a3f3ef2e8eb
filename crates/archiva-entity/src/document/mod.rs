//! Document entity and its academic-record detail rows.

pub mod model;
pub mod record;

pub use model::{CreateDocument, Document};
pub use record::{AcademicRecord, AcademicRecordPatch};
