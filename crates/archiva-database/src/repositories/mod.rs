//! Repository implementations, one per aggregate.

pub mod document;
pub mod folder;
pub mod record;

pub use document::DocumentRepository;
pub use folder::FolderRepository;
pub use record::AcademicRecordRepository;
