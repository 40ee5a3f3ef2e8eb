//! Tagged union for merged folder+document listings.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::folder::Folder;

/// One entry of a merged child listing.
///
/// Listings present folders first, then documents, each ordered by name
/// ascending (ties broken by id). The tag makes the merged page type-safe
/// for clients instead of a duck-typed array of dissimilar objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum ChildEntry {
    /// An internal node.
    Folder(Folder),
    /// A leaf node.
    Document(Document),
}

impl ChildEntry {
    /// The display name of the entry.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Document(d) => &d.name,
        }
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}
