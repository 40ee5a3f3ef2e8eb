//! Ancestor-chain resolution with cache-aside lookups.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use archiva_cache::{CacheManager, keys};
use archiva_core::error::AppError;
use archiva_core::result::AppResult;
use archiva_core::traits::cache::CacheProvider;
use archiva_database::repositories::document::DocumentRepository;
use archiva_database::repositories::folder::FolderRepository;
use archiva_entity::folder::Folder;

use crate::context::RequestContext;

/// One link of an ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorEntry {
    /// Folder id.
    pub id: i64,
    /// Folder name at the time the chain was resolved.
    pub name: String,
}

impl From<&Folder> for AncestorEntry {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
        }
    }
}

/// Resolves ancestor chains for folders and documents.
///
/// Chains are cached per folder; cache failures degrade to a database
/// walk and are only logged.
#[derive(Debug, Clone)]
pub struct AncestorService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Document repository (for document-rooted lookups).
    document_repo: Arc<DocumentRepository>,
    /// Chain cache.
    cache: Arc<CacheManager>,
}

impl AncestorService {
    /// Creates a new ancestor service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        document_repo: Arc<DocumentRepository>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            folder_repo,
            document_repo,
            cache,
        }
    }

    /// The chain of ancestors of a folder, root first, excluding the
    /// folder itself. A root folder yields an empty chain.
    pub async fn chain_of_folder(
        &self,
        ctx: &RequestContext,
        folder_id: i64,
    ) -> AppResult<Vec<AncestorEntry>> {
        let folder = self
            .folder_repo
            .find_active_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        if !folder.visible_to(&ctx.program_ids) {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        let key = keys::ancestors_of_folder(folder_id);
        match self.cache.get_json::<Vec<AncestorEntry>>(&key).await {
            Ok(Some(chain)) => return Ok(chain),
            Ok(None) => {}
            Err(e) => warn!(folder_id, error = %e, "Ancestor-chain cache read failed"),
        }

        let chain = self.walk_ancestors(&folder).await?;

        if let Err(e) = self.cache.set_json(&key, &chain).await {
            warn!(folder_id, error = %e, "Ancestor-chain cache write failed");
        }

        Ok(chain)
    }

    /// The chain of folders from the root down to (and including) the
    /// folder containing a document.
    pub async fn chain_of_document(
        &self,
        ctx: &RequestContext,
        document_id: i64,
    ) -> AppResult<Vec<AncestorEntry>> {
        let document = self
            .document_repo
            .find_active_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))?;

        let mut chain = self.chain_of_folder(ctx, document.folder_id).await?;

        // chain_of_folder has already established the folder is visible.
        if let Some(folder) = self.folder_repo.find_active_by_id(document.folder_id).await? {
            chain.push(AncestorEntry::from(&folder));
        }

        Ok(chain)
    }

    /// Walks parent pointers from the folder up to the root, returning
    /// the chain root first. A broken link ends the walk with a partial
    /// chain rather than an error; the tree repair is an offline concern.
    async fn walk_ancestors(&self, folder: &Folder) -> AppResult<Vec<AncestorEntry>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([folder.id]);
        let mut next = folder.parent_id;

        while let Some(parent_id) = next {
            if !seen.insert(parent_id) {
                warn!(folder_id = folder.id, parent_id, "Cycle detected in folder ancestry");
                break;
            }
            match self.folder_repo.find_by_id(parent_id).await? {
                Some(parent) => {
                    next = parent.parent_id;
                    chain.push(AncestorEntry::from(&parent));
                }
                None => {
                    warn!(
                        folder_id = folder.id,
                        missing_id = parent_id,
                        "Broken ancestor link; returning partial chain"
                    );
                    break;
                }
            }
        }

        chain.reverse();
        Ok(chain)
    }
}
