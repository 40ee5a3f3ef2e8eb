//! Folder CRUD, cascading mutations, and merged child listings.

use std::sync::Arc;

use tracing::{info, warn};

use archiva_cache::{CacheManager, keys};
use archiva_core::error::AppError;
use archiva_core::result::AppResult;
use archiva_core::traits::cache::CacheProvider;
use archiva_core::types::{PageRequest, PageResponse};
use archiva_database::repositories::document::DocumentRepository;
use archiva_database::repositories::folder::{CascadeOutcome, FolderRepository};
use archiva_entity::ChildEntry;
use archiva_entity::folder::{CreateFolder, Folder, child_path};

use crate::context::RequestContext;

/// Minimum folder name length after trimming.
const MIN_NAME_LEN: usize = 3;
/// Maximum folder name length after trimming.
const MAX_NAME_LEN: usize = 20;

/// Manages folder CRUD and the cascading mutations of the tree.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Document repository (for merged listings and emptiness checks).
    document_repo: Arc<DocumentRepository>,
    /// Cache for ancestor-chain invalidation.
    cache: Arc<CacheManager>,
}

/// Input for creating a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderInput {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for a root folder).
    pub parent_id: Option<i64>,
    /// Program scope. `None` falls back to the caller's program when they
    /// belong to exactly one, otherwise the folder is unscoped.
    pub program_id: Option<i64>,
}

/// Validates and normalizes a folder name.
///
/// Names are trimmed, must be 3–20 characters long, and must not contain
/// a path separator, which would corrupt materialized paths.
pub fn validate_folder_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "Folder name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
        )));
    }
    if trimmed.contains('/') {
        return Err(AppError::validation("Folder name must not contain '/'"));
    }
    Ok(trimmed.to_string())
}

/// Resolves the program scope for a new folder.
///
/// An explicit program id must belong to the caller's program set.
/// Without one, a caller in exactly one program scopes the folder to
/// it; a caller in several leaves it unscoped.
pub fn resolve_program_scope(
    ctx: &RequestContext,
    requested: Option<i64>,
) -> AppResult<Option<i64>> {
    match requested {
        Some(program_id) if ctx.program_ids.contains(&program_id) => Ok(Some(program_id)),
        Some(_) => Err(AppError::forbidden(
            "Cannot scope a folder to a program you do not belong to",
        )),
        None => Ok(ctx.single_program()),
    }
}

impl FolderService {
    /// Creates a new folder service.
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

    /// Gets an active folder visible to the caller.
    ///
    /// Folders scoped to a program the caller does not belong to are
    /// reported as not found, never as forbidden: their existence is not
    /// disclosed.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: i64) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .find_active_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        if !folder.visible_to(&ctx.program_ids) {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        Ok(folder)
    }

    /// Lists active root folders visible to the caller, paginated.
    pub async fn list_roots(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Folder>> {
        let total = self.folder_repo.count_roots(&ctx.program_ids).await?;
        let items = self
            .folder_repo
            .list_roots(&ctx.program_ids, page.offset(), page.limit())
            .await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Lists the children of a folder as one merged, paginated sequence:
    /// subfolders first, then documents, each ordered by name.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        folder_id: i64,
        page: PageRequest,
    ) -> AppResult<PageResponse<ChildEntry>> {
        self.get_folder(ctx, folder_id).await?;

        let folder_total = self
            .folder_repo
            .count_children(folder_id, &ctx.program_ids)
            .await?;
        let document_total = self.document_repo.count_in_folder(folder_id).await?;

        let ((folder_offset, folder_limit), (doc_offset, doc_limit)) =
            page.split_window(folder_total);

        let mut entries = Vec::with_capacity(page.page_size as usize);
        if folder_limit > 0 {
            let folders = self
                .folder_repo
                .list_children(folder_id, &ctx.program_ids, folder_offset, folder_limit)
                .await?;
            entries.extend(folders.into_iter().map(ChildEntry::Folder));
        }
        if doc_limit > 0 {
            let documents = self
                .document_repo
                .list_in_folder(folder_id, doc_offset, doc_limit)
                .await?;
            entries.extend(documents.into_iter().map(ChildEntry::Document));
        }

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            folder_total + document_total,
        ))
    }

    /// Creates a new folder under the given parent (or at the root).
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        input: CreateFolderInput,
    ) -> AppResult<Folder> {
        let name = validate_folder_name(&input.name)?;

        let parent_path = match input.parent_id {
            Some(parent_id) => {
                let parent = self.get_folder(ctx, parent_id).await?;
                Some(parent.path)
            }
            None => None,
        };

        let program_id = resolve_program_scope(ctx, input.program_id)?;
        let path = child_path(parent_path.as_deref(), &name);

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name,
                parent_id: input.parent_id,
                program_id,
                path,
            })
            .await?;

        info!(
            subject = %ctx.subject,
            folder_id = folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder, recomputing the materialized path of the whole
    /// subtree atomically.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: i64,
        new_name: &str,
    ) -> AppResult<Folder> {
        let name = validate_folder_name(new_name)?;
        self.get_folder(ctx, folder_id).await?;

        let outcome = self.folder_repo.rename_cascade(folder_id, &name).await?;
        self.invalidate_chains(&outcome).await;

        info!(
            subject = %ctx.subject,
            folder_id,
            new_name = %name,
            affected = outcome.affected_ids.len(),
            "Folder renamed"
        );

        Ok(outcome.folder)
    }

    /// Moves a folder under a new parent (or to the root), recomputing
    /// the subtree's materialized paths atomically.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: i64,
        new_parent_id: Option<i64>,
    ) -> AppResult<Folder> {
        self.get_folder(ctx, folder_id).await?;
        if let Some(parent_id) = new_parent_id {
            self.get_folder(ctx, parent_id).await?;
        }

        let outcome = self.folder_repo.move_cascade(folder_id, new_parent_id).await?;
        self.invalidate_chains(&outcome).await;

        info!(
            subject = %ctx.subject,
            folder_id,
            new_parent_id,
            affected = outcome.affected_ids.len(),
            "Folder moved"
        );

        Ok(outcome.folder)
    }

    /// Soft-deletes an empty folder.
    ///
    /// A folder with any live subfolder or document is rejected with a
    /// conflict; the contents must be removed first.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: i64) -> AppResult<Folder> {
        self.get_folder(ctx, folder_id).await?;

        let live_folders = self.folder_repo.count_live_children(folder_id).await?;
        let live_documents = self.document_repo.count_in_folder(folder_id).await?;
        if live_folders + live_documents > 0 {
            return Err(AppError::conflict(
                "Folder is not empty; delete its contents first",
            ));
        }

        let folder = self.folder_repo.soft_delete(folder_id).await?;

        if let Err(e) = self.cache.delete(&keys::ancestors_of_folder(folder_id)).await {
            warn!(folder_id, error = %e, "Failed to invalidate ancestor-chain cache");
        }

        info!(subject = %ctx.subject, folder_id, path = %folder.path, "Folder deleted");

        Ok(folder)
    }

    /// Drops the cached ancestor chain of every folder touched by a
    /// cascade. Best-effort: stale entries expire on their own.
    async fn invalidate_chains(&self, outcome: &CascadeOutcome) {
        for id in &outcome.affected_ids {
            if let Err(e) = self.cache.delete(&keys::ancestors_of_folder(*id)).await {
                warn!(folder_id = id, error = %e, "Failed to invalidate ancestor-chain cache");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archiva_core::error::ErrorKind;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_folder_name("  Actas  ").unwrap(), "Actas");
    }

    #[test]
    fn name_length_is_enforced() {
        assert!(validate_folder_name("ab").is_err());
        assert!(validate_folder_name("abc").is_ok());
        assert!(validate_folder_name(&"x".repeat(20)).is_ok());
        assert!(validate_folder_name(&"x".repeat(21)).is_err());
    }

    #[test]
    fn name_rejects_path_separator() {
        assert!(validate_folder_name("a/b/c").is_err());
    }

    fn ctx(programs: Vec<i64>) -> RequestContext {
        RequestContext::new("user-1".to_string(), "user".to_string(), programs)
    }

    #[test]
    fn explicit_scope_must_be_one_of_the_callers_programs() {
        let err = resolve_program_scope(&ctx(vec![3]), Some(7)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert_eq!(
            resolve_program_scope(&ctx(vec![3, 7]), Some(7)).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn scope_defaults_to_the_single_program() {
        assert_eq!(resolve_program_scope(&ctx(vec![4]), None).unwrap(), Some(4));
        assert_eq!(resolve_program_scope(&ctx(vec![4, 5]), None).unwrap(), None);
        assert_eq!(resolve_program_scope(&ctx(vec![]), None).unwrap(), None);
    }
}
