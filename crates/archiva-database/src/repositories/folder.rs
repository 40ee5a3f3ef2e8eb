//! Folder repository: CRUD, tree queries, and transactional cascades.
//!
//! Rename and move cascades run inside a single transaction that first
//! takes `pg_advisory_xact_lock` on the root ancestor of every affected
//! tree. Overlapping subtrees share a root ancestor, so their cascades
//! serialize; the lock is released with the transaction.

use sqlx::{PgConnection, PgPool};

use archiva_core::error::{AppError, ErrorKind};
use archiva_core::result::AppResult;
use archiva_entity::folder::{CreateFolder, Folder, PathNode, child_path, recompute_descendant_paths};

/// Repository for folder CRUD and tree mutations.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

/// Outcome of a cascading mutation: the updated folder plus the ids of
/// every folder whose materialized path was touched (the folder itself
/// and all descendants). Callers use the ids for cache invalidation.
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    /// The folder after the mutation.
    pub folder: Folder,
    /// Every folder id whose path changed.
    pub affected_ids: Vec<i64>,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |e| AppError::with_source(ErrorKind::Database, context, e)
    }

    /// Find a folder by ID regardless of status.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_err("Failed to find folder"))
    }

    /// Find an active folder by ID.
    pub async fn find_active_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND status = 'active'")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_err("Failed to find folder"))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, program_id, path) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.program_id)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_err("Failed to create folder"))
    }

    /// Count active root folders visible to the given programs.
    pub async fn count_roots(&self, program_ids: &[i64]) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folders \
             WHERE parent_id IS NULL AND status = 'active' \
               AND (program_id IS NULL OR program_id = ANY($1))",
        )
        .bind(program_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_err("Failed to count root folders"))?;
        Ok(count as u64)
    }

    /// List active root folders visible to the given programs, ordered by
    /// name then id.
    pub async fn list_roots(
        &self,
        program_ids: &[i64],
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE parent_id IS NULL AND status = 'active' \
               AND (program_id IS NULL OR program_id = ANY($1)) \
             ORDER BY name ASC, id ASC LIMIT $2 OFFSET $3",
        )
        .bind(program_ids)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err("Failed to list root folders"))
    }

    /// Count active child folders visible to the given programs.
    pub async fn count_children(&self, parent_id: i64, program_ids: &[i64]) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folders \
             WHERE parent_id = $1 AND status = 'active' \
               AND (program_id IS NULL OR program_id = ANY($2))",
        )
        .bind(parent_id)
        .bind(program_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_err("Failed to count children"))?;
        Ok(count as u64)
    }

    /// List active child folders visible to the given programs, ordered by
    /// name then id.
    pub async fn list_children(
        &self,
        parent_id: i64,
        program_ids: &[i64],
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE parent_id = $1 AND status = 'active' \
               AND (program_id IS NULL OR program_id = ANY($2)) \
             ORDER BY name ASC, id ASC LIMIT $3 OFFSET $4",
        )
        .bind(parent_id)
        .bind(program_ids)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::db_err("Failed to list children"))
    }

    /// Count active child folders regardless of program scoping.
    ///
    /// Used by the delete-blocking check: a folder with any live child,
    /// visible to the caller or not, must not be deleted.
    pub async fn count_live_children(&self, parent_id: i64) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folders WHERE parent_id = $1 AND status = 'active'",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_err("Failed to count children"))?;
        Ok(count as u64)
    }

    /// Rename a folder and recompute the materialized path of every
    /// descendant, atomically.
    pub async fn rename_cascade(&self, folder_id: i64, new_name: &str) -> AppResult<CascadeOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(Self::db_err("Failed to begin transaction"))?;

        Self::lock_subtrees(&mut tx, &[folder_id]).await?;

        // Reload under the lock; the folder may have moved or been
        // deleted while we waited.
        let folder = Self::fetch_active(&mut tx, folder_id).await?;
        let parent_path = Self::parent_path(&mut tx, folder.parent_id).await?;
        let new_path = child_path(parent_path.as_deref(), new_name);

        let updated = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, path = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(folder_id)
        .bind(new_name)
        .bind(&new_path)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::db_err("Failed to rename folder"))?;

        let mut affected_ids = Self::cascade_paths(&mut tx, folder_id, &new_path).await?;
        affected_ids.push(folder_id);

        tx.commit()
            .await
            .map_err(Self::db_err("Failed to commit rename"))?;

        Ok(CascadeOutcome {
            folder: updated,
            affected_ids,
        })
    }

    /// Move a folder under a new parent (or to the root) and recompute
    /// descendant paths, atomically.
    ///
    /// Fails with a conflict when the destination is the folder itself or
    /// one of its descendants, before any row is written.
    pub async fn move_cascade(
        &self,
        folder_id: i64,
        new_parent_id: Option<i64>,
    ) -> AppResult<CascadeOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(Self::db_err("Failed to begin transaction"))?;

        // Lock both the source tree and the destination tree.
        let mut ids = vec![folder_id];
        if let Some(parent_id) = new_parent_id {
            ids.push(parent_id);
        }
        Self::lock_subtrees(&mut tx, &ids).await?;

        let folder = Self::fetch_active(&mut tx, folder_id).await?;

        let new_parent_path = match new_parent_id {
            Some(parent_id) => {
                if parent_id == folder_id {
                    return Err(AppError::conflict("Cannot move a folder into itself"));
                }
                let parent = Self::fetch_active(&mut tx, parent_id).await?;

                let ancestors = Self::ancestry_ids(&mut tx, parent_id).await?;
                if ancestors.contains(&folder_id) {
                    return Err(AppError::conflict(
                        "Cannot move a folder into one of its descendants",
                    ));
                }
                Some(parent.path)
            }
            None => None,
        };

        let new_path = child_path(new_parent_path.as_deref(), &folder.name);

        let updated = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2, path = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(folder_id)
        .bind(new_parent_id)
        .bind(&new_path)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::db_err("Failed to move folder"))?;

        let mut affected_ids = Self::cascade_paths(&mut tx, folder_id, &new_path).await?;
        affected_ids.push(folder_id);

        tx.commit()
            .await
            .map_err(Self::db_err("Failed to commit move"))?;

        Ok(CascadeOutcome {
            folder: updated,
            affected_ids,
        })
    }

    /// Soft-delete a folder. The caller is responsible for the emptiness
    /// check; this only flips the status.
    pub async fn soft_delete(&self, folder_id: i64) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET status = 'deleted', updated_at = NOW() \
             WHERE id = $1 AND status = 'active' RETURNING *",
        )
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_err("Failed to delete folder"))?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    // ── Transaction-scoped helpers ─────────────────────────────

    /// Walk parent pointers to the root of the tree containing `folder_id`.
    ///
    /// A broken chain falls back to the folder itself, which still yields
    /// a stable lock key for that fragment.
    async fn tree_root_id(conn: &mut PgConnection, folder_id: i64) -> AppResult<i64> {
        let root: Option<i64> = sqlx::query_scalar(
            "WITH RECURSIVE up AS ( \
                SELECT id, parent_id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.parent_id FROM folders f JOIN up u ON f.id = u.parent_id \
             ) SELECT id FROM up WHERE parent_id IS NULL",
        )
        .bind(folder_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Self::db_err("Failed to resolve tree root"))?;

        Ok(root.unwrap_or(folder_id))
    }

    /// Take advisory transaction locks on the trees containing the
    /// given folders, in ascending root-id order so concurrent cascades
    /// cannot deadlock.
    ///
    /// A root resolved before its lock is granted can be stale: a
    /// concurrent move may re-parent the subtree while we wait. After
    /// locking, re-resolve and lock again until the held roots match
    /// where the folders actually live. Advisory xact locks are
    /// re-entrant and held until commit, so re-locking is harmless.
    async fn lock_subtrees(conn: &mut PgConnection, folder_ids: &[i64]) -> AppResult<()> {
        let mut roots = Self::resolve_roots(conn, folder_ids).await?;
        loop {
            for root in &roots {
                sqlx::query("SELECT pg_advisory_xact_lock($1)")
                    .bind(root)
                    .execute(&mut *conn)
                    .await
                    .map_err(Self::db_err("Failed to lock folder tree"))?;
            }
            let current = Self::resolve_roots(conn, folder_ids).await?;
            if current == roots {
                return Ok(());
            }
            roots = current;
        }
    }

    /// Resolve the tree root of each folder, sorted and deduplicated.
    async fn resolve_roots(conn: &mut PgConnection, folder_ids: &[i64]) -> AppResult<Vec<i64>> {
        let mut roots = Vec::with_capacity(folder_ids.len());
        for folder_id in folder_ids {
            roots.push(Self::tree_root_id(conn, *folder_id).await?);
        }
        roots.sort_unstable();
        roots.dedup();
        Ok(roots)
    }

    async fn fetch_active(conn: &mut PgConnection, id: i64) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND status = 'active'")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Self::db_err("Failed to find folder"))?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Path of the parent folder, status notwithstanding: the path is
    /// structural and must stay consistent even under a soft-deleted
    /// ancestor.
    async fn parent_path(conn: &mut PgConnection, parent_id: Option<i64>) -> AppResult<Option<String>> {
        match parent_id {
            Some(id) => sqlx::query_scalar("SELECT path FROM folders WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(Self::db_err("Failed to resolve parent path")),
            None => Ok(None),
        }
    }

    /// Ids of `folder_id` and all its ancestors up to the root.
    async fn ancestry_ids(conn: &mut PgConnection, folder_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar(
            "WITH RECURSIVE up AS ( \
                SELECT id, parent_id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.parent_id FROM folders f JOIN up u ON f.id = u.parent_id \
             ) SELECT id FROM up",
        )
        .bind(folder_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(Self::db_err("Failed to resolve ancestry"))
    }

    /// Recompute and persist the path of every descendant of `folder_id`
    /// given its new path. Returns the affected descendant ids.
    async fn cascade_paths(
        conn: &mut PgConnection,
        folder_id: i64,
        new_path: &str,
    ) -> AppResult<Vec<i64>> {
        let rows: Vec<(i64, Option<i64>, String)> = sqlx::query_as(
            "WITH RECURSIVE tree AS ( \
                SELECT id, parent_id, name FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.parent_id, f.name FROM folders f JOIN tree t ON f.parent_id = t.id \
             ) SELECT id, parent_id, name FROM tree WHERE id != $1",
        )
        .bind(folder_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(Self::db_err("Failed to list descendants"))?;

        let descendants: Vec<PathNode> = rows
            .into_iter()
            .map(|(id, parent_id, name)| PathNode {
                id,
                parent_id,
                name,
            })
            .collect();

        let updates = recompute_descendant_paths(folder_id, new_path, &descendants);
        let mut affected = Vec::with_capacity(updates.len());

        for (id, path) in updates {
            sqlx::query("UPDATE folders SET path = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(&path)
                .execute(&mut *conn)
                .await
                .map_err(Self::db_err("Failed to update descendant path"))?;
            affected.push(id);
        }

        Ok(affected)
    }
}
