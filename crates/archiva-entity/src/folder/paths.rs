//! Materialized-path computation.
//!
//! Paths are always rebuilt from the parent-pointer chain, never by
//! substring replacement: replacing `/Sis` inside `/Sistemas/2021` would
//! corrupt siblings whose names share a prefix with the renamed folder.

use std::collections::HashMap;

/// Minimal view of a folder row needed for path recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    /// Folder id.
    pub id: i64,
    /// Parent folder id.
    pub parent_id: Option<i64>,
    /// Folder name.
    pub name: String,
}

/// Build the materialized path of a child under `parent_path`.
///
/// A `None` parent places the child at the root.
pub fn child_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}/{name}"),
        None => format!("/{name}"),
    }
}

/// Recompute the paths of every descendant of `root_id`, whose own new
/// path is `root_path`.
///
/// `descendants` is the flat subtree below `root_id` (any order). Each
/// returned pair is `(folder_id, new_path)`, emitted parents-first so the
/// caller can apply them in order. Nodes whose parent link points outside
/// the subtree are skipped; the caller's subtree query makes that
/// unreachable in practice.
pub fn recompute_descendant_paths(
    root_id: i64,
    root_path: &str,
    descendants: &[PathNode],
) -> Vec<(i64, String)> {
    let mut children_of: HashMap<i64, Vec<&PathNode>> = HashMap::new();
    for node in descendants {
        if let Some(parent_id) = node.parent_id {
            children_of.entry(parent_id).or_default().push(node);
        }
    }

    let mut result = Vec::with_capacity(descendants.len());
    let mut queue: Vec<(i64, String)> = vec![(root_id, root_path.to_string())];

    while let Some((parent_id, parent_path)) = queue.pop() {
        if let Some(children) = children_of.get(&parent_id) {
            for child in children {
                let path = child_path(Some(&parent_path), &child.name);
                result.push((child.id, path.clone()));
                queue.push((child.id, path));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, parent_id: i64, name: &str) -> PathNode {
        PathNode {
            id,
            parent_id: Some(parent_id),
            name: name.to_string(),
        }
    }

    #[test]
    fn child_path_joins_with_slash() {
        assert_eq!(child_path(None, "Sistemas"), "/Sistemas");
        assert_eq!(child_path(Some("/Sistemas"), "2021"), "/Sistemas/2021");
    }

    #[test]
    fn recomputes_whole_subtree() {
        // 1 -> {2 -> {4}, 3}
        let descendants = vec![node(2, 1, "a"), node(3, 1, "b"), node(4, 2, "c")];
        let mut updates = recompute_descendant_paths(1, "/renamed", &descendants);
        updates.sort_by_key(|(id, _)| *id);
        assert_eq!(
            updates,
            vec![
                (2, "/renamed/a".to_string()),
                (3, "/renamed/b".to_string()),
                (4, "/renamed/a/c".to_string()),
            ]
        );
    }

    #[test]
    fn prefix_sibling_names_are_untouched_by_design() {
        // "Sis" renamed; sibling subtree named "Sistemas" is not part of
        // the descendant set and therefore cannot be corrupted.
        let descendants = vec![node(2, 1, "2021")];
        let updates = recompute_descendant_paths(1, "/Redes", &descendants);
        assert_eq!(updates, vec![(2, "/Redes/2021".to_string())]);
    }

    #[test]
    fn empty_subtree_yields_no_updates() {
        assert!(recompute_descendant_paths(1, "/x", &[]).is_empty());
    }
}
