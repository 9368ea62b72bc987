//! Structural placement rules for the category tree.
//!
//! Pure predicates evaluated against a snapshot of the flat category list.
//! The service layer runs these before committing any mutation; they never
//! touch storage themselves.

use crate::domain::category::Category;
use crate::domain::tree;
use crate::domain::types::CategoryId;

/// Deepest allowed nesting level. Depth 0 is a root, so the taxonomy holds
/// three levels: root, child, grandchild.
pub const MAX_DEPTH: i32 = 2;

/// Depth a node would have when placed under `parent_id`.
///
/// `None` places the node at the root. A `parent_id` that does not resolve
/// against the snapshot also yields 0; callers that consider a dangling
/// reference an error must resolve the parent themselves before calling this.
pub fn calculate_depth(parent_id: Option<CategoryId>, flat: &[Category]) -> i32 {
    parent_id
        .and_then(|id| flat.iter().find(|c| c.id == id))
        .map(|parent| parent.depth + 1)
        .unwrap_or(0)
}

/// Whether a node placed under `parent_id` stays within [`MAX_DEPTH`].
///
/// Root placement is always valid; a parent already at [`MAX_DEPTH`] cannot
/// accept children.
pub fn validate_depth(parent_id: Option<CategoryId>, flat: &[Category]) -> bool {
    calculate_depth(parent_id, flat) <= MAX_DEPTH
}

/// Whether re-parenting `node_id` under `proposed_parent` keeps the tree
/// acyclic.
///
/// Self-parenting and moving a node beneath its own descendant are rejected.
/// Moving a node under one of its ancestors or under an unrelated node is
/// fine.
pub fn validate_no_cycle(
    node_id: CategoryId,
    proposed_parent: Option<CategoryId>,
    flat: &[Category],
) -> bool {
    let Some(parent_id) = proposed_parent else {
        return true;
    };
    if parent_id == node_id {
        return false;
    }
    !tree::descendants(node_id, flat)
        .iter()
        .any(|c| c.id == parent_id)
}
