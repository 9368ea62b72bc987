//! Pure tree algorithms over the flat category list.
//!
//! Everything in this module is deterministic and side-effect free: callers
//! pass a snapshot of the persisted flat list and get projections back. The
//! nested [`CategoryTree`] shape is never authoritative; mutations always go
//! through the flat representation.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

/// A category with its nested children, as produced by [`build_tree`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub node: Category,
    pub children: Vec<CategoryTree>,
}

/// Group every node under its parent and return the root nodes.
///
/// Nodes referencing a parent id that is absent from the input are treated as
/// roots rather than dropped. Sibling order is the input order of the flat
/// list; every input node appears in the result exactly once.
pub fn build_tree(flat: &[Category]) -> Vec<CategoryTree> {
    let present: HashSet<CategoryId> = flat.iter().map(|c| c.id).collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut children_of: HashMap<CategoryId, Vec<usize>> = HashMap::new();
    for (index, category) in flat.iter().enumerate() {
        match category.parent_id.filter(|p| present.contains(p)) {
            Some(parent_id) => children_of.entry(parent_id).or_default().push(index),
            None => roots.push(index),
        }
    }

    fn assemble(
        index: usize,
        flat: &[Category],
        children_of: &HashMap<CategoryId, Vec<usize>>,
    ) -> CategoryTree {
        let node = flat[index].clone();
        let children = children_of
            .get(&node.id)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&child| assemble(child, flat, children_of))
                    .collect()
            })
            .unwrap_or_default();
        CategoryTree { node, children }
    }

    roots
        .into_iter()
        .map(|index| assemble(index, flat, &children_of))
        .collect()
}

/// Flatten nested trees back to a list via pre-order depth-first traversal.
///
/// Inverse of [`build_tree`] modulo ordering; the emitted nodes carry no
/// nesting information beyond their `parent_id`.
pub fn flatten_tree(trees: &[CategoryTree]) -> Vec<Category> {
    fn walk(tree: &CategoryTree, out: &mut Vec<Category>) {
        out.push(tree.node.clone());
        for child in &tree.children {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for tree in trees {
        walk(tree, &mut out);
    }
    out
}

/// Ancestors of `id`, ordered root first and excluding the node itself.
///
/// Returns an empty list for unknown ids and for roots. The walk is bounded
/// by the input length so a corrupt parent chain cannot loop forever.
pub fn ancestors(id: CategoryId, flat: &[Category]) -> Vec<&Category> {
    let mut chain = Vec::new();
    let mut current = flat.iter().find(|c| c.id == id);
    for _ in 0..flat.len() {
        let Some(parent_id) = current.and_then(|c| c.parent_id) else {
            break;
        };
        current = flat.iter().find(|c| c.id == parent_id);
        if let Some(parent) = current {
            chain.push(parent);
        }
    }
    chain.reverse();
    chain
}

/// Descendants of `id` in breadth-first order, excluding the node itself.
///
/// Levels are emitted top-down; within a level, nodes keep the input order of
/// the flat list.
pub fn descendants(id: CategoryId, flat: &[Category]) -> Vec<&Category> {
    let mut found = Vec::new();
    let mut frontier = vec![id];
    while !frontier.is_empty() {
        let level: Vec<&Category> = flat
            .iter()
            .filter(|c| c.parent_id.is_some_and(|p| frontier.contains(&p)))
            .collect();
        frontier = level.iter().map(|c| c.id).collect();
        found.extend(level);
    }
    found
}
