//! Category service operations.
//!
//! Every mutation follows the same transactional shape: load a snapshot of
//! the flat category list, validate the requested change against it with the
//! pure tree/validation functions, hand the repository one atomic write, then
//! notify the cache and audit collaborators. The snapshot is the only tree
//! state a mutation ever reasons about; nested views are never consulted.

use serde_json::json;

use crate::activity::{ActivityAction, ActivityEntry, ActivityRecorder};
use crate::cache::{CATEGORY_CACHE_PATTERN, CacheInvalidator};
use crate::domain::category::{Category, CategoryChanges};
use crate::domain::post::Post;
use crate::domain::tree;
use crate::domain::types::{CategoryId, UserId};
use crate::domain::validate;
use crate::dto::categories::{CategoryDto, CategoryTreeDto};
use crate::forms::categories::{
    CreateCategoryFormPayload, DeleteCategoryFormPayload, MoveCategoryFormPayload,
    UpdateCategoryFormPayload,
};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, PostReader,
};

use super::{ServiceError, ServiceResult};

/// Load the full flat category list the validators run against.
fn load_snapshot<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories(CategoryListQuery::new()) {
        Ok((_total, categories)) => Ok(categories),
        Err(e) => {
            log::error!("Failed to load category snapshot: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Sibling names collide when they are equal ignoring case.
fn names_collide(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn create_category<R, C, A>(
    payload: CreateCategoryFormPayload,
    actor: UserId,
    repo: &R,
    cache: &C,
    activity: &A,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
    C: CacheInvalidator + ?Sized,
    A: ActivityRecorder + ?Sized,
{
    let snapshot = load_snapshot(repo)?;

    if snapshot.iter().any(|c| c.slug == payload.slug) {
        return Err(ServiceError::DuplicateSlug(payload.slug.to_string()));
    }

    if let Some(parent_id) = payload.parent_id {
        if !snapshot.iter().any(|c| c.id == parent_id) {
            return Err(ServiceError::CategoryNotFound);
        }
    }

    if snapshot.iter().any(|c| {
        c.parent_id == payload.parent_id && names_collide(c.name.as_str(), payload.name.as_str())
    }) {
        return Err(ServiceError::DuplicateNameUnderParent(
            payload.name.to_string(),
        ));
    }

    if !validate::validate_depth(payload.parent_id, &snapshot) {
        return Err(ServiceError::DepthExceeded);
    }
    let depth = validate::calculate_depth(payload.parent_id, &snapshot);

    let created = match repo.create_category(&payload.into_new_category(depth)) {
        Ok(created) => created,
        Err(e) => {
            log::error!("Failed to create category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    cache.invalidate_pattern(CATEGORY_CACHE_PATTERN);
    activity.record(ActivityEntry::new(
        ActivityAction::CreateCategory,
        created.id,
        actor,
        None,
    ));

    Ok(created)
}

pub fn update_category<R, C, A>(
    payload: UpdateCategoryFormPayload,
    actor: UserId,
    repo: &R,
    cache: &C,
    activity: &A,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
    C: CacheInvalidator + ?Sized,
    A: ActivityRecorder + ?Sized,
{
    let snapshot = load_snapshot(repo)?;
    let node = snapshot
        .iter()
        .find(|c| c.id == payload.category_id)
        .ok_or(ServiceError::CategoryNotFound)?;

    if let Some(slug) = &payload.slug {
        if snapshot.iter().any(|c| c.id != node.id && &c.slug == slug) {
            return Err(ServiceError::DuplicateSlug(slug.to_string()));
        }
    }

    if snapshot.iter().any(|c| {
        c.id != node.id
            && c.parent_id == node.parent_id
            && names_collide(c.name.as_str(), payload.name.as_str())
    }) {
        return Err(ServiceError::DuplicateNameUnderParent(
            payload.name.to_string(),
        ));
    }

    // Field edits never touch depth or parent; moves own those.
    let changes = CategoryChanges {
        name: Some(payload.name),
        slug: payload.slug,
        description: Some(payload.description),
    };

    if let Err(e) = repo.update_category(payload.category_id, &changes) {
        log::error!("Failed to update category: {e}");
        return Err(ServiceError::Internal);
    }

    cache.invalidate_pattern(CATEGORY_CACHE_PATTERN);
    activity.record(ActivityEntry::new(
        ActivityAction::UpdateCategory,
        payload.category_id,
        actor,
        None,
    ));

    Ok(())
}

pub fn move_category<R, C, A>(
    payload: MoveCategoryFormPayload,
    actor: UserId,
    repo: &R,
    cache: &C,
    activity: &A,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
    C: CacheInvalidator + ?Sized,
    A: ActivityRecorder + ?Sized,
{
    let snapshot = load_snapshot(repo)?;
    let node = snapshot
        .iter()
        .find(|c| c.id == payload.category_id)
        .cloned()
        .ok_or(ServiceError::CategoryNotFound)?;

    if let Some(parent_id) = payload.new_parent_id {
        if !snapshot.iter().any(|c| c.id == parent_id) {
            return Err(ServiceError::CategoryNotFound);
        }
    }

    if !validate::validate_no_cycle(node.id, payload.new_parent_id, &snapshot) {
        return Err(ServiceError::CycleDetected);
    }

    if !validate::validate_depth(payload.new_parent_id, &snapshot) {
        return Err(ServiceError::DepthExceeded);
    }

    if snapshot.iter().any(|c| {
        c.id != node.id
            && c.parent_id == payload.new_parent_id
            && names_collide(c.name.as_str(), node.name.as_str())
    }) {
        return Err(ServiceError::DuplicateNameUnderParent(node.name.to_string()));
    }

    let new_depth = validate::calculate_depth(payload.new_parent_id, &snapshot);
    let delta = new_depth - node.depth;
    // The subtree keeps its internal shape; every descendant shifts by the
    // same delta as the moved node.
    let descendant_depths: Vec<(CategoryId, i32)> = tree::descendants(node.id, &snapshot)
        .iter()
        .map(|c| (c.id, c.depth + delta))
        .collect();

    if let Err(e) = repo.move_category(
        node.id,
        payload.new_parent_id,
        new_depth,
        &descendant_depths,
    ) {
        log::error!("Failed to move category: {e}");
        return Err(ServiceError::Internal);
    }

    cache.invalidate_pattern(CATEGORY_CACHE_PATTERN);
    activity.record(ActivityEntry::new(
        ActivityAction::UpdateCategory,
        node.id,
        actor,
        Some(json!({
            "action": "move",
            "new_parent_id": payload.new_parent_id.map(CategoryId::get),
        })),
    ));

    Ok(())
}

pub fn delete_category<R, C, A>(
    payload: DeleteCategoryFormPayload,
    actor: UserId,
    repo: &R,
    cache: &C,
    activity: &A,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + PostReader,
    C: CacheInvalidator + ?Sized,
    A: ActivityRecorder + ?Sized,
{
    let snapshot = load_snapshot(repo)?;
    if !snapshot.iter().any(|c| c.id == payload.category_id) {
        return Err(ServiceError::CategoryNotFound);
    }

    let attached = match repo.count_posts_by_category(payload.category_id) {
        Ok(count) => count,
        Err(e) => {
            log::error!("Failed to count posts for category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if attached > 0 && payload.reassign_to.is_none() {
        return Err(ServiceError::HasAttachedContent);
    }

    if let Some(target) = payload.reassign_to {
        // The target has to survive the delete, so the node itself does not
        // qualify.
        if target == payload.category_id || !snapshot.iter().any(|c| c.id == target) {
            return Err(ServiceError::CategoryNotFound);
        }
    }

    if let Err(e) = repo.delete_category(payload.category_id, payload.reassign_to) {
        log::error!("Failed to delete category: {e}");
        return Err(ServiceError::Internal);
    }

    cache.invalidate_pattern(CATEGORY_CACHE_PATTERN);
    activity.record(ActivityEntry::new(
        ActivityAction::DeleteCategory,
        payload.category_id,
        actor,
        None,
    ));

    Ok(())
}

/// Direct children of `parent_id` (roots when `None`), each annotated with
/// the number of posts attached to it directly. Descendant posts are never
/// included.
pub fn children_with_post_counts<R>(
    parent_id: Option<CategoryId>,
    repo: &R,
) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader + PostReader,
{
    let snapshot = load_snapshot(repo)?;

    if let Some(parent_id) = parent_id {
        if !snapshot.iter().any(|c| c.id == parent_id) {
            return Err(ServiceError::CategoryNotFound);
        }
    }

    let children: Vec<&Category> = snapshot
        .iter()
        .filter(|c| c.parent_id == parent_id)
        .collect();
    let ids: Vec<CategoryId> = children.iter().map(|c| c.id).collect();

    let counts = match repo.count_posts_by_categories(&ids) {
        Ok(counts) => counts,
        Err(e) => {
            log::error!("Failed to count posts per category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(children
        .into_iter()
        .map(|c| {
            let count = counts.get(&c.id).copied().unwrap_or(0);
            CategoryDto::from(c.clone()).with_post_count(count)
        })
        .collect())
}

/// Posts attached to `id`, optionally including every post attached anywhere
/// in its subtree.
pub fn posts_in_category<R>(
    id: CategoryId,
    include_descendants: bool,
    repo: &R,
) -> ServiceResult<Vec<Post>>
where
    R: CategoryReader + PostReader,
{
    let snapshot = load_snapshot(repo)?;
    if !snapshot.iter().any(|c| c.id == id) {
        return Err(ServiceError::CategoryNotFound);
    }

    let mut ids = vec![id];
    if include_descendants {
        ids.extend(tree::descendants(id, &snapshot).iter().map(|c| c.id));
    }

    match repo.list_posts_by_categories(&ids) {
        Ok(posts) => Ok(posts),
        Err(e) => {
            log::error!("Failed to list posts for categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Case-insensitive name availability across the whole taxonomy, optionally
/// ignoring one category (when validating an edit against itself).
pub fn is_name_unique<R>(
    name: &str,
    exclude_id: Option<CategoryId>,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryReader,
{
    let snapshot = load_snapshot(repo)?;
    Ok(!snapshot
        .iter()
        .filter(|c| exclude_id != Some(c.id))
        .any(|c| names_collide(c.name.as_str(), name)))
}

/// The full taxonomy as nested trees, for tree-shaped listings.
pub fn category_tree<R>(repo: &R) -> ServiceResult<Vec<CategoryTreeDto>>
where
    R: CategoryReader,
{
    let snapshot = load_snapshot(repo)?;
    Ok(tree::build_tree(&snapshot)
        .into_iter()
        .map(CategoryTreeDto::from)
        .collect())
}
