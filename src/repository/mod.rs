use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::post::Post;
use crate::domain::types::CategoryId;
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod post;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing categories.
///
/// The default query returns the entire flat list in id order, which is the
/// snapshot the service layer validates against.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Pagination parameters; `None` loads everything.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its globally unique slug (exact match).
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
///
/// Multi-row mutations (move, delete) run inside a single transaction so
/// partial tree states are never observable.
pub trait CategoryWriter {
    /// Persist a new category and return the stored row.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Apply field edits to a category; structural fields are untouched.
    fn update_category(&self, id: CategoryId, changes: &CategoryChanges)
    -> RepositoryResult<usize>;
    /// Re-parent a category and rewrite the depth of its whole subtree.
    ///
    /// `descendant_depths` carries the precomputed new depth for every
    /// descendant; their parent links are left unchanged.
    fn move_category(
        &self,
        id: CategoryId,
        new_parent_id: Option<CategoryId>,
        new_depth: i32,
        descendant_depths: &[(CategoryId, i32)],
    ) -> RepositoryResult<usize>;
    /// Delete a category, promoting its direct children to the deleted
    /// node's former parent and depth, optionally migrating attached posts
    /// to `reassign_posts_to` first. Returns the number of rows deleted.
    fn delete_category(
        &self,
        id: CategoryId,
        reassign_posts_to: Option<CategoryId>,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations against the content store.
pub trait PostReader {
    /// Number of posts directly attached to a category.
    fn count_posts_by_category(&self, category_id: CategoryId) -> RepositoryResult<usize>;
    /// Direct post counts for a set of categories, keyed by category id.
    /// Categories without posts are absent from the map.
    fn count_posts_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<HashMap<CategoryId, usize>>;
    /// All posts directly attached to any of the given categories.
    fn list_posts_by_categories(&self, category_ids: &[CategoryId]) -> RepositoryResult<Vec<Post>>;
}

/// Write operations against the content store.
pub trait PostWriter {
    /// Move every post attached to `from` onto `to`; returns the number of
    /// posts moved.
    fn reassign_posts(&self, from: CategoryId, to: CategoryId) -> RepositoryResult<usize>;
}
