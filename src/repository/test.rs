use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::activity::{ActivityEntry, ActivityRecorder};
use crate::cache::CacheInvalidator;
use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::post::Post;
use crate::domain::types::CategoryId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, PostReader, PostWriter,
};

/// Simple in-memory repository used for unit tests.
///
/// Mutations mirror the Diesel implementation row for row so service tests
/// can assert on post-mutation tree state.
#[derive(Default)]
pub struct TestRepository {
    categories: RefCell<Vec<Category>>,
    posts: RefCell<Vec<Post>>,
    next_category_id: Cell<i32>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, posts: Vec<Post>) -> Self {
        let next_id = categories.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1;
        Self {
            categories: RefCell::new(categories),
            posts: RefCell::new(posts),
            next_category_id: Cell::new(next_id),
        }
    }

    /// Current state of a single category, if it still exists.
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Current state of all posts.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.borrow().clone()
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        let mut items = self.categories.borrow().clone();
        items.sort_by_key(|c| c.id);
        let total = items.len();
        if let Some(pagination) = &query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }
        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.category(id))
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.slug.as_str() == slug)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let id = self.next_category_id.get();
        self.next_category_id.set(id + 1);
        let created = Category {
            id: CategoryId::new(id).expect("generated id is positive"),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id,
            depth: category.depth,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        self.categories.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_category(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(0);
        };
        if let Some(name) = &changes.name {
            category.name = name.clone();
        }
        if let Some(slug) = &changes.slug {
            category.slug = slug.clone();
        }
        if let Some(description) = &changes.description {
            category.description = description.clone();
        }
        Ok(1)
    }

    fn move_category(
        &self,
        id: CategoryId,
        new_parent_id: Option<CategoryId>,
        new_depth: i32,
        descendant_depths: &[(CategoryId, i32)],
    ) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let mut affected = 0;
        if let Some(category) = categories.iter_mut().find(|c| c.id == id) {
            category.parent_id = new_parent_id;
            category.depth = new_depth;
            affected += 1;
        }
        for (descendant_id, depth) in descendant_depths {
            if let Some(category) = categories.iter_mut().find(|c| c.id == *descendant_id) {
                category.depth = *depth;
                affected += 1;
            }
        }
        Ok(affected)
    }

    fn delete_category(
        &self,
        id: CategoryId,
        reassign_posts_to: Option<CategoryId>,
    ) -> RepositoryResult<usize> {
        let mut categories = self.categories.borrow_mut();
        let Some(node) = categories.iter().find(|c| c.id == id).cloned() else {
            return Ok(0);
        };

        if let Some(target) = reassign_posts_to {
            for post in self.posts.borrow_mut().iter_mut() {
                if post.category_id == Some(id) {
                    post.category_id = Some(target);
                }
            }
        }

        for category in categories.iter_mut() {
            if category.parent_id == Some(id) {
                category.parent_id = node.parent_id;
                category.depth = node.depth;
            }
        }

        categories.retain(|c| c.id != id);
        Ok(1)
    }
}

impl PostReader for TestRepository {
    fn count_posts_by_category(&self, category_id: CategoryId) -> RepositoryResult<usize> {
        Ok(self
            .posts
            .borrow()
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .count())
    }

    fn count_posts_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<HashMap<CategoryId, usize>> {
        let mut counts = HashMap::new();
        for post in self.posts.borrow().iter() {
            if let Some(category_id) = post.category_id {
                if category_ids.contains(&category_id) {
                    *counts.entry(category_id).or_insert(0) += 1;
                }
            }
        }
        Ok(counts)
    }

    fn list_posts_by_categories(&self, category_ids: &[CategoryId]) -> RepositoryResult<Vec<Post>> {
        Ok(self
            .posts
            .borrow()
            .iter()
            .filter(|p| p.category_id.is_some_and(|id| category_ids.contains(&id)))
            .cloned()
            .collect())
    }
}

impl PostWriter for TestRepository {
    fn reassign_posts(&self, from: CategoryId, to: CategoryId) -> RepositoryResult<usize> {
        let mut moved = 0;
        for post in self.posts.borrow_mut().iter_mut() {
            if post.category_id == Some(from) {
                post.category_id = Some(to);
                moved += 1;
            }
        }
        Ok(moved)
    }
}

/// Cache fake remembering every invalidated pattern.
#[derive(Default)]
pub struct TestCache {
    patterns: RefCell<Vec<String>>,
}

impl TestCache {
    pub fn patterns(&self) -> Vec<String> {
        self.patterns.borrow().clone()
    }
}

impl CacheInvalidator for TestCache {
    fn invalidate_pattern(&self, pattern: &str) {
        self.patterns.borrow_mut().push(pattern.to_string());
    }
}

/// Activity fake remembering every recorded entry.
#[derive(Default)]
pub struct TestActivityLog {
    entries: RefCell<Vec<ActivityEntry>>,
}

impl TestActivityLog {
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.borrow().clone()
    }
}

impl ActivityRecorder for TestActivityLog {
    fn record(&self, entry: ActivityEntry) {
        self.entries.borrow_mut().push(entry);
    }
}
