use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::tree::CategoryTree;

/// Category as exposed to callers of the engine.
///
/// `post_count` is present only on count-annotated queries; plain listings
/// leave it out entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub depth: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<usize>,
}

impl CategoryDto {
    /// Annotate the DTO with a direct post count.
    pub fn with_post_count(mut self, count: usize) -> Self {
        self.post_count = Some(count);
        self
    }
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            description: value.description,
            parent_id: value.parent_id.map(Into::into),
            depth: value.depth,
            post_count: None,
        }
    }
}

/// Category with nested children, produced only by tree-shaped queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTreeDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub children: Vec<CategoryTreeDto>,
}

impl From<CategoryTree> for CategoryTreeDto {
    fn from(value: CategoryTree) -> Self {
        Self {
            category: CategoryDto::from(value.node),
            children: value.children.into_iter().map(Into::into).collect(),
        }
    }
}
