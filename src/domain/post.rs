use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, PostId, PostTitle};

/// A published content item as seen from the category engine.
///
/// Posts are owned by the content layer; the engine only reads them for
/// counting and listing, and rewrites `category_id` when posts are migrated
/// during a category delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: String,
    pub body: String,
    pub category_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
