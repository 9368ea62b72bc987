use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, CategorySlug};

/// Canonical category record in its flat, persisted shape.
///
/// The flat list is the source of truth for the taxonomy; nested views are
/// projections built by [`crate::domain::tree::build_tree`]. `depth` is
/// maintained by the service layer so that it always equals the length of the
/// node's ancestor chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub depth: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    /// Whether this category sits at the top of the taxonomy.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub depth: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Field edits applied by an update; `None` leaves the column untouched.
///
/// Structural changes (re-parenting) go through the move operation instead,
/// which is the only place depth is ever recomputed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChanges {
    pub name: Option<CategoryName>,
    pub slug: Option<CategorySlug>,
    pub description: Option<Option<String>>,
}
