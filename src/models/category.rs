use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryChanges, NewCategory as DomainNewCategory,
};
use crate::domain::types::{CategoryName, CategorySlug, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub depth: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub depth: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update applied by field edits; `None` leaves the column alone.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangeset {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

impl From<&CategoryChanges> for CategoryChangeset {
    fn from(changes: &CategoryChanges) -> Self {
        Self {
            name: changes.name.clone().map(CategoryName::into_inner),
            slug: changes.slug.clone().map(CategorySlug::into_inner),
            description: changes.description.clone(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            slug: CategorySlug::new(category.slug)?,
            description: category.description,
            parent_id: category.parent_id.map(TryInto::try_into).transpose()?,
            depth: category.depth,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name: category.name.into_inner(),
            slug: category.slug.into_inner(),
            description: category.description,
            parent_id: category.parent_id.map(Into::into),
            depth: category.depth,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
