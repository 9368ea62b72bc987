use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryId, CategoryName, CategorySlug, TypeConstraintError};

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, maps runs of non-alphanumeric characters to a single `-` and
/// trims the ends. Names without any usable character are rejected.
fn slugify(name: &str) -> Result<String, TypeConstraintError> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    if slug.is_empty() {
        return Err(TypeConstraintError::InvalidValue(format!(
            "cannot derive a slug from '{name}'"
        )));
    }
    Ok(slug)
}

fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[derive(Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryFormPayload {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
}

impl CreateCategoryFormPayload {
    /// Build the insertable record once the service has computed the depth.
    pub fn into_new_category(self, depth: i32) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            slug: self.slug,
            description: self.description,
            parent_id: self.parent_id,
            depth,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateCategoryFormError {
    #[error("Create category form validation failed: {0}")]
    Validation(String),
    #[error("Create category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryFormPayload {
    type Error = CreateCategoryFormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let slug = match value.slug.filter(|s| !s.trim().is_empty()) {
            Some(slug) => CategorySlug::new(slug)?,
            None => CategorySlug::new(slugify(&value.name)?)?,
        };

        Ok(Self {
            name: CategoryName::new(value.name)?,
            slug,
            description: normalize_description(value.description),
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: CategoryName,
    /// `None` keeps the stored slug.
    pub slug: Option<CategorySlug>,
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum UpdateCategoryFormError {
    #[error("Update category form validation failed: {0}")]
    Validation(String),
    #[error("Update category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = UpdateCategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let slug = value
            .slug
            .filter(|s| !s.trim().is_empty())
            .map(CategorySlug::new)
            .transpose()?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name: CategoryName::new(value.name)?,
            slug,
            description: normalize_description(value.description),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct MoveCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub new_parent_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveCategoryFormPayload {
    pub category_id: CategoryId,
    /// `None` moves the category to the root level.
    pub new_parent_id: Option<CategoryId>,
}

#[derive(Debug, Error)]
pub enum MoveCategoryFormError {
    #[error("Move category form validation failed: {0}")]
    Validation(String),
    #[error("Move category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for MoveCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for MoveCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<MoveCategoryForm> for MoveCategoryFormPayload {
    type Error = MoveCategoryFormError;

    fn try_from(value: MoveCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            new_parent_id: value.new_parent_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub reassign_to: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
    /// Category that inherits the posts of the deleted one, when supplied.
    pub reassign_to: Option<CategoryId>,
}

#[derive(Debug, Error)]
pub enum DeleteCategoryFormError {
    #[error("Delete category form validation failed: {0}")]
    Validation(String),
    #[error("Delete category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = DeleteCategoryFormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            reassign_to: value.reassign_to.map(CategoryId::new).transpose()?,
        })
    }
}
