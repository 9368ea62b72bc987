//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the `From` impls that bridge them live here instead.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{
    CreateCategoryFormError, DeleteCategoryFormError, MoveCategoryFormError,
    UpdateCategoryFormError,
};
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<CreateCategoryFormError> for ServiceError {
    fn from(val: CreateCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateCategoryFormError> for ServiceError {
    fn from(val: UpdateCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<MoveCategoryFormError> for ServiceError {
    fn from(val: MoveCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<DeleteCategoryFormError> for ServiceError {
    fn from(val: DeleteCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
