use thiserror::Error;

use crate::domain::validate::MAX_DEPTH;

/// Caller-facing failures raised by the category service.
///
/// Every structural violation gets its own variant so callers can present a
/// specific corrective message; store-level failures are logged where they
/// occur and surfaced as [`ServiceError::Internal`], never conflated with
/// validation outcomes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Another category already owns this slug.
    #[error("a category with slug '{0}' already exists")]
    DuplicateSlug(String),
    /// A sibling already carries this name (case-insensitively).
    #[error("a category named '{0}' already exists under the same parent")]
    DuplicateNameUnderParent(String),
    /// The placement would exceed the maximum nesting depth.
    #[error("category nesting is limited to {} levels", MAX_DEPTH + 1)]
    DepthExceeded,
    /// The move would make a category its own ancestor.
    #[error("a category cannot be moved under itself or one of its descendants")]
    CycleDetected,
    /// A referenced category (self, parent or reassignment target) does not
    /// exist.
    #[error("category not found")]
    CategoryNotFound,
    /// Delete was attempted without a reassignment target while posts are
    /// still attached.
    #[error("category still has posts attached; supply a reassignment target")]
    HasAttachedContent,
    /// Raw input failed form validation before reaching the engine.
    #[error("{0}")]
    Form(String),
    /// An unexpected store-level failure; details are in the log.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
