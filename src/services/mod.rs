//! Service layer validating caller input before it reaches the repository.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod member;
pub mod seed;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Form error: {0}")]
    Form(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    /// Store failures are passed through unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
