use thiserror::Error;

use crate::domain::tag::TagPolicyError;
use crate::repository::errors::RepositoryError;
use crate::services::images::ImageError;

pub mod admins;
pub mod categories;
pub mod images;
pub mod orders;
pub mod products;
pub mod tags;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer, mapped to HTTP statuses at the
/// routing boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Credentials were missing or wrong.
    #[error("unauthorized")]
    Unauthorized,
    /// The request payload is invalid; the caller can correct and retry.
    #[error("{0}")]
    Validation(String),
    /// A tag selection violated the tag's policy.
    #[error(transparent)]
    TagPolicy(#[from] TagPolicyError),
    /// The referenced entity does not exist.
    #[error("not found")]
    NotFound,
    /// A uniqueness or referential guarantee would be violated.
    #[error("conflict")]
    Conflict,
    /// Image decode/encode or upload storage failed.
    #[error(transparent)]
    Image(#[from] ImageError),
    /// The database failed for a reason other than a constraint violation.
    #[error(transparent)]
    Repository(RepositoryError),
    /// An infrastructure dependency failed, e.g. password hashing.
    #[error("{0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict | RepositoryError::InUse => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}
