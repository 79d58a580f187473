use patternkit_core::{DomainError, EntityId};
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository operation error.
///
/// These are **persistence errors** as opposed to business-rule errors; use
/// cases usually convert them into [`DomainError`] with `?`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity with id {id} not found")]
    NotFound { id: EntityId },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn not_found(id: &EntityId) -> Self {
        Self::NotFound { id: id.clone() }
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => DomainError::not_found(err.to_string()),
            RepositoryError::Storage(msg) => DomainError::invariant(msg),
        }
    }
}
