use patternkit_core::DomainError;
use thiserror::Error;

pub type SpecificationResult<T> = Result<T, SpecificationError>;

/// Failures raised while assembling a specification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecificationError {
    /// `build()` was called before any clause was added.
    #[error("no specifications defined")]
    Empty,
}

impl From<SpecificationError> for DomainError {
    fn from(err: SpecificationError) -> Self {
        DomainError::configuration(err.to_string())
    }
}
