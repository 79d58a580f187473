//! Domain error model.

use serde_json::{Map, Value};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Structured, machine readable context attached to an error.
pub type ErrorDetails = Map<String, Value>;

/// Domain-level error.
///
/// Business-rule failures raised by use cases and the pattern crates. Each
/// variant maps to a stable [`code`](DomainError::code) so callers can branch
/// on the kind of failure without parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// A requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The operation conflicts with current state (duplicates, stale data).
    #[error("conflict: {message}")]
    Conflict {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A rule or component was assembled incorrectly.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            details: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict {
            message: msg.into(),
            details: None,
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Attach structured details. Variants without a details slot are
    /// returned unchanged.
    pub fn with_details(self, details: ErrorDetails) -> Self {
        match self {
            Self::Validation { message, .. } => Self::Validation {
                message,
                details: Some(details),
            },
            Self::Conflict { message, .. } => Self::Conflict {
                message,
                details: Some(details),
            },
            other => other,
        }
    }

    /// Stable machine readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Conflict { .. } => "CONFLICT",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::InvalidId(_) => "INVALID_ID",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Validation { details, .. } | Self::Conflict { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
