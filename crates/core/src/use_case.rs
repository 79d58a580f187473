//! Use-case seam: one application operation, one input, one outcome.

use crate::error::DomainResult;

/// An application operation orchestrating repositories, rules and mappers.
///
/// Use cases must not swallow failures: domain errors are returned to the
/// caller as-is.
#[async_trait::async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send;
    type Output: Send;

    async fn execute(&self, input: Self::Input) -> DomainResult<Self::Output>;
}
