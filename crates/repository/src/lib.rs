//! `patternkit-repository`: persistence access decoupled from business logic.

pub mod config;
pub mod criteria;
pub mod error;
pub mod in_memory;
pub mod query;
pub mod repository;

pub use config::{IdStrategy, RepositoryConfig};
pub use criteria::Criteria;
pub use error::{RepositoryError, RepositoryResult};
pub use in_memory::InMemoryRepository;
pub use query::{Page, PageInfo, QueryParams};
pub use repository::Repository;
