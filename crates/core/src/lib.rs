//! `patternkit-core`: shared building blocks for the pattern crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod use_case;

pub use entity::{Entity, Patch, Record};
pub use error::{DomainError, DomainResult, ErrorDetails};
pub use id::EntityId;
pub use use_case::UseCase;
