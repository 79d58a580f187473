//! `patternkit-specification`: composable business rules.
//!
//! A [`Specification`] is a small boolean expression tree over a candidate
//! type. Leaves read candidate values through explicit [`Field`] accessors;
//! composites combine rules with AND / OR / NOT.
//!
//! ```ignore
//! let price = Field::new("price", |p: &Product| &p.price);
//! let status = Field::new("status", |p: &Product| &p.status);
//!
//! let sellable = SpecificationBuilder::new()
//!     .greater_than(&price, 0)
//!     .one_of(&status, [Status::Active, Status::Preorder])
//!     .build()?;
//!
//! let visible = sellable.filter(&catalog);
//! ```

pub mod builder;
pub mod error;
pub mod field;
pub mod leaf;
pub mod spec;

pub use builder::SpecificationBuilder;
pub use error::{SpecificationError, SpecificationResult};
pub use field::Field;
pub use leaf::{ComparisonOperator, ComparisonSpec, InSpec, PropertySpec, RangeBounds, RangeSpec};
pub use spec::Specification;
