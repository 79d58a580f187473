//! `patternkit-mapper`: pure transformations between data shapes.
//!
//! Mappers are plain values handed to whoever needs them; there is no global
//! registry to look them up by name.

pub mod bidirectional;
pub mod mapper;
pub mod property;

pub use bidirectional::BidirectionalMapper;
pub use mapper::{CompositeMapper, FnMapper, Mapper, from_fn};
pub use property::PropertyMapper;
