//! Reflection of entity definitions and data sources into the field sets the
//! validator reconciles.

pub mod entity;
pub use entity::{EntityFactory, EntityField, EntityFieldSet};

pub mod source;
pub use source::{SourceField, SourceFieldSet};
