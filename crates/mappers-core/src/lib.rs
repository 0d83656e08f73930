pub mod driver;
pub use driver::{Projection, QuerySet};

mod error;
pub use error::{Error, IntoError};

/// Alias of [`Error`] used by mapper APIs.
pub type MapperError = Error;

pub mod schema;
pub use schema::entity::{Entity, EntityDef};
pub use schema::source::{Schema, Source};

pub mod stmt;

/// A Result type alias that uses the mapper [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
