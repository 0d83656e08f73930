pub mod config;
pub use config::{Config, Evaluated, Target};

mod factory;
pub use factory::{mapper_factory, Built, FactoryArgs};

mod mapper;
pub use mapper::{LazyMapper, Mapper};

pub mod mapping;
pub use mapping::{Resolved, ValidatedMapping};

pub mod plan;
pub use plan::{Decoder, ProjectionPlan};

pub mod reader;
pub use reader::{Reader, ReaderGetter, ReaderOf, Shape};

pub mod reflect;

mod validate;

pub use mappers_core::{
    bail, err, record,
    schema::{self, entity::DeclaredField},
    stmt, Entity, EntityDef, Error, MapperError, Projection, QuerySet, Result, Schema, Source,
};
