use crate::{Config, LazyMapper, Mapper};
use mappers_core::{err, EntityDef, Result, Source};

/// Arguments accepted by [`mapper_factory`].
///
/// * `()`: an empty lazy mapper
/// * `Config`: a lazy mapper
/// * `(EntityDef, Source)` and `(EntityDef, Source, Config)`: a mapper
#[derive(Debug, Default)]
pub struct FactoryArgs {
    entity: Option<EntityDef>,
    source: Option<Source>,
    config: Config,
}

/// What [`mapper_factory`] produced.
#[derive(Debug, Clone)]
pub enum Built {
    Lazy(LazyMapper),
    Mapper(Mapper),
}

/// Defines a declarative mapper from a data source to a domain entity.
///
/// Given an entity and a source the mapper is reflected, validated and
/// planned right away, and any configuration error is returned here. Given a
/// configuration only, the result is a [`LazyMapper`] for a nested field.
///
/// ```
/// use mappers::{mapper_factory, Config};
///
/// let lazy = mapper_factory(Config::new().field("primary_key", "id"))
///     .unwrap()
///     .into_lazy()
///     .unwrap();
/// assert_eq!(lazy.config().len(), 1);
/// ```
pub fn mapper_factory(args: impl Into<FactoryArgs>) -> Result<Built> {
    let FactoryArgs {
        entity,
        source,
        config,
    } = args.into();

    match (entity, source) {
        (Some(entity), Some(source)) => Mapper::new(entity, source, config).map(Built::Mapper),
        _ => Ok(Built::Lazy(LazyMapper::new(config))),
    }
}

impl Built {
    pub fn is_lazy(&self) -> bool {
        matches!(self, Built::Lazy(_))
    }

    pub fn into_mapper(self) -> Result<Mapper> {
        match self {
            Built::Mapper(mapper) => Ok(mapper),
            Built::Lazy(_) => Err(err!(
                "expected a mapper, got a lazy mapper without entity and source"
            )),
        }
    }

    pub fn into_lazy(self) -> Result<LazyMapper> {
        match self {
            Built::Lazy(lazy) => Ok(lazy),
            Built::Mapper(mapper) => Err(err!(
                "expected a lazy mapper, got a mapper of `{}`",
                mapper.entity().name()
            )),
        }
    }
}

impl From<()> for FactoryArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<Config> for FactoryArgs {
    fn from(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl From<(EntityDef, Source)> for FactoryArgs {
    fn from((entity, source): (EntityDef, Source)) -> Self {
        Self {
            entity: Some(entity),
            source: Some(source),
            config: Config::default(),
        }
    }
}

impl From<(EntityDef, Source, Config)> for FactoryArgs {
    fn from((entity, source, config): (EntityDef, Source, Config)) -> Self {
        Self {
            entity: Some(entity),
            source: Some(source),
            config,
        }
    }
}
