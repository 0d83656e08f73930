use crate::reflect::{self, EntityFieldSet};
use crate::validate::{self, Ancestor};
use crate::{Config, ProjectionPlan, ReaderGetter, ValidatedMapping};
use mappers_core::stmt::{ColumnRef, Instance, ValueRecord};
use mappers_core::{Entity, EntityDef, Result, Source};

use std::sync::Arc;
use tracing::debug;

/// Reads rows of one source as instances of one entity.
///
/// A mapper is validated and planned once, when it is built, and is
/// immutable afterwards. Clones share the same plan.
#[derive(Clone)]
pub struct Mapper {
    inner: Arc<MapperInner>,
}

struct MapperInner {
    entity: EntityDef,
    source: Source,
    config: Config,
    fields: EntityFieldSet,
    mapping: ValidatedMapping,
    plan: ProjectionPlan,
}

/// Configuration of a mapper whose entity and source are not known yet.
///
/// Nested entity fields are configured with one; the enclosing mapper
/// supplies the entity and the related source when it resolves the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LazyMapper {
    config: Config,
}

impl Mapper {
    /// Reflects, validates and plans a mapper from `source` to `entity`.
    pub fn new(entity: EntityDef, source: Source, config: Config) -> Result<Mapper> {
        Mapper::build(entity, source, config, &[])
    }

    /// Shorthand for [`Mapper::new`] with the definition of `E`.
    pub fn of<E: Entity>(source: Source, config: Config) -> Result<Mapper> {
        Mapper::new(E::definition(), source, config)
    }

    pub(crate) fn build(
        entity: EntityDef,
        source: Source,
        config: Config,
        ancestors: &[Ancestor],
    ) -> Result<Mapper> {
        let (fields, factory) = reflect::entity::reflect(&entity)?;
        let source_fields = reflect::source::reflect(&source)?;

        let mut ancestors = ancestors.to_vec();
        ancestors.push((entity.type_id(), source.id()));

        let mapping = validate::validate(&fields, &source_fields, &config, &ancestors)?;
        let plan = ProjectionPlan::new(&mapping, factory);

        debug!(
            entity = entity.name(),
            source = %source,
            columns = plan.columns().len(),
            "built mapper"
        );

        Ok(Mapper {
            inner: Arc::new(MapperInner {
                entity,
                source,
                config,
                fields,
                mapping,
                plan,
            }),
        })
    }

    pub fn entity(&self) -> &EntityDef {
        &self.inner.entity
    }

    pub fn source(&self) -> &Source {
        &self.inner.source
    }

    /// The configuration the mapper was built from.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn fields(&self) -> &EntityFieldSet {
        &self.inner.fields
    }

    pub fn mapping(&self) -> &ValidatedMapping {
        &self.inner.mapping
    }

    pub fn plan(&self) -> &ProjectionPlan {
        &self.inner.plan
    }

    /// Columns to fetch, in the order the decoder reads them.
    pub fn columns(&self) -> &[ColumnRef] {
        self.inner.plan.columns()
    }

    /// Decodes one row holding a value per column.
    pub fn decode(&self, row: ValueRecord) -> Result<Instance> {
        self.inner.plan.decoder().decode(row)
    }

    /// Decodes one row into the mapper's entity type.
    pub fn decode_as<E: Entity>(&self, row: ValueRecord) -> Result<E> {
        self.decode(row)?.downcast()
    }

    /// Starts a reader over this mapper.
    pub fn reader(&self) -> ReaderGetter {
        ReaderGetter::new(self.clone())
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("entity", &self.inner.entity.name())
            .field("source", &self.inner.source)
            .field("columns", &self.inner.plan.columns())
            .finish()
    }
}

impl LazyMapper {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Builds a mapper from `source` to `entity` with this configuration.
    pub fn build(&self, entity: EntityDef, source: Source) -> Result<Mapper> {
        self.build_within(entity, source, &[])
    }

    pub(crate) fn build_within(
        &self,
        entity: EntityDef,
        source: Source,
        ancestors: &[Ancestor],
    ) -> Result<Mapper> {
        Mapper::build(entity, source, self.config.clone(), ancestors)
    }
}

impl From<Config> for LazyMapper {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}
