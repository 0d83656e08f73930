use super::Validate;
use crate::reflect::EntityField;
use crate::{LazyMapper, Mapper, Resolved, Target, ValidatedMapping};
use mappers_core::schema::source::ModelId;
use mappers_core::stmt::EntityRef;
use mappers_core::{err, Error, Result};

use indexmap::IndexMap;
use std::any::TypeId;
use tracing::trace;

/// An (entity, source) pair being built by an enclosing mapper.
pub(crate) type Ancestor = (TypeId, ModelId);

impl Validate<'_> {
    /// Builds the mapping once every check has passed. Nested entities are
    /// built into mappers over the related source here, bottom-up.
    pub(super) fn resolve(&self, ancestors: &[Ancestor]) -> Result<ValidatedMapping> {
        let empty = LazyMapper::default();
        let mut fields = IndexMap::with_capacity(self.entity.len());

        for field in self.entity.iter() {
            let target = self.config.get(&field.name);

            let resolved = match (&field.nested, target) {
                (Some(nested), None) => {
                    Resolved::Nested(self.resolve_nested(field, nested, &empty, ancestors)?)
                }
                (Some(nested), Some(Target::Nested(lazy))) => {
                    Resolved::Nested(self.resolve_nested(field, nested, lazy, ancestors)?)
                }
                (None, None) => Resolved::Field(field.name.clone()),
                (None, Some(Target::Field(name))) => Resolved::Field(name.clone()),
                (None, Some(Target::Path(segments))) => Resolved::Path(segments.clone()),
                (None, Some(Target::Evaluated(evaluated))) => Resolved::Evaluated(
                    evaluated.name.clone().unwrap_or_else(|| field.name.clone()),
                ),
                (_, Some(target)) => {
                    return Err(Error::invalid_nested_mapper_config(
                        &field.name,
                        format!("unexpected {}", target.kind_name()),
                    ))
                }
            };

            fields.insert(field.name.clone(), resolved);
        }

        Ok(ValidatedMapping::new(fields))
    }

    fn resolve_nested(
        &self,
        field: &EntityField,
        nested: &EntityRef,
        lazy: &LazyMapper,
        ancestors: &[Ancestor],
    ) -> Result<Mapper> {
        let Some(source_field) = self.source.get(&field.name) else {
            return Err(Error::unknown_source_field(&field.name, self.source_name()));
        };

        let related = match &source_field.related {
            Some(related) if source_field.is_single_relation() => related,
            _ => {
                return Err(Error::related_field_not_relation(
                    &field.name,
                    self.source_name(),
                ))
            }
        };

        let entity = nested.definition();

        if ancestors.contains(&(entity.type_id(), related.source.id())) {
            return Err(Error::invalid_nested_mapper_config(
                &field.name,
                format!(
                    "`{}` over `{}` is already being mapped by an enclosing mapper",
                    entity.name(),
                    related.source.name()
                ),
            ));
        }

        trace!(
            field = %field.name,
            entity = entity.name(),
            source = %related.source,
            "resolving nested mapper"
        );

        lazy.build_within(entity, related.source.clone(), ancestors)
            .map_err(|cause| cause.context(err!("resolving nested field `{}`", field.name)))
    }
}
