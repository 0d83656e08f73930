mod resolve;
pub(crate) use resolve::Ancestor;

use crate::reflect::{EntityField, EntityFieldSet, SourceFieldSet};
use crate::{Config, Target, ValidatedMapping};
use mappers_core::{Error, Result};

use std::borrow::Cow;
use tracing::debug;

struct Validate<'a> {
    entity: &'a EntityFieldSet,
    source: &'a SourceFieldSet,
    config: &'a Config,
}

/// Reconciles the entity's fields, the source's fields and the configuration
/// and resolves one target per entity field.
///
/// Checks run in a fixed order and the first failing one is reported.
/// Structural checks on the configuration come first so that relation walks
/// only ever see well-formed targets.
pub(crate) fn validate(
    entity: &EntityFieldSet,
    source: &SourceFieldSet,
    config: &Config,
    ancestors: &[Ancestor],
) -> Result<ValidatedMapping> {
    let validate = Validate {
        entity,
        source,
        config,
    };

    validate.check("config shape", Validate::verify_config_shape)?;
    validate.check("unknown entity field", Validate::verify_entity_fields_known)?;
    validate.check("unknown source field", Validate::verify_source_fields_known)?;
    validate.check("missing entity field", Validate::verify_entity_fields_resolvable)?;
    validate.check("nullability", Validate::verify_nullability)?;
    validate.check("collection", Validate::verify_nested_not_collection)?;
    validate.check("nested config", Validate::verify_nested_config)?;
    validate.check("path", Validate::verify_paths)?;

    validate.resolve(ancestors)
}

impl Validate<'_> {
    fn check(&self, name: &'static str, f: fn(&Self) -> Result<()>) -> Result<()> {
        f(self).inspect_err(|err| {
            debug!(
                check = name,
                entity = self.entity.entity(),
                source = %self.source.source(),
                error = %err,
                "mapper validation failed"
            );
        })
    }

    fn source_name(&self) -> &str {
        self.source.source().name()
    }

    fn verify_config_shape(&self) -> Result<()> {
        for (key, target) in self.config.iter() {
            if key.is_empty() {
                return Err(Error::invalid_config("field names must not be empty"));
            }

            match target {
                Target::Field(name) if name.is_empty() => {
                    return Err(Error::invalid_config_value(
                        key,
                        "source field name must not be empty",
                    ));
                }
                Target::Path(segments) if segments.len() < 2 => {
                    return Err(Error::invalid_config_value(
                        key,
                        format!(
                            "a path needs at least two segments, found {}",
                            segments.len()
                        ),
                    ));
                }
                Target::Path(segments) if segments.iter().any(String::is_empty) => {
                    return Err(Error::invalid_config_value(
                        key,
                        "path segments must not be empty",
                    ));
                }
                Target::Evaluated(evaluated) if evaluated.name.as_deref() == Some("") => {
                    return Err(Error::invalid_config_value(
                        key,
                        "evaluated name must not be empty",
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn verify_entity_fields_known(&self) -> Result<()> {
        match self.config.keys().find(|key| !self.entity.contains(key)) {
            Some(key) => Err(Error::unknown_entity_field(key, self.entity.entity())),
            None => Ok(()),
        }
    }

    fn verify_source_fields_known(&self) -> Result<()> {
        for (_, target) in self.config.iter() {
            if let Target::Field(name) = target {
                if !self.source.contains(name) {
                    return Err(Error::unknown_source_field(name, self.source_name()));
                }
            }
        }

        Ok(())
    }

    fn verify_entity_fields_resolvable(&self) -> Result<()> {
        let missing = self
            .entity
            .iter()
            .find(|field| !self.source.contains(&field.name) && !self.config.contains(&field.name));

        match missing {
            Some(field) => Err(Error::missing_entity_field(&field.name, self.source_name())),
            None => Ok(()),
        }
    }

    /// Fields read straight from one source field, renamed or not, must be
    /// optional when that field is nullable. Paths and evaluated columns are
    /// not checked.
    fn verify_nullability(&self) -> Result<()> {
        for field in self.entity.iter() {
            let Some(source_name) = self.direct_source_name(field) else {
                continue;
            };

            let Some(source_field) = self.source.get(source_name) else {
                continue;
            };

            if source_field.is_nullable && !field.is_optional {
                return Err(Error::nullability_mismatch(
                    &field.name,
                    &source_field.name,
                    self.source_name(),
                ));
            }
        }

        Ok(())
    }

    fn verify_nested_not_collection(&self) -> Result<()> {
        for field in self.entity.iter().filter(|field| field.is_nested_entity()) {
            if let Some(source_field) = self.source.get(&field.name) {
                if source_field.is_collection {
                    return Err(Error::collection_field_mismatch(
                        &field.name,
                        self.source_name(),
                    ));
                }
            }
        }

        Ok(())
    }

    fn verify_nested_config(&self) -> Result<()> {
        for (key, target) in self.config.iter() {
            let Some(field) = self.entity.get(key) else {
                continue;
            };

            match (field.is_nested_entity(), target) {
                (true, Target::Nested(_)) | (false, Target::Field(_)) => {}
                (false, Target::Path(_) | Target::Evaluated(_)) => {}
                (true, other) => {
                    return Err(Error::invalid_nested_mapper_config(
                        key,
                        format!("expected a nested mapper, found a {}", other.kind_name()),
                    ));
                }
                (false, Target::Nested(_)) => {
                    return Err(Error::invalid_nested_mapper_config(
                        key,
                        "a nested mapper was given for a field that is not a nested entity",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Every hop but the last must be a single-valued relation; the last
    /// segment is looked up on the source reached by the walk.
    fn verify_paths(&self) -> Result<()> {
        for (key, target) in self.config.iter() {
            let Target::Path(segments) = target else {
                continue;
            };

            let Some((terminal, hops)) = segments.split_last() else {
                continue;
            };

            let mut current = Cow::Borrowed(self.source);

            for hop in hops {
                let Some(field) = current.get(hop) else {
                    return Err(Error::unknown_source_field(hop, current.source().name()));
                };

                if !field.is_relation {
                    return Err(Error::path_not_a_relation(key, hop, current.source().name()));
                }

                if field.is_collection {
                    return Err(Error::path_is_collection(key, hop, current.source().name()));
                }

                let next = match field.related_fields()? {
                    Some(fields) => fields.into_owned(),
                    None => return Err(Error::path_not_a_relation(key, hop, current.source().name())),
                };

                current = Cow::Owned(next);
            }

            if !current.contains(terminal) {
                return Err(Error::unknown_source_field(terminal, current.source().name()));
            }
        }

        Ok(())
    }

    /// Name of the source field `field` is read from, when it is read from
    /// exactly one field of this source.
    fn direct_source_name<'b>(&'b self, field: &'b EntityField) -> Option<&'b str> {
        match self.config.get(&field.name) {
            None | Some(Target::Nested(_)) => Some(&field.name),
            Some(Target::Field(name)) => Some(name),
            Some(Target::Path(_) | Target::Evaluated(_)) => None,
        }
    }
}
