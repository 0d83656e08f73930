use super::{Field, FieldTy, Model, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_model_names_are_unique()?;

        for model in self.schema.models() {
            self.verify_field_names_are_unique(model)?;
            self.verify_at_most_one_primary_key(model)?;

            for field in &model.fields {
                self.verify_relation_target(model, field)?;
                self.verify_relation_pair(model, field)?;
            }
        }

        Ok(())
    }

    fn verify_model_names_are_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for model in self.schema.models() {
            if model.name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "model {} has an empty name",
                    model.id
                )));
            }

            if !seen.insert(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate model name `{}`",
                    model.name
                )));
            }
        }

        Ok(())
    }

    // Foreign key columns share the namespace of field names.
    fn verify_field_names_are_unique(&self, model: &Model) -> Result<()> {
        let mut seen = HashSet::new();

        for field in &model.fields {
            let names = std::iter::once(field.name.as_str()).chain(field.attname());

            for name in names {
                if name.is_empty() || !seen.insert(name) {
                    return Err(Error::invalid_schema(format!(
                        "duplicate or empty field name `{name}` in `{}`",
                        model.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_at_most_one_primary_key(&self, model: &Model) -> Result<()> {
        let mut primary_keys = model.fields.iter().filter(|field| field.primary_key);

        if let Some(field) = primary_keys.next() {
            if !field.ty.is_primitive() {
                return Err(Error::invalid_schema(format!(
                    "primary key `{}.{}` must be a column",
                    model.name, field.name
                )));
            }
        }

        if primary_keys.next().is_some() {
            return Err(Error::invalid_schema(format!(
                "`{}` declares more than one primary key",
                model.name
            )));
        }

        Ok(())
    }

    fn verify_relation_target(&self, model: &Model, field: &Field) -> Result<()> {
        let Some(target) = field.relation_target() else {
            return Ok(());
        };

        if self.schema.model(target).is_none() {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` targets unknown model {target}",
                model.name, field.name
            )));
        }

        Ok(())
    }

    fn verify_relation_pair(&self, model: &Model, field: &Field) -> Result<()> {
        let (Some(target), Some(pair)) = (field.relation_target(), field.pair()) else {
            return Ok(());
        };

        let Some(target) = self.schema.model(target) else {
            return Ok(());
        };

        let Some(pair_field) = target.fields.iter().find(|f| f.name == pair) else {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` pairs with unknown field `{}.{pair}`",
                model.name, field.name, target.name
            )));
        };

        if pair_field.relation_target() != Some(model.id) {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` pairs with `{}.{pair}`, which does not point back",
                model.name, field.name, target.name
            )));
        }

        let reverse = matches!(field.ty, FieldTy::HasOne(_) | FieldTy::HasMany(_));
        if reverse && pair_field.ty.as_belongs_to().is_none() {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{}` must pair with a `belongs_to`, found `{}.{pair}`",
                model.name, field.name, target.name
            )));
        }

        Ok(())
    }
}
