use super::{BelongsTo, Field, FieldTy, HasMany, HasOne, ManyToMany, Model, ModelId, ModelKind, Schema};
use crate::{stmt, Result};

use std::sync::Arc;

/// Declares models, then their fields, then verifies the whole catalog.
///
/// Models are declared before they are defined so that relations can refer
/// to models appearing later, including the model itself.
///
/// ```
/// use mappers_core::{stmt::Type, Schema};
///
/// let mut builder = Schema::builder();
/// let user = builder.model("UserModel");
/// let message = builder.model("MessageModel");
///
/// builder
///     .define(user)
///     .primary_key("id", Type::I64)
///     .column("name", Type::String)
///     .has_many("messages", message, "user");
///
/// builder
///     .define(message)
///     .primary_key("id", Type::I64)
///     .column("text", Type::String)
///     .belongs_to("user", user)
///     .pair("messages");
///
/// let schema = builder.build().unwrap();
/// assert_eq!(schema.model(message).unwrap().field("user_id").unwrap().name, "user");
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    models: Vec<Model>,
}

/// Adds fields to one declared model.
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    model: &'a mut Model,
}

impl SchemaBuilder {
    /// Declares a concrete model and returns its id.
    pub fn model(&mut self, name: impl Into<String>) -> ModelId {
        let id = ModelId(self.models.len());
        self.models.push(Model {
            id,
            name: name.into(),
            kind: ModelKind::Concrete,
            fields: vec![],
        });
        id
    }

    /// Returns a builder adding fields to a previously declared model.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by [`SchemaBuilder::model`].
    pub fn define(&mut self, id: ModelId) -> ModelBuilder<'_> {
        ModelBuilder {
            model: &mut self.models[id.0],
        }
    }

    pub fn build(self) -> Result<Arc<Schema>> {
        let schema = Schema {
            models: self.models,
        };
        schema.verify()?;
        Ok(Arc::new(schema))
    }
}

impl ModelBuilder<'_> {
    /// Marks the model abstract: it has no rows and cannot be read from.
    pub fn abstract_model(self) -> Self {
        self.model.kind = ModelKind::Abstract;
        self
    }

    pub fn primary_key(self, name: impl Into<String>, ty: stmt::Type) -> Self {
        self.push(name, FieldTy::Primitive(ty), true)
    }

    pub fn column(self, name: impl Into<String>, ty: stmt::Type) -> Self {
        self.push(name, FieldTy::Primitive(ty), false)
    }

    /// Makes the most recently added field nullable.
    pub fn nullable(self) -> Self {
        if let Some(field) = self.model.fields.last_mut() {
            field.nullable = true;
        }
        self
    }

    /// Adds a foreign key relation stored in the `<name>_id` column.
    pub fn belongs_to(self, name: impl Into<String>, target: ModelId) -> Self {
        let name = name.into();
        let foreign_key = format!("{name}_id");
        self.push(
            name,
            BelongsTo {
                target,
                foreign_key,
                pair: None,
            }
            .into(),
            false,
        )
    }

    /// Renames the foreign key column of the most recently added
    /// `belongs_to`.
    pub fn foreign_key(self, column: impl Into<String>) -> Self {
        if let Some(Field {
            ty: FieldTy::BelongsTo(belongs_to),
            ..
        }) = self.model.fields.last_mut()
        {
            belongs_to.foreign_key = column.into();
        }
        self
    }

    /// Names the field on the target pairing with the most recently added
    /// relation.
    pub fn pair(self, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(field) = self.model.fields.last_mut() {
            match &mut field.ty {
                FieldTy::Primitive(_) => {}
                FieldTy::BelongsTo(rel) => rel.pair = Some(name),
                FieldTy::HasOne(rel) => rel.pair = name,
                FieldTy::HasMany(rel) => rel.pair = name,
                FieldTy::ManyToMany(rel) => rel.pair = Some(name),
            }
        }
        self
    }

    pub fn has_one(self, name: impl Into<String>, target: ModelId, pair: impl Into<String>) -> Self {
        let ty = HasOne {
            target,
            pair: pair.into(),
        };
        self.push(name, ty.into(), false)
    }

    pub fn has_many(
        self,
        name: impl Into<String>,
        target: ModelId,
        pair: impl Into<String>,
    ) -> Self {
        let ty = HasMany {
            target,
            pair: pair.into(),
        };
        self.push(name, ty.into(), false)
    }

    pub fn many_to_many(self, name: impl Into<String>, target: ModelId) -> Self {
        let ty = ManyToMany { target, pair: None };
        self.push(name, ty.into(), false)
    }

    fn push(self, name: impl Into<String>, ty: FieldTy, primary_key: bool) -> Self {
        self.model.fields.push(Field {
            name: name.into(),
            ty,
            nullable: false,
            primary_key,
        });
        self
    }
}
