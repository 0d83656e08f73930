use super::{Constructor, DeclaredField, Entity, EntityDef, ReturnShapes};
use crate::stmt::{Instance, Type, Value, ValueFields, ValueRecord};
use crate::Result;

use std::any::TypeId;
use std::marker::PhantomData;

pub struct EntityDefBuilder<E> {
    def: EntityDef,
    _p: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityDefBuilder<E> {
    pub(super) fn new(name: &'static str) -> Self {
        Self {
            def: EntityDef {
                name,
                type_id: TypeId::of::<E>(),
                fields: None,
                record: None,
                keyword: None,
                assign: None,
                shapes: ReturnShapes::of::<E>(),
            },
            _p: PhantomData,
        }
    }

    /// Declares the next field.
    pub fn field(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.def
            .fields
            .get_or_insert_with(Vec::new)
            .push(DeclaredField::new(name, ty));
        self
    }

    /// Constructs the entity from positional values in declaration order.
    pub fn from_record(
        mut self,
        f: impl Fn(ValueRecord) -> Result<E> + Send + Sync + 'static,
    ) -> Self {
        let name = self.def.name;
        self.def.record = Some(Constructor::new(move |row: ValueRecord| {
            f(row).map(|entity| Instance::new(name, entity))
        }));
        self
    }

    /// Constructs the entity from values keyed by field name.
    pub fn from_fields(
        mut self,
        f: impl Fn(ValueFields) -> Result<E> + Send + Sync + 'static,
    ) -> Self {
        let name = self.def.name;
        self.def.keyword = Some(Constructor::new(move |fields: ValueFields| {
            f(fields).map(|entity| Instance::new(name, entity))
        }));
        self
    }

    /// Constructs the entity from its default, assigning each field in
    /// declaration order.
    pub fn from_assign(
        mut self,
        set: impl Fn(&mut E, &str, Value) -> Result<()> + Send + Sync + 'static,
    ) -> Self
    where
        E: Default,
    {
        let name = self.def.name;
        self.def.assign = Some(Constructor::new(move |fields: ValueFields| {
            let mut entity = E::default();
            for (field, value) in fields {
                set(&mut entity, &field, value)?;
            }
            Ok(Instance::new(name, entity))
        }));
        self
    }

    pub fn build(self) -> EntityDef {
        self.def
    }
}
