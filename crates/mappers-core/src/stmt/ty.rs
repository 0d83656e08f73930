use crate::schema::entity::{Entity, EntityDef};

use std::any::TypeId;

/// Declared type of an entity field or a source column.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    I32,
    I64,
    F64,
    String,

    /// `T | None`: the only construct that makes an entity field optional.
    Option(Box<Type>),

    List(Box<Type>),

    /// Another entity type, expanded as a nested entity when recognized.
    Entity(EntityRef),
}

impl Type {
    pub fn option(ty: Type) -> Self {
        Self::Option(Box::new(ty))
    }

    pub fn list(ty: Type) -> Self {
        Self::List(Box::new(ty))
    }

    pub fn entity<E: Entity>() -> Self {
        Self::Entity(EntityRef::of::<E>())
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Self::Option(_))
    }

    pub fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Lazily resolved reference to an entity definition.
///
/// Entities may refer to each other, so the definition is only produced
/// when the reflector asks for it.
#[derive(Clone, Copy)]
pub struct EntityRef {
    type_id: TypeId,
    name: fn() -> &'static str,
    definition: fn() -> EntityDef,
}

impl EntityRef {
    pub fn of<E: Entity>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            name: std::any::type_name::<E>,
            definition: E::definition,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the referenced entity.
    pub fn type_name(&self) -> &'static str {
        (self.name)()
    }

    pub fn definition(&self) -> EntityDef {
        (self.definition)()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl core::fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("EntityRef").field(&self.type_name()).finish()
    }
}
