mod builder;
pub use builder::EntityDefBuilder;

mod shapes;
pub use shapes::ReturnShapes;

use crate::stmt::{Instance, Type, ValueFields, ValueRecord};
use crate::Result;

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// A domain entity that can be mapped from a data source.
///
/// ```
/// use mappers_core::{stmt::Type, Entity, EntityDef};
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     primary_key: i64,
///     name: String,
/// }
///
/// impl Entity for User {
///     fn definition() -> EntityDef {
///         EntityDef::builder::<Self>("User")
///             .field("primary_key", Type::I64)
///             .field("name", Type::String)
///             .from_record(|mut row| {
///                 Ok(User {
///                     primary_key: row.take(0)?,
///                     name: row.take(1)?,
///                 })
///             })
///             .build()
///     }
/// }
/// ```
pub trait Entity: Sized + Send + Sync + 'static {
    fn definition() -> EntityDef;
}

/// Runtime description of an entity type.
///
/// A definition states which fields the entity declares and which
/// construction conventions it supports. The mapper's entity reflector picks
/// one convention from it.
#[derive(Clone)]
pub struct EntityDef {
    name: &'static str,
    type_id: TypeId,
    fields: Option<Vec<DeclaredField>>,
    record: Option<Constructor<ValueRecord>>,
    keyword: Option<Constructor<ValueFields>>,
    assign: Option<Constructor<ValueFields>>,
    shapes: ReturnShapes,
}

/// A field as the entity declares it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredField {
    pub name: String,
    pub ty: Type,
}

/// Type-erased entity constructor taking `A`.
pub struct Constructor<A>(Arc<dyn Fn(A) -> Result<Instance> + Send + Sync>);

impl EntityDef {
    pub fn builder<E: Entity>(name: &'static str) -> EntityDefBuilder<E> {
        EntityDefBuilder::new(name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Declared fields, in declaration order, if the entity declares any.
    pub fn declared_fields(&self) -> Option<&[DeclaredField]> {
        self.fields.as_deref()
    }

    /// Positional constructor, if the entity supports the record convention.
    pub fn record_constructor(&self) -> Option<&Constructor<ValueRecord>> {
        self.record.as_ref()
    }

    /// Keyword constructor, if the entity supports the fields convention.
    pub fn keyword_constructor(&self) -> Option<&Constructor<ValueFields>> {
        self.keyword.as_ref()
    }

    /// Attribute-assigning constructor, if the entity supports the assign
    /// convention.
    pub fn assign_constructor(&self) -> Option<&Constructor<ValueFields>> {
        self.assign.as_ref()
    }

    pub fn shapes(&self) -> &ReturnShapes {
        &self.shapes
    }
}

impl fmt::Debug for EntityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDef")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("record", &self.record.is_some())
            .field("keyword", &self.keyword.is_some())
            .field("assign", &self.assign.is_some())
            .finish()
    }
}

impl DeclaredField {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl<A> Constructor<A> {
    pub fn new(f: impl Fn(A) -> Result<Instance> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: A) -> Result<Instance> {
        (self.0)(args)
    }
}

impl<A> Clone for Constructor<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
