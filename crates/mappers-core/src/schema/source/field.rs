use super::{BelongsTo, HasMany, HasOne, ManyToMany, ModelId};
use crate::stmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// The field name
    pub name: String,

    /// Primitive or relation
    pub ty: FieldTy,

    /// True if the column may hold `NULL`.
    pub nullable: bool,

    /// True if the field is the model's primary key
    pub primary_key: bool,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    Primitive(stmt::Type),
    BelongsTo(BelongsTo),
    HasOne(HasOne),
    HasMany(HasMany),
    ManyToMany(ManyToMany),
}

impl Field {
    /// Name of the column storing the field, when it differs from the field
    /// name. Only foreign keys have one.
    pub fn attname(&self) -> Option<&str> {
        match &self.ty {
            FieldTy::BelongsTo(belongs_to) => Some(&belongs_to.foreign_key),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// True if the relation yields many related rows.
    pub fn is_collection(&self) -> bool {
        self.ty.is_collection()
    }

    /// If the field is a relation, return the relation's target ModelId.
    pub fn relation_target(&self) -> Option<ModelId> {
        match &self.ty {
            FieldTy::Primitive(_) => None,
            FieldTy::BelongsTo(belongs_to) => Some(belongs_to.target),
            FieldTy::HasOne(has_one) => Some(has_one.target),
            FieldTy::HasMany(has_many) => Some(has_many.target),
            FieldTy::ManyToMany(many_to_many) => Some(many_to_many.target),
        }
    }

    /// Name of the field on the target model pointing back at this one.
    pub fn pair(&self) -> Option<&str> {
        match &self.ty {
            FieldTy::Primitive(_) => None,
            FieldTy::BelongsTo(belongs_to) => belongs_to.pair.as_deref(),
            FieldTy::HasOne(has_one) => Some(&has_one.pair),
            FieldTy::HasMany(has_many) => Some(&has_many.pair),
            FieldTy::ManyToMany(many_to_many) => many_to_many.pair.as_deref(),
        }
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&stmt::Type> {
        match self {
            Self::Primitive(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        !self.is_primitive()
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::HasMany(..) | Self::ManyToMany(..))
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Self::BelongsTo(belongs_to) => Some(belongs_to),
            _ => None,
        }
    }

    pub fn as_has_one(&self) -> Option<&HasOne> {
        match self {
            Self::HasOne(has_one) => Some(has_one),
            _ => None,
        }
    }
}
