use crate::Mapper;
use mappers_core::stmt::ColumnRef;

use indexmap::IndexMap;

/// One resolved target per entity field, in entity declaration order.
#[derive(Debug, Clone)]
pub struct ValidatedMapping {
    fields: IndexMap<String, Resolved>,
}

#[derive(Debug, Clone)]
pub enum Resolved {
    /// A source field, by the name the configuration used.
    Field(String),

    /// Relation hops ending in a field of the last related source.
    Path(Vec<String>),

    /// A column the query computes, by its source-side name.
    Evaluated(String),

    /// A nested entity read through the relation named after the field.
    Nested(Mapper),
}

impl ValidatedMapping {
    pub(crate) fn new(fields: IndexMap<String, Resolved>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Resolved> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.fields.iter().map(|(field, resolved)| (field.as_str(), resolved))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Resolved {
    /// The single column this target reads, or `None` for nested entities,
    /// which read several.
    pub fn column(&self) -> Option<ColumnRef> {
        match self {
            Resolved::Field(name) | Resolved::Evaluated(name) => Some(ColumnRef::new(name.as_str())),
            Resolved::Path(segments) => Some(ColumnRef::path(segments.iter().map(String::as_str))),
            Resolved::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Mapper> {
        match self {
            Resolved::Nested(mapper) => Some(mapper),
            _ => None,
        }
    }
}
