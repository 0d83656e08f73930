mod json;

use crate::LazyMapper;

use indexmap::IndexMap;

/// Per-field mapping configuration, keyed by entity field name.
///
/// Fields absent from the configuration map to the source field of the same
/// name.
///
/// ```
/// use mappers::{Config, Evaluated, LazyMapper};
///
/// let config = Config::new()
///     .field("primary_key", "id")
///     .path("community_id", ["channel", "community_id"])
///     .evaluated("random_id", Evaluated::named("user_random_id"))
///     .nested("user", LazyMapper::new(Config::new().field("primary_key", "id")));
///
/// assert_eq!(config.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    entries: IndexMap<String, Target>,
}

/// Where the value of one entity field comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A source field, possibly under a different name.
    Field(String),

    /// Relation hops ending in a field of the last related source.
    Path(Vec<String>),

    /// A column computed by the query at read time.
    Evaluated(Evaluated),

    /// A nested entity read through the relation of the same name.
    Nested(LazyMapper),
}

/// Marks an entity field as evaluated by the query, e.g. an annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluated {
    pub name: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `entity_field` to the source field `source_field`.
    pub fn field(self, entity_field: impl Into<String>, source_field: impl Into<String>) -> Self {
        self.insert(entity_field, Target::Field(source_field.into()))
    }

    /// Maps `entity_field` to a field reached through relation hops.
    pub fn path<I, S>(self, entity_field: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments.into_iter().map(Into::into).collect();
        self.insert(entity_field, Target::Path(segments))
    }

    pub fn evaluated(self, entity_field: impl Into<String>, evaluated: Evaluated) -> Self {
        self.insert(entity_field, Target::Evaluated(evaluated))
    }

    pub fn nested(self, entity_field: impl Into<String>, mapper: LazyMapper) -> Self {
        self.insert(entity_field, Target::Nested(mapper))
    }

    pub fn insert(mut self, entity_field: impl Into<String>, target: Target) -> Self {
        self.entries.insert(entity_field.into(), target);
        self
    }

    pub fn get(&self, entity_field: &str) -> Option<&Target> {
        self.entries.get(entity_field)
    }

    pub fn contains(&self, entity_field: &str) -> bool {
        self.entries.contains_key(entity_field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Target)> {
        self.entries.iter().map(|(key, target)| (key.as_str(), target))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Target)> for Config {
    fn from_iter<T: IntoIterator<Item = (K, Target)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, target)| (key.into(), target))
                .collect(),
        }
    }
}

impl Target {
    /// Name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Target::Field(_) => "field name",
            Target::Path(_) => "path",
            Target::Evaluated(_) => "evaluated marker",
            Target::Nested(_) => "nested mapper",
        }
    }

    pub fn as_nested(&self) -> Option<&LazyMapper> {
        match self {
            Target::Nested(mapper) => Some(mapper),
            _ => None,
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target::Field(value.to_string())
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Target::Field(value)
    }
}

impl From<Evaluated> for Target {
    fn from(value: Evaluated) -> Self {
        Target::Evaluated(value)
    }
}

impl From<LazyMapper> for Target {
    fn from(value: LazyMapper) -> Self {
        Target::Nested(value)
    }
}

impl Evaluated {
    /// The query provides a column named after the entity field.
    pub fn new() -> Self {
        Self::default()
    }

    /// The query provides a column named `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
