use mappers_core::schema::entity::{Constructor, DeclaredField};
use mappers_core::stmt::{EntityRef, Instance, Type, Value, ValueFields, ValueRecord};
use mappers_core::{EntityDef, Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// The declared fields of an entity, in declaration order.
#[derive(Debug, Clone)]
pub struct EntityFieldSet {
    entity: &'static str,
    fields: IndexMap<String, EntityField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityField {
    pub name: String,
    pub ty: Type,

    /// The declared type is `Option<T>`.
    pub is_optional: bool,

    /// Set when the declared type is itself a supported entity.
    pub nested: Option<EntityRef>,
}

/// Builds entity instances from values in declaration order.
#[derive(Clone)]
pub struct EntityFactory {
    entity: &'static str,
    names: Arc<[String]>,
    construct: Construct,
}

#[derive(Clone)]
enum Construct {
    Positional(Constructor<ValueRecord>),
    Keyword(Constructor<ValueFields>),
}

/// Capability: the definition lists its fields with their types.
trait DeclaresFields {
    fn declared_fields<'a>(&self, def: &'a EntityDef) -> Option<&'a [DeclaredField]> {
        def.declared_fields().filter(|fields| !fields.is_empty())
    }
}

/// Capability: the definition can build an instance from one row.
trait ConstructibleFromRow {
    fn construct(&self, def: &EntityDef) -> Option<Construct>;
}

trait Convention: DeclaresFields + ConstructibleFromRow {}

impl<T: DeclaresFields + ConstructibleFromRow> Convention for T {}

/// Positional constructor.
struct Record;

/// Keyword constructor; row values are zipped with the declared names.
struct Fields;

/// Default instance plus one assignment per field.
struct Assign;

/// Conventions in the order they are tried.
const CONVENTIONS: [&dyn Convention; 3] = [&Record, &Fields, &Assign];

impl DeclaresFields for Record {}
impl DeclaresFields for Fields {}
impl DeclaresFields for Assign {}

impl ConstructibleFromRow for Record {
    fn construct(&self, def: &EntityDef) -> Option<Construct> {
        def.record_constructor().cloned().map(Construct::Positional)
    }
}

impl ConstructibleFromRow for Fields {
    fn construct(&self, def: &EntityDef) -> Option<Construct> {
        def.keyword_constructor().cloned().map(Construct::Keyword)
    }
}

impl ConstructibleFromRow for Assign {
    fn construct(&self, def: &EntityDef) -> Option<Construct> {
        def.assign_constructor().cloned().map(Construct::Keyword)
    }
}

/// Returns the entity's declared fields and the factory building it from a
/// row.
pub fn reflect(def: &EntityDef) -> Result<(EntityFieldSet, EntityFactory)> {
    let (declared, construct) =
        select(def).ok_or_else(|| Error::unsupported_entity_kind(def.name()))?;

    let mut fields = IndexMap::with_capacity(declared.len());

    for field in declared {
        let nested = field
            .ty
            .as_entity()
            .filter(|entity| is_entity(&entity.definition()))
            .cloned();

        fields.insert(
            field.name.clone(),
            EntityField {
                name: field.name.clone(),
                ty: field.ty.clone(),
                is_optional: field.ty.is_option(),
                nested,
            },
        );
    }

    let factory = EntityFactory {
        entity: def.name(),
        names: declared.iter().map(|field| field.name.clone()).collect(),
        construct,
    };

    Ok((
        EntityFieldSet {
            entity: def.name(),
            fields,
        },
        factory,
    ))
}

/// True if the definition satisfies one of the supported conventions.
pub fn is_entity(def: &EntityDef) -> bool {
    select(def).is_some()
}

fn select(def: &EntityDef) -> Option<(&[DeclaredField], Construct)> {
    CONVENTIONS.iter().find_map(|convention| {
        let fields = convention.declared_fields(def)?;
        let construct = convention.construct(def)?;
        Some((fields, construct))
    })
}

impl EntityFieldSet {
    /// Name of the reflected entity.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn get(&self, name: &str) -> Option<&EntityField> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityField> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl EntityField {
    pub fn is_nested_entity(&self) -> bool {
        self.nested.is_some()
    }
}

impl EntityFactory {
    /// Builds an instance from one value per declared field.
    pub fn construct(&self, values: Vec<Value>) -> Result<Instance> {
        if values.len() != self.names.len() {
            return Err(Error::invalid_result(format!(
                "`{}` declares {} fields, got {} values",
                self.entity,
                self.names.len(),
                values.len()
            )));
        }

        match &self.construct {
            Construct::Positional(constructor) => constructor.call(ValueRecord::from_vec(values)),
            Construct::Keyword(constructor) => {
                constructor.call(ValueFields::zip(self.names.iter().map(String::as_str), values))
            }
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }
}

impl std::fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let convention = match self.construct {
            Construct::Positional(_) => "positional",
            Construct::Keyword(_) => "keyword",
        };
        f.debug_struct("EntityFactory")
            .field("entity", &self.entity)
            .field("convention", &convention)
            .finish()
    }
}
