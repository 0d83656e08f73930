use mappers_core::schema::source::{Field, FieldTy, ModelId};
use mappers_core::{Result, Source};

use indexmap::IndexMap;
use std::borrow::Cow;
use std::sync::Arc;

/// The fields of one source, keyed by field name and by foreign key column.
///
/// Both keys of a foreign key point at the same [`SourceField`].
#[derive(Debug, Clone)]
pub struct SourceFieldSet {
    source: Source,
    fields: IndexMap<String, Arc<SourceField>>,
}

#[derive(Debug)]
pub struct SourceField {
    /// Logical field name
    pub name: String,

    /// Foreign key column, for relations stored on this source
    pub attname: Option<String>,

    pub is_nullable: bool,

    pub is_relation: bool,

    /// Relation yielding many rows; never expanded.
    pub is_collection: bool,

    /// Related source of a single-valued relation.
    pub related: Option<Related>,
}

#[derive(Debug)]
pub struct Related {
    pub source: Source,

    /// Field on the related source pointing back at this one. It is left out
    /// of `fields`.
    pub exclude: Option<String>,

    /// Fields of the related source. `None` when the relation closes a cycle;
    /// the set is then reflected again on demand.
    pub fields: Option<SourceFieldSet>,
}

/// Returns the fields of `source`, expanding single-valued relations.
pub fn reflect(source: &Source) -> Result<SourceFieldSet> {
    reflect_excluding(source, None, &mut vec![])
}

fn reflect_excluding(
    source: &Source,
    exclude: Option<&str>,
    visited: &mut Vec<ModelId>,
) -> Result<SourceFieldSet> {
    let model = source.model()?;

    visited.push(model.id);

    let mut fields = IndexMap::with_capacity(model.fields.len());

    for field in &model.fields {
        if Some(field.name.as_str()) == exclude {
            continue;
        }

        let disassembled = Arc::new(disassemble(source, field, visited)?);

        fields.insert(field.name.clone(), disassembled.clone());

        if let Some(attname) = field.attname() {
            if attname != field.name {
                fields.insert(attname.to_string(), disassembled);
            }
        }
    }

    visited.pop();

    Ok(SourceFieldSet {
        source: source.clone(),
        fields,
    })
}

fn disassemble(source: &Source, field: &Field, visited: &mut Vec<ModelId>) -> Result<SourceField> {
    let is_relation = field.is_relation();
    let is_collection = field.is_collection();

    let related = match field.relation_target() {
        Some(target) if !is_collection => {
            let related = source.related(target);
            let exclude = field.pair().map(str::to_string);

            let fields = if visited.contains(&target) {
                None
            } else {
                Some(reflect_excluding(&related, exclude.as_deref(), visited)?)
            };

            Some(Related {
                source: related,
                exclude,
                fields,
            })
        }
        _ => None,
    };

    Ok(SourceField {
        name: field.name.clone(),
        attname: field.attname().map(str::to_string),
        // A reverse one-to-one may have no row on the other side
        is_nullable: field.nullable || matches!(field.ty, FieldTy::HasOne(_)),
        is_relation,
        is_collection,
        related,
    })
}

impl SourceFieldSet {
    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn get(&self, name: &str) -> Option<&SourceField> {
        self.fields.get(name).map(|field| &**field)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Lookup keys, aliases included, in model order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SourceField {
    pub fn is_single_relation(&self) -> bool {
        self.is_relation && !self.is_collection
    }

    /// Fields of the related source, reflecting them again if the relation
    /// closed a cycle.
    pub fn related_fields(&self) -> Result<Option<Cow<'_, SourceFieldSet>>> {
        let Some(related) = &self.related else {
            return Ok(None);
        };

        match &related.fields {
            Some(fields) => Ok(Some(Cow::Borrowed(fields))),
            None => reflect_excluding(&related.source, related.exclude.as_deref(), &mut vec![])
                .map(|fields| Some(Cow::Owned(fields))),
        }
    }
}
