use crate::{Memory, Row};
use mappers_core::schema::source::{FieldTy, Model, ModelId};
use mappers_core::stmt::Value;
use mappers_core::{Error, Result};

/// One row of a query, as seen by filters, orderings and annotations.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    db: &'a Memory,
    model: &'a Model,
    row: &'a Row,
}

impl<'a> Lookup<'a> {
    pub(crate) fn new(db: &'a Memory, model: &'a Model, row: &'a Row) -> Self {
        Self { db, model, row }
    }

    /// Resolves a `__`-separated lookup on this row.
    pub fn get(&self, lookup: &str) -> Result<Value> {
        let segments: Vec<&str> = lookup.split("__").collect();
        self.resolve(&segments)
    }

    /// Resolves a lookup given as segments.
    ///
    /// Single-valued relations are followed through their keys and a missing
    /// related row yields `NULL`. A lookup ending on a relation yields the
    /// related row's key.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<Value> {
        let Some((first, rest)) = segments.split_first() else {
            return Err(Error::invalid_result("empty lookup"));
        };
        let first = first.as_ref();

        let Some(field) = self.model.field(first) else {
            return Err(Error::unknown_source_field(first, &self.model.name));
        };

        // Foreign key column, or plain column
        if field.attname() == Some(first) || field.ty.is_primitive() {
            if !rest.is_empty() {
                return Err(Error::path_not_a_relation(
                    joined(segments),
                    first,
                    &self.model.name,
                ));
            }

            let column = field.attname().unwrap_or(&field.name);
            return Ok(self.row.get(column).cloned().unwrap_or_default());
        }

        let related = match &field.ty {
            FieldTy::BelongsTo(belongs_to) => {
                let key = self.row.get(&belongs_to.foreign_key).cloned().unwrap_or_default();
                if key.is_null() {
                    None
                } else {
                    self.find(belongs_to.target, |target, row| {
                        Ok(row.get(primary_key_column(target)?).is_some_and(|pk| equal(pk, &key)))
                    })?
                }
            }
            FieldTy::HasOne(has_one) => {
                let key = self.key()?;
                self.find(has_one.target, |target, row| {
                    let foreign_key = target
                        .field(&has_one.pair)
                        .and_then(|pair| pair.attname())
                        .ok_or_else(|| {
                            Error::related_field_not_relation(&has_one.pair, &target.name)
                        })?;
                    Ok(row.get(foreign_key).is_some_and(|fk| equal(fk, &key)))
                })?
            }
            _ => {
                return Err(Error::path_is_collection(
                    joined(segments),
                    first,
                    &self.model.name,
                ))
            }
        };

        match related {
            None => Ok(Value::Null),
            Some(related) if rest.is_empty() => related.key(),
            Some(related) => related.resolve(rest),
        }
    }

    /// The row's primary key.
    pub fn key(&self) -> Result<Value> {
        let column = primary_key_column(self.model)?;
        Ok(self.row.get(column).cloned().unwrap_or_default())
    }

    /// Finds the first row of `target` matching `f`.
    fn find(
        &self,
        target: ModelId,
        f: impl Fn(&Model, &Row) -> Result<bool>,
    ) -> Result<Option<Lookup<'a>>> {
        let Some(target) = self.db.schema().model(target) else {
            return Err(Error::unsupported_source_kind(format!(
                "model {target} is not part of the schema"
            )));
        };

        for row in self.db.rows(target.id) {
            if f(target, row)? {
                return Ok(Some(Lookup::new(self.db, target, row)));
            }
        }

        Ok(None)
    }
}

fn primary_key_column(model: &Model) -> Result<&str> {
    model
        .primary_key()
        .map(|field| field.name.as_str())
        .ok_or_else(|| Error::invalid_schema(format!("`{}` has no primary key", model.name)))
}

/// Integers compare by value whatever their width.
pub(crate) fn equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs.as_i64(), rhs.as_i64()) {
        (Some(lhs), Some(rhs)) => lhs == rhs,
        _ => lhs == rhs,
    }
}

fn joined<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("__")
}
