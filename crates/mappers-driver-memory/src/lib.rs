mod lookup;
pub use lookup::Lookup;

mod projection;
pub use projection::MemoryProjection;

mod query;
pub use query::Query;

use indexmap::IndexMap;
use mappers_core::{
    schema::source::{FieldTy, ModelId},
    stmt::Value,
    Error, Result, Schema,
};
use std::sync::Arc;
use tracing::trace;

/// Rows of every model of a schema, held in memory.
///
/// Rows are keyed by column: primitive fields by name and relations stored on
/// the model by their foreign key column. Queries resolve relation lookups
/// written the Django way, `user__name`.
#[derive(Debug)]
pub struct Memory {
    schema: Arc<Schema>,
    tables: IndexMap<ModelId, Vec<Row>>,
}

pub(crate) type Row = IndexMap<String, Value>;

impl Memory {
    pub fn new(schema: &Arc<Schema>) -> Self {
        Self {
            schema: schema.clone(),
            tables: IndexMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Inserts a row; columns left out are `NULL`.
    pub fn insert<K, V>(
        &mut self,
        model: ModelId,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<()>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let model = self.schema.source(model).model()?.clone();

        let mut row: Row = model
            .fields
            .iter()
            .filter_map(|field| match &field.ty {
                FieldTy::Primitive(_) => Some(field.name.clone()),
                FieldTy::BelongsTo(belongs_to) => Some(belongs_to.foreign_key.clone()),
                _ => None,
            })
            .map(|column| (column, Value::Null))
            .collect();

        for (column, value) in values {
            let column = column.into();

            let Some(slot) = row.get_mut(&column) else {
                return Err(Error::unknown_source_field(column, &model.name));
            };

            *slot = value.into();
        }

        for field in model.fields.iter().filter(|field| !field.nullable) {
            let column = field.attname().unwrap_or(&field.name);
            if row.get(column).is_some_and(Value::is_null) {
                return Err(Error::invalid_result(format!(
                    "`{}.{}` is not nullable",
                    model.name, column
                )));
            }
        }

        trace!(model = %model.name, "inserted row");
        self.tables.entry(model.id).or_default().push(row);
        Ok(())
    }

    /// Starts a query over every row of `model`.
    pub fn query(&self, model: ModelId) -> Query<'_> {
        Query::new(self, model)
    }

    pub(crate) fn rows(&self, model: ModelId) -> &[Row] {
        self.tables.get(&model).map(Vec::as_slice).unwrap_or_default()
    }
}
