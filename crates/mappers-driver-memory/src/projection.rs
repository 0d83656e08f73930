use crate::Query;
use mappers_core::stmt::{ColumnRef, ValueRecord};
use mappers_core::{Error, Projection, Result};

/// A [`Query`] narrowed to a column list.
#[derive(Debug, Clone)]
pub struct MemoryProjection<'a> {
    query: Query<'a>,
    columns: Vec<ColumnRef>,
}

impl<'a> MemoryProjection<'a> {
    pub(crate) fn new(query: Query<'a>, columns: Vec<ColumnRef>) -> Self {
        Self { query, columns }
    }

    pub fn query(&self) -> &Query<'a> {
        &self.query
    }

    /// The column list in the `values_list` spelling, `a__b`.
    pub fn lookups(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.join("__")).collect()
    }
}

impl Projection for MemoryProjection<'_> {
    type Rows = std::vec::IntoIter<Result<ValueRecord>>;

    fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    fn rows(self) -> Result<Self::Rows> {
        let records = self.query.evaluate(&self.columns)?;
        Ok(records.into_iter().map(Ok).collect::<Vec<_>>().into_iter())
    }

    fn get(self) -> Result<ValueRecord> {
        let mut records = self.query.evaluate(&self.columns)?;
        let context = format!("model={}", self.query.model_name());

        match records.len() {
            0 => Err(Error::record_not_found(context)),
            1 => Ok(records.remove(0)),
            n => Err(Error::too_many_records(format!("{context}; rows={n}"))),
        }
    }
}
