use crate::lookup::equal;
use crate::{Lookup, Memory, MemoryProjection};
use mappers_core::schema::source::ModelId;
use mappers_core::stmt::{ColumnRef, Value, ValueRecord};
use mappers_core::{QuerySet, Result};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type Annotation<'a> = Arc<dyn Fn(&Lookup<'_>) -> Result<Value> + 'a>;

/// A lazily evaluated query over the rows of one model.
#[derive(Clone)]
pub struct Query<'a> {
    db: &'a Memory,
    model: ModelId,
    filters: Vec<(String, Value)>,
    annotations: Vec<(String, Annotation<'a>)>,
    order_by: Vec<(String, bool)>,
}

impl<'a> Query<'a> {
    pub(crate) fn new(db: &'a Memory, model: ModelId) -> Self {
        Self {
            db,
            model,
            filters: vec![],
            annotations: vec![],
            order_by: vec![],
        }
    }

    /// Keeps rows where `lookup` equals `value`.
    pub fn filter(mut self, lookup: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((lookup.into(), value.into()));
        self
    }

    /// Adds a computed column named `name`.
    pub fn annotate(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Lookup<'_>) -> Result<Value> + 'a,
    ) -> Self {
        let f: Annotation<'a> = Arc::new(f);
        self.annotations.push((name.into(), f));
        self
    }

    pub fn order_by(mut self, lookup: impl Into<String>) -> Self {
        self.order_by.push((lookup.into(), false));
        self
    }

    pub fn order_by_desc(mut self, lookup: impl Into<String>) -> Self {
        self.order_by.push((lookup.into(), true));
        self
    }

    pub(crate) fn model_name(&self) -> &str {
        self.db
            .schema()
            .model(self.model)
            .map(|model| model.name.as_str())
            .unwrap_or("<unknown>")
    }

    /// Evaluates the query, producing one record per matching row with one
    /// value per column.
    pub(crate) fn evaluate(&self, columns: &[ColumnRef]) -> Result<Vec<ValueRecord>> {
        let source = self.db.schema().source(self.model);
        let model = source.model()?;

        let mut matched = vec![];

        for row in self.db.rows(self.model) {
            let lookup = Lookup::new(self.db, model, row);

            let mut keep = true;
            for (path, expected) in &self.filters {
                if !equal(&self.value(&lookup, &split(path))?, expected) {
                    keep = false;
                    break;
                }
            }

            if keep {
                let keys = self
                    .order_by
                    .iter()
                    .map(|(path, _)| self.value(&lookup, &split(path)))
                    .collect::<Result<Vec<_>>>()?;
                matched.push((keys, lookup));
            }
        }

        matched.sort_by(|(lhs, _), (rhs, _)| {
            lhs.iter()
                .zip(rhs)
                .zip(&self.order_by)
                .map(|((lhs, rhs), (_, desc))| match desc {
                    true => compare(rhs, lhs),
                    false => compare(lhs, rhs),
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        let records = matched
            .iter()
            .map(|(_, lookup)| {
                columns
                    .iter()
                    .map(|column| self.value(lookup, column.segments()))
                    .collect::<Result<ValueRecord>>()
            })
            .collect::<Result<Vec<_>>>()?;

        trace!(
            model = self.model_name(),
            columns = columns.len(),
            rows = records.len(),
            "evaluated query"
        );

        Ok(records)
    }

    /// Annotations shadow fields of the same name.
    fn value<S: AsRef<str>>(&self, lookup: &Lookup<'_>, segments: &[S]) -> Result<Value> {
        if let [name] = segments {
            let annotation = self
                .annotations
                .iter()
                .find(|(annotation, _)| annotation == name.as_ref());

            if let Some((_, f)) = annotation {
                return f(lookup);
            }
        }

        lookup.resolve(segments)
    }
}

impl<'a> QuerySet for Query<'a> {
    type Projection = MemoryProjection<'a>;

    fn values_list(self, columns: &[ColumnRef]) -> Result<MemoryProjection<'a>> {
        Ok(MemoryProjection::new(self, columns.to_vec()))
    }
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("model", &self.model_name())
            .field("filters", &self.filters)
            .field(
                "annotations",
                &self.annotations.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("order_by", &self.order_by)
            .finish()
    }
}

fn split(lookup: &str) -> Vec<&str> {
    lookup.split("__").collect()
}

/// `NULL` sorts first; values of different kinds compare equal.
fn compare(lhs: &Value, rhs: &Value) -> Ordering {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(lhs), Value::Bool(rhs)) => lhs.cmp(rhs),
        (Value::String(lhs), Value::String(rhs)) => lhs.cmp(rhs),
        (Value::F64(lhs), Value::F64(rhs)) => lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal),
        _ => match (lhs.as_i64(), rhs.as_i64()) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => Ordering::Equal,
        },
    }
}
