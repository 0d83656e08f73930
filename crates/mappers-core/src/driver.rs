//! The contract mappers expect from the query collaborator.
//!
//! A reader's wrapped function returns a [`QuerySet`]. The reader narrows it
//! to the mapper's column list with [`QuerySet::values_list`] and then pulls
//! rows out of the resulting [`Projection`] according to the declared result
//! shape.

use crate::stmt::{ColumnRef, ValueRecord};
use crate::{Error, Result};

/// A lazily evaluated set of rows of one source.
pub trait QuerySet {
    type Projection: Projection;

    /// Narrows the query to `columns`, in that order.
    ///
    /// Path columns (`a__b__c`) follow single-valued relations. A path ending
    /// on a relation yields that relation's key.
    fn values_list(self, columns: &[ColumnRef]) -> Result<Self::Projection>;
}

/// A query narrowed to an ordered column list.
///
/// Every record produced has exactly one value per column, in column order.
pub trait Projection: Sized {
    type Rows: Iterator<Item = Result<ValueRecord>>;

    fn columns(&self) -> &[ColumnRef];

    /// Evaluates the query.
    fn rows(self) -> Result<Self::Rows>;

    /// Returns the single matching row.
    ///
    /// Fails with a record-not-found error when nothing matches and with a
    /// too-many-records error when more than one row does.
    fn get(self) -> Result<ValueRecord> {
        let mut rows = self.rows()?;

        let Some(row) = rows.next() else {
            return Err(Error::record_not_found("query matched no rows"));
        };

        if rows.next().is_some() {
            return Err(Error::too_many_records("query matched more than one row"));
        }

        row
    }

    /// Returns the first matching row, if any.
    fn first(self) -> Result<Option<ValueRecord>> {
        self.rows()?.next().transpose()
    }
}
