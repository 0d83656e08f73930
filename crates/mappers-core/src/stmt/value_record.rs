use super::{FromValue, Value};
use crate::{Entity, Error, Result};

use std::ops;

/// One positional row: the values of a projection, or the arguments of an
/// entity constructor, in order.
#[derive(Debug, Default, Clone)]
pub struct ValueRecord {
    pub fields: Vec<Value>,
}

impl ValueRecord {
    pub fn from_vec(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    /// Takes the value at `index` and converts it, leaving `Null` behind.
    pub fn take<T: FromValue>(&mut self, index: usize) -> Result<T> {
        let len = self.fields.len();
        let value = self.fields.get_mut(index).ok_or_else(|| {
            Error::invalid_result(format!(
                "record has {len} fields; index {index} is out of bounds"
            ))
        })?;
        T::from_value(value.take())
    }

    /// Takes the nested entity at `index`.
    pub fn take_entity<E: Entity>(&mut self, index: usize) -> Result<E> {
        match self.take::<Value>(index)? {
            Value::Entity(instance) => instance.downcast(),
            value => Err(Error::type_conversion(value, std::any::type_name::<E>())),
        }
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.fields
    }
}

impl ops::Deref for ValueRecord {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.fields[..]
    }
}

impl ops::DerefMut for ValueRecord {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields[..]
    }
}

impl<'a> IntoIterator for &'a ValueRecord {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ValueRecord {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<Value> for ValueRecord {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl PartialEq for ValueRecord {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

/// Builds a [`ValueRecord`] from a list of expressions convertible into [`Value`].
///
/// ```
/// # use mappers_core::{record, stmt::Value};
/// let row = record![1_i64, "Alice", Option::<String>::None];
/// assert_eq!(row[1], Value::from("Alice"));
/// assert!(row[2].is_null());
/// ```
#[macro_export]
macro_rules! record {
    ( $( $value:expr ),* $(,)? ) => {
        $crate::stmt::ValueRecord::from_vec(vec![ $( $crate::stmt::Value::from($value) ),* ])
    };
}
