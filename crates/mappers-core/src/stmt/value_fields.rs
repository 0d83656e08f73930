use super::{FromValue, Value};
use crate::{Entity, Error, Result};

use indexmap::IndexMap;

/// Named row values, in entity field declaration order.
///
/// Entities constructed by keyword receive their arguments this way: the
/// factory zips the declared field names with the positional row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueFields {
    fields: IndexMap<String, Value>,
}

impl ValueFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zips `names` with `values`, pairing them by position.
    pub fn zip<'a>(names: impl IntoIterator<Item = &'a str>, values: Vec<Value>) -> Self {
        Self {
            fields: names
                .into_iter()
                .map(str::to_string)
                .zip(values)
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Removes the named value and converts it.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T> {
        let value = self
            .fields
            .get_mut(name)
            .ok_or_else(|| Error::invalid_result(format!("no `{name}` value in row")))?;
        T::from_value(value.take())
    }

    /// Removes the named nested entity.
    pub fn take_entity<E: Entity>(&mut self, name: &str) -> Result<E> {
        match self.take::<Value>(name)? {
            Value::Entity(instance) => instance.downcast(),
            value => Err(Error::type_conversion(value, std::any::type_name::<E>())),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for ValueFields {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
