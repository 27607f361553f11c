#[cfg(test)]
#[path = "./array_tests.rs"]
mod tests;

use crate::{table::Table, value::Value};

/// An ordered list of TOML [`Value`]s.
///
/// Arrays built from repeated `[[name]]` headers are marked as arrays of
/// tables; only those can be extended by later headers. The marker does not
/// take part in equality.
#[derive(Clone, Debug, Default)]
pub struct Array {
    values: Vec<Value>,
    of_tables: bool,
}

impl Array {
    /// Creates an empty array.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Array {
            values: Vec::with_capacity(cap),
            of_tables: false,
        }
    }

    /// Creates an array-of-tables holding `first`, as opened by a `[[name]]`
    /// header.
    pub(crate) fn of_tables(first: Table) -> Self {
        Array {
            values: vec![Value::Table(first)],
            of_tables: true,
        }
    }

    /// Appends a value to the end of the array.
    #[inline]
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Appends a table and returns it.
    pub(crate) fn push_table(&mut self, table: Table) -> &mut Table {
        self.values.push(Value::Table(table));
        match self.values.last_mut() {
            Some(Value::Table(t)) => t,
            _ => unreachable!("a table was just pushed"),
        }
    }

    pub(crate) fn last_table_mut(&mut self) -> Option<&mut Table> {
        match self.values.last_mut() {
            Some(Value::Table(t)) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Whether this array was defined with `[[name]]` headers.
    #[inline]
    pub fn is_array_of_tables(&self) -> bool {
        self.of_tables
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array {
            values,
            of_tables: false,
        }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl std::ops::Index<usize> for Array {
    type Output = Value;

    #[inline]
    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}
