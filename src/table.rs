#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::{
    Span,
    array::Array,
    value::{Key, Value},
};

type TableEntry = (Key, Value);

/// Tables with at least this many entries keep a hash index of their keys.
const INDEXED_TABLE_THRESHOLD: usize = 6;

/// How a table came into existence, which decides how later parts of the
/// document may extend it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TableState {
    /// Created as an intermediate segment of a `[a.b.c]` header. A later
    /// header may still define it.
    Implicit,
    /// Created by a dotted key. Dotted keys may extend it, headers may not
    /// define it.
    Dotted,
    /// Defined by a `[header]`.
    Header,
    /// An inline `{ ... }` table, frozen once closed.
    Inline,
}

/// A TOML table: an ordered mapping from [`Key`] to [`Value`].
///
/// Entries stay in the order they appeared in the source and keys are unique.
/// `Table` is also the document type returned by [`parse`](crate::parse).
///
/// # Examples
///
/// ```
/// let table = toml_bridge::parse("b = 1\na = 2")?;
/// let keys: Vec<&str> = table.keys().collect();
/// assert_eq!(keys, ["b", "a"]);
/// # Ok::<(), toml_bridge::Error>(())
/// ```
#[derive(Clone)]
pub struct Table {
    entries: Vec<TableEntry>,
    index: Option<foldhash::HashMap<String, usize>>,
    state: TableState,
    span: Span,
}

impl Default for Table {
    fn default() -> Self {
        Table::new()
    }
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Table {
        Table::with_state(TableState::Implicit, Span::default())
    }

    pub(crate) fn with_state(state: TableState, span: Span) -> Table {
        Table {
            entries: Vec::new(),
            index: None,
            state,
            span,
        }
    }

    /// Where the table was defined: its header, inline braces or the key that
    /// created it.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub(crate) fn state(&self) -> TableState {
        self.state
    }

    /// Promotes an implicitly created table to one defined by `header`.
    pub(crate) fn define(&mut self, header: Span) {
        self.state = TableState::Header;
        self.span = header;
    }

    pub(crate) fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.find_index(name)?;
        Some(&self.entries[idx].1)
    }

    pub fn get_key_value(&self, name: &str) -> Option<(&Key, &Value)> {
        let idx = self.find_index(name)?;
        let (key, value) = &self.entries[idx];
        Some((key, value))
    }

    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    /// Returns a slice of all entries in source order.
    #[inline]
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Uses the hash index for tables at or above the threshold, otherwise
    /// falls back to a linear scan.
    pub(crate) fn find_index(&self, name: &str) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(name).copied(),
            None => self.entries.iter().position(|(k, _)| k.name == name),
        }
    }

    #[inline]
    pub(crate) fn key_at(&self, idx: usize) -> &Key {
        &self.entries[idx].0
    }

    #[inline]
    pub(crate) fn value_at_mut(&mut self, idx: usize) -> &mut Value {
        &mut self.entries[idx].1
    }

    /// Appends an entry and returns its index. Does **not** check for
    /// duplicates.
    pub(crate) fn insert(&mut self, key: Key, value: Value) -> usize {
        debug_assert!(self.find_index(&key.name).is_none());
        let idx = self.entries.len();
        if let Some(index) = &mut self.index {
            index.insert(key.name.clone(), idx);
        } else if idx + 1 >= INDEXED_TABLE_THRESHOLD {
            let mut index = foldhash::HashMap::default();
            index.reserve(INDEXED_TABLE_THRESHOLD * 2);
            for (i, (k, _)) in self.entries.iter().enumerate() {
                index.insert(k.name.clone(), i);
            }
            index.insert(key.name.clone(), idx);
            self.index = Some(index);
        }
        self.entries.push((key, value));
        idx
    }

    /// Inserts a child table and returns it.
    pub(crate) fn insert_table(&mut self, key: Key, table: Table) -> &mut Table {
        let idx = self.insert(key, Value::Table(table));
        match &mut self.entries[idx].1 {
            Value::Table(t) => t,
            _ => unreachable!("a table was just inserted"),
        }
    }

    /// Inserts a new array of tables holding `first` and returns `first`.
    pub(crate) fn insert_array_of_tables(&mut self, key: Key, first: Table) -> &mut Table {
        let idx = self.insert(key, Value::Array(Array::of_tables(first)));
        match &mut self.entries[idx].1 {
            Value::Array(a) => match a.last_table_mut() {
                Some(t) => t,
                None => unreachable!("array of tables starts with a table"),
            },
            _ => unreachable!("an array was just inserted"),
        }
    }
}

/// Tables compare by their entries, in order.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.entries {
            map.entry(&k.name, v);
        }
        map.finish()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a TableEntry;
    type IntoIter = std::slice::Iter<'a, TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Table {
    type Item = TableEntry;
    type IntoIter = std::vec::IntoIter<TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
