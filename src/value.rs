#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::{
    Span,
    array::Array,
    table::Table,
    time::{Date, DateTime, Time},
};
use std::fmt;

/// A table key along with the bytes of the source it was read from.
///
/// Quoted keys are stored after escape processing, so `"a.b"` and `a.b` are
/// different keys: the first has the name `a.b`, the second is a dotted path.
#[derive(Clone, Debug)]
pub struct Key {
    /// The key itself.
    pub name: String,
    /// Location of the key in the source.
    pub span: Span,
}

impl Key {
    pub fn new(name: impl Into<String>, span: Span) -> Key {
        Key {
            name: name.into(),
            span,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Keys compare by name only.
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Key {}

/// A parsed TOML value.
///
/// Integers and floats are separate variants and are never converted into
/// each other, so `1` and `1.0` stay distinguishable all the way to the
/// caller.
///
/// # Examples
///
/// ```
/// let table = toml_bridge::parse("x = 42\ny = 42.0")?;
/// assert_eq!(table.get("x").and_then(|v| v.as_integer()), Some(42));
/// assert_eq!(table.get("y").and_then(|v| v.as_integer()), None);
/// assert_eq!(table.get("y").map(|v| v.type_str()), Some("float"));
/// # Ok::<(), toml_bridge::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// A date, time and UTC offset, `1979-05-27T07:32:00Z`.
    OffsetDateTime(DateTime),
    /// A date and time without offset, `1979-05-27T07:32:00`.
    LocalDateTime(DateTime),
    LocalDate(Date),
    LocalTime(Time),
    Array(Array),
    Table(Table),
}

impl Value {
    /// Returns the TOML type name (e.g. `"string"`, `"integer"`, `"table"`).
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::OffsetDateTime(_) => "offset datetime",
            Value::LocalDateTime(_) => "local datetime",
            Value::LocalDate(_) => "local date",
            Value::LocalTime(_) => "local time",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a float value. Integers are not
    /// converted.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns any of the four temporal variants as a [`DateTime`].
    pub fn as_datetime(&self) -> Option<DateTime> {
        match self {
            Value::OffsetDateTime(dt) | Value::LocalDateTime(dt) => Some(*dt),
            Value::LocalDate(date) => Some(DateTime::from(*date)),
            Value::LocalTime(time) => Some(DateTime::from(*time)),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a table.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table()?.get(key)
    }

    /// The table a header may descend into: a table itself, or the last
    /// element of an array of tables.
    pub(crate) fn descend_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            Value::Array(a) if a.is_array_of_tables() => a.last_table_mut(),
            _ => None,
        }
    }
}

impl From<DateTime> for Value {
    /// Picks the variant matching the components present in `dt`.
    fn from(dt: DateTime) -> Self {
        match (dt.date(), dt.time(), dt.offset()) {
            (Some(_), Some(_), Some(_)) => Value::OffsetDateTime(dt),
            (Some(_), Some(_), None) => Value::LocalDateTime(dt),
            (Some(date), None, _) => Value::LocalDate(date),
            (None, Some(time), _) => Value::LocalTime(time),
            (None, None, _) => unreachable!("a date-time has a date or a time"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}
