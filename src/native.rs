//! Projection of a parsed document into host-neutral containers.
//!
//! [`Native`] is what a caller outside of this crate consumes: plain ordered
//! maps and vectors with one scalar case per TOML type. Integers and floats
//! stay distinct, and temporal values keep their [`TemporalKind`] through
//! [`DateTime`].

#[cfg(test)]
#[path = "./native_tests.rs"]
mod tests;

use crate::{
    error::Error,
    parser::{self, ParseOptions},
    table::Table,
    time::{DateTime, TemporalKind},
    value::{Key, Value},
};
use indexmap::IndexMap;

/// A translated TOML value.
#[derive(Clone, Debug, PartialEq)]
pub enum Native {
    /// A table, keys in source order.
    Map(IndexMap<String, Native>),
    Seq(Vec<Native>),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Any of the four date/time kinds.
    Temporal(DateTime),
}

impl Native {
    /// Name of the TOML type this value was translated from.
    pub fn type_str(&self) -> &'static str {
        match self {
            Native::Map(_) => "table",
            Native::Seq(_) => "array",
            Native::Text(_) => "string",
            Native::Int(_) => "integer",
            Native::Float(_) => "float",
            Native::Bool(_) => "boolean",
            Native::Temporal(dt) => match dt.kind() {
                TemporalKind::OffsetDateTime => "offset datetime",
                TemporalKind::LocalDateTime => "local datetime",
                TemporalKind::LocalDate => "local date",
                TemporalKind::LocalTime => "local time",
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Native::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Native::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Only float values; integers are not widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Native::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Native::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<&DateTime> {
        match self {
            Native::Temporal(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Native>> {
        match self {
            Native::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Native]> {
        match self {
            Native::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// Looks up `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&Native> {
        self.as_map()?.get(key)
    }
}

/// A container being filled, together with the entries still to visit.
enum Frame<'a> {
    Map {
        entries: std::slice::Iter<'a, (Key, Value)>,
        map: IndexMap<String, Native>,
        /// Key this map is stored under in its parent, empty inside arrays.
        key: &'a str,
    },
    Seq {
        values: std::slice::Iter<'a, Value>,
        seq: Vec<Native>,
        key: &'a str,
    },
}

impl<'a> Frame<'a> {
    fn map(table: &'a Table, key: &'a str) -> Self {
        Frame::Map {
            entries: table.iter(),
            map: IndexMap::with_capacity(table.len()),
            key,
        }
    }

    fn next(&mut self) -> Option<(&'a str, &'a Value)> {
        match self {
            Frame::Map { entries, .. } => entries.next().map(|(k, v)| (k.as_str(), v)),
            Frame::Seq { values, .. } => values.next().map(|v| ("", v)),
        }
    }

    fn attach(&mut self, key: &str, value: Native) {
        match self {
            Frame::Map { map, .. } => {
                map.insert(key.to_owned(), value);
            }
            Frame::Seq { seq, .. } => seq.push(value),
        }
    }

    fn finish(self) -> (&'a str, Native) {
        match self {
            Frame::Map { map, key, .. } => (key, Native::Map(map)),
            Frame::Seq { seq, key, .. } => (key, Native::Seq(seq)),
        }
    }
}

/// Translates a parsed document into [`Native`] containers.
///
/// The walk uses an explicit stack, so it cannot fail and its stack use does
/// not grow with nesting depth.
///
/// ```
/// use toml_bridge::Native;
///
/// let table = toml_bridge::parse("a = 1\nb = 1.0")?;
/// let native = toml_bridge::translate(&table);
/// assert_eq!(native.get("a"), Some(&Native::Int(1)));
/// assert_eq!(native.get("b"), Some(&Native::Float(1.0)));
/// # Ok::<(), toml_bridge::Error>(())
/// ```
pub fn translate(document: &Table) -> Native {
    let mut current = Frame::map(document, "");
    let mut stack: Vec<Frame<'_>> = Vec::new();
    loop {
        match current.next() {
            Some((key, Value::Table(table))) => {
                let child = Frame::map(table, key);
                stack.push(std::mem::replace(&mut current, child));
            }
            Some((key, Value::Array(array))) => {
                let child = Frame::Seq {
                    values: array.iter(),
                    seq: Vec::with_capacity(array.len()),
                    key,
                };
                stack.push(std::mem::replace(&mut current, child));
            }
            Some((key, scalar)) => current.attach(key, translate_scalar(scalar)),
            None => {
                let Some(parent) = stack.pop() else {
                    return current.finish().1;
                };
                let (key, done) = std::mem::replace(&mut current, parent).finish();
                current.attach(key, done);
            }
        }
    }
}

fn translate_scalar(value: &Value) -> Native {
    match value {
        Value::String(s) => Native::Text(s.clone()),
        Value::Integer(i) => Native::Int(*i),
        Value::Float(f) => Native::Float(*f),
        Value::Boolean(b) => Native::Bool(*b),
        Value::OffsetDateTime(dt) | Value::LocalDateTime(dt) => Native::Temporal(*dt),
        Value::LocalDate(date) => Native::Temporal(DateTime::from(*date)),
        Value::LocalTime(time) => Native::Temporal(DateTime::from(*time)),
        Value::Array(_) | Value::Table(_) => {
            unreachable!("containers are pushed as frames by translate")
        }
    }
}

/// Parses `source` and translates the result in one step.
///
/// ```
/// let native = toml_bridge::parse_native("[pkg]\nname = 'demo'")?;
/// assert_eq!(native.get("pkg").and_then(|p| p.get("name")).and_then(|n| n.as_str()), Some("demo"));
/// # Ok::<(), toml_bridge::Error>(())
/// ```
pub fn parse_native(source: &str) -> Result<Native, Error> {
    let document = parser::parse(source)?;
    Ok(translate(&document))
}

/// Like [`parse_native`] for a raw byte buffer, which must be UTF-8.
pub fn parse_native_slice(bytes: &[u8]) -> Result<Native, Error> {
    parse_native_slice_with(bytes, &ParseOptions::default())
}

/// Like [`parse_native_slice`] with explicit limits.
pub fn parse_native_slice_with(bytes: &[u8], options: &ParseOptions) -> Result<Native, Error> {
    let document = parser::from_slice_with(bytes, options)?;
    Ok(translate(&document))
}
