#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] for the value tree and its [`Native`]
//! projection.
//!
//! Scalars, arrays and tables map onto the serde data model directly, keeping
//! key order. Temporal values have no serde counterpart and are written as a
//! map tagged with `"$kind"`:
//!
//! ```
//! let native = toml_bridge::parse_native("when = 1979-05-27")?;
//! let json = serde_json::to_string(&native).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"when":{"$kind":"local-date","value":"1979-05-27","year":1979,"month":5,"day":27}}"#
//! );
//! # Ok::<(), toml_bridge::Error>(())
//! ```

#[cfg(test)]
#[path = "./impl_serde_tests.rs"]
mod tests;

use crate::{Array, DateTime, Native, Table, Value};
use serde::ser::{SerializeMap, SerializeSeq};

impl serde::Serialize for DateTime {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let date = self.date();
        let time = self.time();
        let offset = self.offset();
        let len = 2
            + date.map_or(0, |_| 3)
            + time.map_or(0, |_| 4)
            + offset.map_or(0, |_| 1);
        let mut map = ser.serialize_map(Some(len))?;
        map.serialize_entry("$kind", self.kind().as_str())?;
        map.serialize_entry("value", &self.to_string())?;
        if let Some(date) = date {
            map.serialize_entry("year", &date.year)?;
            map.serialize_entry("month", &date.month)?;
            map.serialize_entry("day", &date.day)?;
        }
        if let Some(time) = time {
            map.serialize_entry("hour", &time.hour)?;
            map.serialize_entry("minute", &time.minute)?;
            map.serialize_entry("second", &time.second)?;
            map.serialize_entry("nanosecond", &time.nanosecond)?;
        }
        if let Some(offset) = offset {
            map.serialize_entry("offset_minutes", &offset.minutes())?;
        }
        map.end()
    }
}

impl serde::Serialize for Native {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Native::Text(s) => ser.serialize_str(s),
            Native::Int(i) => ser.serialize_i64(*i),
            Native::Float(f) => ser.serialize_f64(*f),
            Native::Bool(b) => ser.serialize_bool(*b),
            Native::Temporal(dt) => dt.serialize(ser),
            Native::Seq(seq) => {
                let mut out = ser.serialize_seq(Some(seq.len()))?;
                for ele in seq {
                    out.serialize_element(ele)?;
                }
                out.end()
            }
            Native::Map(map) => {
                let mut out = ser.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::String(s) => ser.serialize_str(s),
            Value::Integer(i) => ser.serialize_i64(*i),
            Value::Float(f) => ser.serialize_f64(*f),
            Value::Boolean(b) => ser.serialize_bool(*b),
            Value::OffsetDateTime(dt) | Value::LocalDateTime(dt) => dt.serialize(ser),
            Value::LocalDate(date) => DateTime::from(*date).serialize(ser),
            Value::LocalTime(time) => DateTime::from(*time).serialize(ser),
            Value::Array(arr) => arr.serialize(ser),
            Value::Table(tab) => tab.serialize(ser),
        }
    }
}

impl serde::Serialize for Array {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = ser.serialize_seq(Some(self.len()))?;
        for ele in self {
            seq.serialize_element(ele)?;
        }
        seq.end()
    }
}

impl serde::Serialize for Table {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = ser.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k.as_str(), v)?;
        }
        map.end()
    }
}
