#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_bridge::{DateTime, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let bridge_result = toml_bridge::parse(text);
    let toml_result = text.parse::<toml::Table>();

    match (bridge_result, toml_result) {
        (Ok(table), Ok(toml_tbl)) => {
            let bridge_val = Value::Table(table);
            let toml_val = toml::Value::Table(toml_tbl);
            assert!(
                values_match(&bridge_val, &toml_val),
                "values differ for input:\n{text}\nbridge: {bridge_val:?}\ntoml: {toml_val:?}"
            );
        }
        (Ok(table), Err(toml_err)) => {
            panic!(
                "toml-bridge accepted but toml rejected!\n\
                 input:\n{text}\n\
                 bridge: {table:?}\n\
                 toml error: {toml_err}"
            );
        }
        (Err(bridge_err), Ok(toml_tbl)) => {
            // the nesting limit is the only intended difference
            assert!(
                bridge_err.kind == toml_bridge::ErrorKind::TooDeep,
                "toml accepted but toml-bridge rejected!\n\
                 input:\n{text}\n\
                 toml: {toml_tbl:?}\n\
                 bridge error: {bridge_err:?}"
            );
        }
        (Err(_), Err(_)) => {}
    }
});

fn datetimes_match(dt: &DateTime, toml_dt: &toml::value::Datetime) -> bool {
    match DateTime::decode(&toml_dt.to_string()) {
        Some(other) => {
            dt.date() == other.date()
                && dt.offset().map(|o| o.minutes()) == other.offset().map(|o| o.minutes())
                && dt.time().map(|t| (t.hour, t.minute, t.second, t.nanosecond))
                    == other.time().map(|t| (t.hour, t.minute, t.second, t.nanosecond))
        }
        None => false,
    }
}

fn values_match(bridge: &Value, toml_val: &toml::Value) -> bool {
    match (bridge, toml_val) {
        (Value::String(s), toml::Value::String(t)) => s == t,
        (Value::Integer(a), toml::Value::Integer(b)) => a == b,
        (Value::Float(a), toml::Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
        (Value::Boolean(a), toml::Value::Boolean(b)) => a == b,
        (Value::OffsetDateTime(dt) | Value::LocalDateTime(dt), toml::Value::Datetime(t)) => {
            datetimes_match(dt, t)
        }
        (Value::LocalDate(d), toml::Value::Datetime(t)) => datetimes_match(&DateTime::from(*d), t),
        (Value::LocalTime(lt), toml::Value::Datetime(t)) => {
            datetimes_match(&DateTime::from(*lt), t)
        }
        (Value::Array(sa), toml::Value::Array(ta)) => {
            sa.len() == ta.len() && sa.iter().zip(ta.iter()).all(|(s, t)| values_match(s, t))
        }
        (Value::Table(st), toml::Value::Table(tt)) => {
            st.len() == tt.len()
                && st
                    .iter()
                    .zip(tt.iter())
                    .all(|((sk, sv), (tk, tv))| sk.as_str() == tk && values_match(sv, tv))
        }
        _ => false,
    }
}
