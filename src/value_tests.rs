use super::*;
use crate::time::{Offset, TemporalKind};

#[test]
fn type_names() {
    let cases = [
        (Value::from("s"), "string"),
        (Value::from(1), "integer"),
        (Value::from(1.0), "float"),
        (Value::from(true), "boolean"),
        (Value::from(Array::new()), "array"),
        (Value::from(Table::new()), "table"),
    ];
    for (value, name) in cases {
        assert_eq!(value.type_str(), name);
    }
}

#[test]
fn integers_and_floats_stay_distinct() {
    let int = Value::Integer(1);
    let float = Value::Float(1.0);
    assert_ne!(int, float);
    assert_eq!(int.as_integer(), Some(1));
    assert_eq!(int.as_float(), None);
    assert_eq!(float.as_float(), Some(1.0));
    assert_eq!(float.as_integer(), None);
}

#[test]
fn accessors_reject_other_types() {
    let s = Value::String("hello".into());
    assert_eq!(s.as_str(), Some("hello"));
    assert!(s.as_bool().is_none());
    assert!(s.as_array().is_none());
    assert!(s.as_table().is_none());
    assert!(s.as_datetime().is_none());
    assert!(s.get("x").is_none());

    assert_eq!(Value::Boolean(false).as_bool(), Some(false));
}

#[test]
fn datetimes_map_to_their_variant() {
    let value = Value::from(DateTime::decode("1979-05-27T07:32:00Z").unwrap());
    assert!(matches!(value, Value::OffsetDateTime(_)));
    assert_eq!(value.type_str(), "offset datetime");
    assert_eq!(value.as_datetime().unwrap().offset(), Some(Offset::Z));

    let value = Value::from(DateTime::decode("1979-05-27T07:32:00").unwrap());
    assert!(matches!(value, Value::LocalDateTime(_)));

    let value = Value::from(DateTime::decode("1979-05-27").unwrap());
    let Value::LocalDate(date) = value else {
        panic!("expected a local date, got {value:?}");
    };
    assert_eq!((date.year, date.month, date.day), (1979, 5, 27));
    assert_eq!(value.as_datetime().unwrap().to_string(), "1979-05-27");

    let value = Value::from(DateTime::decode("07:32:00.5").unwrap());
    let Value::LocalTime(time) = value else {
        panic!("expected a local time, got {value:?}");
    };
    assert_eq!(time.nanosecond, 500_000_000);
    assert_eq!(value.as_datetime().unwrap().kind(), TemporalKind::LocalTime);
}

#[test]
fn descend_mut_targets() {
    let mut table = Value::Table(Table::new());
    assert!(table.descend_mut().is_some());

    let mut aot = Value::Array(Array::of_tables(Table::new()));
    assert!(aot.descend_mut().is_some());

    let mut plain = Value::Array(Array::from(vec![Value::Table(Table::new())]));
    assert!(plain.descend_mut().is_none());

    assert!(Value::Integer(0).descend_mut().is_none());
}

#[test]
fn keys_compare_by_name() {
    let a = Key::new("name", crate::Span::new(0, 4));
    let b = Key::new("name", crate::Span::new(10, 14));
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "name");
    assert_ne!(a, Key::new("other", crate::Span::new(0, 5)));
}
