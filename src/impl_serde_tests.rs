use crate::{parse, parse_native};
use serde_json::json;

#[test]
fn native_scalars_and_containers() {
    let native = parse_native("b = true\na = [1, 2.5, 'x']\n[t]\nz = 0\ny = 1").unwrap();
    let json = serde_json::to_value(&native).unwrap();
    assert_eq!(
        json,
        json!({
            "b": true,
            "a": [1, 2.5, "x"],
            "t": { "z": 0, "y": 1 },
        })
    );
    // key order survives serialization
    assert_eq!(
        serde_json::to_string(&native).unwrap(),
        r#"{"b":true,"a":[1,2.5,"x"],"t":{"z":0,"y":1}}"#
    );
}

#[test]
fn integers_and_floats_stay_apart() {
    let native = parse_native("i = 1\nf = 1.0").unwrap();
    let json = serde_json::to_value(&native).unwrap();
    assert!(json["i"].is_i64());
    assert!(json["f"].is_f64());
}

#[test]
fn temporals_are_tagged() {
    let native = parse_native(
        "odt = 1979-05-27T07:32:00.25Z\nldt = 1979-05-27T07:32:00\nlt = 07:32:00\nneg = 2000-01-01T00:00:00-01:30",
    )
    .unwrap();
    let json = serde_json::to_value(&native).unwrap();
    assert_eq!(
        json["odt"],
        json!({
            "$kind": "offset-datetime",
            "value": "1979-05-27T07:32:00.25Z",
            "year": 1979, "month": 5, "day": 27,
            "hour": 7, "minute": 32, "second": 0, "nanosecond": 250_000_000,
            "offset_minutes": 0,
        })
    );
    assert_eq!(json["ldt"]["$kind"], "local-datetime");
    assert!(json["ldt"].get("offset_minutes").is_none());
    assert_eq!(
        json["lt"],
        json!({
            "$kind": "local-time",
            "value": "07:32:00",
            "hour": 7, "minute": 32, "second": 0, "nanosecond": 0,
        })
    );
    assert_eq!(json["neg"]["offset_minutes"], -90);
    assert_eq!(json["neg"]["value"], "2000-01-01T00:00:00-01:30");
}

#[test]
fn value_tree_matches_native() {
    let doc = "x = { y = [1979-05-27, 'q'] }\n[[z]]\nw = -3";
    let table = parse(doc).unwrap();
    let from_tree = serde_json::to_string(&table).unwrap();
    let from_native = serde_json::to_string(&parse_native(doc).unwrap()).unwrap();
    assert_eq!(from_tree, from_native);
}
