use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use toml_bridge::{ErrorCategory, ErrorKind, Native, parse, parse_native, translate};

fn map<const N: usize>(entries: [(&str, Native); N]) -> Native {
    Native::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<IndexMap<_, _>>(),
    )
}

#[test]
fn flat_pairs() {
    assert_eq!(
        parse_native("a = 1\nb = 2").unwrap(),
        map([("a", Native::Int(1)), ("b", Native::Int(2))])
    );
}

#[test]
fn dotted_key_nests() {
    assert_eq!(
        parse_native("a.b.c = 1").unwrap(),
        map([("a", map([("b", map([("c", Native::Int(1))]))]))])
    );
}

#[test]
fn duplicate_key_is_semantic() {
    let err = parse_native("a = 1\na = 2").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Semantic);
    let ErrorKind::DuplicateKey { key, .. } = &err.kind else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(key, "a");
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.column(), Some(1));
}

#[test]
fn array_of_tables() {
    assert_eq!(
        parse_native("[[arr]]\nx = 1\n[[arr]]\nx = 2").unwrap(),
        map([(
            "arr",
            Native::Seq(vec![
                map([("x", Native::Int(1))]),
                map([("x", Native::Int(2))]),
            ])
        )])
    );
}

#[test]
fn sub_table_header() {
    assert_eq!(
        parse_native("[t]\na = 1\n[t.b]\nc = 2").unwrap(),
        map([(
            "t",
            map([("a", Native::Int(1)), ("b", map([("c", Native::Int(2))]))])
        )])
    );
}

#[test]
fn number_kinds() {
    assert_eq!(parse_native("n = 0x1A").unwrap(), map([("n", Native::Int(26))]));
    assert_eq!(parse_native("f = 1e10").unwrap(), map([("f", Native::Float(1e10))]));

    let n = parse_native("i = 1\nf = 1.0").unwrap();
    assert_ne!(n.get("i"), n.get("f"));
    assert_eq!(n.get("i").map(Native::type_str), Some("integer"));
    assert_eq!(n.get("f").map(Native::type_str), Some("float"));
}

#[test]
fn duplicates_always_fail() {
    let docs = [
        "a = 1\na = 1",
        "[t]\nx = 1\nx = 2",
        "t = { x = 1, x = 2 }",
        "[[a]]\nb = 1\nb = 2",
        "a.b = 1\na.b = 2",
        "'a' = 1\n\"a\" = 2",
        "a = 1\n\"\\u0061\" = 2",
    ];
    for doc in docs {
        let err = parse(doc).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Semantic, "{doc:?}");
    }
}

#[test]
fn order_matches_source() {
    let doc = "\
z = 1
m = [3, 2, 1]
a = { y = 1, b = 2 }

[q]
k9 = 0
k1 = 0

[[c]]
second = 2
first = 1
";
    let native = parse_native(doc).unwrap();
    let keys = |n: &Native| -> Vec<String> { n.as_map().unwrap().keys().cloned().collect() };
    assert_eq!(keys(&native), ["z", "m", "a", "q", "c"]);
    assert_eq!(keys(native.get("a").unwrap()), ["y", "b"]);
    assert_eq!(keys(native.get("q").unwrap()), ["k9", "k1"]);
    assert_eq!(
        keys(&native.get("c").and_then(Native::as_seq).unwrap()[0]),
        ["second", "first"]
    );
    assert_eq!(
        native.get("m"),
        Some(&Native::Seq(vec![Native::Int(3), Native::Int(2), Native::Int(1)]))
    );
}

#[test]
fn parsing_is_deterministic() {
    let doc = include_str!("data/example.toml");
    let first = parse(doc).unwrap();
    let native = translate(&first);
    for _ in 0..5 {
        let again = parse(doc).unwrap();
        assert_eq!(again, first);
        assert_eq!(translate(&again), native);
    }
}

#[test]
fn errors_report_line_and_column() {
    let cases = [
        ("a = 1\nb = \"open", ErrorCategory::Lex, (2, 5)),
        ("a = 1\n\n  b = [1 2]", ErrorCategory::Syntax, (3, 10)),
        ("[x]\n[x]", ErrorCategory::Semantic, (2, 1)),
        ("a = 1\nb = 2019-13-01", ErrorCategory::Type, (2, 5)),
        ("a = 1\nb = 0x", ErrorCategory::Type, (2, 5)),
        ("a = 1\nb = nope", ErrorCategory::Lex, (2, 5)),
    ];
    for (doc, category, (line, column)) in cases {
        let err = parse_native(doc).unwrap_err();
        assert_eq!(err.category(), category, "{doc:?}: {err}");
        assert_eq!((err.line(), err.column()), (Some(line), Some(column)), "{doc:?}: {err}");
    }
}

#[test]
fn concurrent_parses_are_independent() {
    let doc = include_str!("data/example.toml");
    let expected = parse_native(doc).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| parse_native(doc))).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}
