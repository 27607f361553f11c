use super::*;
use crate::error::ErrorCategory;

#[track_caller]
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap_or_else(|e| panic!("tokenize failed for {input:?}: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[track_caller]
fn lex_err(input: &str) -> Error {
    match tokenize(input) {
        Ok(tokens) => panic!("expected error for {input:?}, got {tokens:?}"),
        Err(e) => e,
    }
}

fn key(name: &str) -> TokenKind {
    TokenKind::BareKey(name.into())
}

fn string(value: &str) -> TokenKind {
    TokenKind::String {
        value: value.into(),
        multiline: false,
    }
}

#[track_caller]
fn single_string(input: &str) -> String {
    let src = format!("a = {input}");
    match &kinds(&src)[2] {
        TokenKind::String { value, .. } => value.clone(),
        other => panic!("expected string for {input:?}, got {other:?}"),
    }
}

#[test]
fn key_value_line() {
    use TokenKind::*;
    assert_eq!(
        kinds("title = \"TOML\"\n"),
        vec![key("title"), Equals, string("TOML"), Newline, Eof]
    );
    assert_eq!(kinds(""), vec![Eof]);
    assert_eq!(kinds("  \t # just a comment"), vec![Eof]);
    assert_eq!(kinds("a=1\r\nb=2"), vec![
        key("a"),
        Equals,
        Integer(1),
        Newline,
        key("b"),
        Equals,
        Integer(2),
        Eof
    ]);
}

#[test]
fn spans_cover_source_bytes() {
    let tokens = tokenize("key = 'v'").unwrap();
    let spans: Vec<(u32, u32)> = tokens.iter().map(|t| t.span.into()).collect();
    assert_eq!(spans, vec![(0, 3), (4, 5), (6, 9), (9, 9)]);
}

#[test]
fn dotted_keys_versus_floats() {
    use TokenKind::*;
    assert_eq!(
        kinds("1.5 = 1.5"),
        vec![key("1"), Period, key("5"), Equals, Float(1.5), Eof]
    );
    assert_eq!(
        kinds("a.\"b c\".d = true"),
        vec![key("a"), Period, string("b c"), Period, key("d"), Equals, Boolean(true), Eof]
    );
    // bare keys may look like other values
    assert_eq!(kinds("true = 1"), vec![key("true"), Equals, Integer(1), Eof]);
    assert_eq!(kinds("1234 = 1"), vec![key("1234"), Equals, Integer(1), Eof]);
}

#[test]
fn headers_and_arrays() {
    use TokenKind::*;
    assert_eq!(
        kinds("[[fruit]]\n[a.b]"),
        vec![
            DoubleLeftBracket,
            key("fruit"),
            DoubleRightBracket,
            Newline,
            LeftBracket,
            key("a"),
            Period,
            key("b"),
            RightBracket,
            Eof
        ]
    );
    // nested arrays never produce double brackets
    assert_eq!(
        kinds("x = [[1], []]"),
        vec![
            key("x"),
            Equals,
            LeftBracket,
            LeftBracket,
            Integer(1),
            RightBracket,
            Comma,
            LeftBracket,
            RightBracket,
            RightBracket,
            Eof
        ]
    );
}

#[test]
fn arrays_span_lines() {
    use TokenKind::*;
    assert_eq!(
        kinds("a = [\n  1, # one\n  2,\n]"),
        vec![
            key("a"),
            Equals,
            LeftBracket,
            Newline,
            Integer(1),
            Comma,
            Newline,
            Integer(2),
            Comma,
            Newline,
            RightBracket,
            Eof
        ]
    );
}

#[test]
fn inline_tables_switch_back_to_keys() {
    use TokenKind::*;
    assert_eq!(
        kinds("p = { x = 1, y.z = 2.0 }"),
        vec![
            key("p"),
            Equals,
            LeftBrace,
            key("x"),
            Equals,
            Integer(1),
            Comma,
            key("y"),
            Period,
            key("z"),
            Equals,
            Float(2.0),
            RightBrace,
            Eof
        ]
    );
    assert_eq!(
        kinds("a = [{ b = 1 }, { }]"),
        vec![
            key("a"),
            Equals,
            LeftBracket,
            LeftBrace,
            key("b"),
            Equals,
            Integer(1),
            RightBrace,
            Comma,
            LeftBrace,
            RightBrace,
            RightBracket,
            Eof
        ]
    );
}

#[test]
fn scalar_values() {
    use TokenKind::*;
    let cases = [
        ("+99", Integer(99)),
        ("0xDEAD_BEEF", Integer(0xDEAD_BEEF)),
        ("0b101", Integer(5)),
        ("0o17", Integer(15)),
        ("-1e-3", Float(-1e-3)),
        ("5E+22", Float(5e22)),
        ("-inf", Float(f64::NEG_INFINITY)),
        ("false", Boolean(false)),
    ];
    for (input, expected) in cases {
        let src = format!("v = {input}");
        assert_eq!(kinds(&src)[2], expected, "input: {input}");
    }
    match &kinds("v = nan")[2] {
        Float(f) => assert!(f.is_nan()),
        other => panic!("expected nan, got {other:?}"),
    }
}

#[test]
fn date_times() {
    let cases = [
        ("1979-05-27T07:32:00Z", "1979-05-27T07:32:00Z"),
        ("1979-05-27 07:32:00-08:00", "1979-05-27T07:32:00-08:00"),
        ("1979-05-27", "1979-05-27"),
        ("07:32:00.999", "07:32:00.999"),
    ];
    for (input, expected) in cases {
        let src = format!("v = {input} # comment");
        match &kinds(&src)[2] {
            TokenKind::DateTime(dt) => assert_eq!(dt.to_string(), expected),
            other => panic!("expected datetime for {input:?}, got {other:?}"),
        }
    }

    // a date followed by a space and a non-time stays a date
    let tokens = kinds("v = [1979-05-27 ]");
    assert!(matches!(tokens[3], TokenKind::DateTime(_)));
    assert_eq!(tokens[4], TokenKind::RightBracket);
}

#[test]
fn basic_string_escapes() {
    assert_eq!(single_string(r#""a\tb\nc""#), "a\tb\nc");
    assert_eq!(single_string(r#""\"quoted\" \\ back""#), "\"quoted\" \\ back");
    assert_eq!(single_string(r#""\b\f\r""#), "\u{8}\u{c}\r");
    assert_eq!(single_string(r#""\u00E9\U0001F600""#), "é😀");
    assert_eq!(single_string("\"héllo wörld\""), "héllo wörld");
    assert_eq!(single_string("\"tab\there\""), "tab\there");
    assert_eq!(single_string("\"\""), "");
}

#[test]
fn literal_strings_are_raw() {
    assert_eq!(single_string(r"'C:\Users\nodejs'"), r"C:\Users\nodejs");
    assert_eq!(single_string(r"'<\i\c*\s*>'"), r"<\i\c*\s*>");
    assert_eq!(single_string("''"), "");
}

#[test]
fn multiline_strings() {
    // first newline is trimmed
    assert_eq!(single_string("\"\"\"\nRoses\nViolets\"\"\""), "Roses\nViolets");
    assert_eq!(single_string("'''\r\nraw\\n'''"), "raw\\n");
    // line ending backslash swallows whitespace and newlines
    assert_eq!(
        single_string("\"\"\"The quick \\\n\n   brown \\   \n  fox\"\"\""),
        "The quick brown fox"
    );
    // up to two quotes may sit before the closing delimiter
    assert_eq!(single_string("\"\"\"a\"\"\"\""), "a\"");
    assert_eq!(single_string("\"\"\"a\"\"\"\"\""), "a\"\"");
    assert_eq!(single_string("''''That,' she said''''"), "'That,' she said'");
    assert_eq!(single_string(r#""""two "" quotes""""#), "two \"\" quotes");

    let tokens = kinds("a = '''\nx'''");
    assert_eq!(
        tokens[2],
        TokenKind::String {
            value: "x".into(),
            multiline: true
        }
    );
}

#[test]
fn string_errors() {
    let cases: &[(&str, ErrorKind)] = &[
        ("a = \"abc", ErrorKind::UnterminatedString),
        ("a = '''abc''", ErrorKind::UnterminatedString),
        ("a = \"a\nb\"", ErrorKind::InvalidCharInString('\n')),
        ("a = 'a\u{7f}'", ErrorKind::InvalidCharInString('\u{7f}')),
        ("a = \"\u{1}\"", ErrorKind::InvalidCharInString('\u{1}')),
        ("a = \"\"\"a\rb\"\"\"", ErrorKind::InvalidCharInString('\r')),
        (r#"a = "\q""#, ErrorKind::InvalidEscape('q')),
        (r#"a = "\ ""#, ErrorKind::InvalidEscape(' ')),
        ("a = \"\"\"\\ x\"\"\"", ErrorKind::InvalidEscape(' ')),
        (r#"a = "\u00G0""#, ErrorKind::InvalidHexEscape('G')),
        (r#"a = "\uD800""#, ErrorKind::InvalidEscapeValue(0xD800)),
        (r#"a = "\U00110000""#, ErrorKind::InvalidEscapeValue(0x110000)),
    ];
    for (input, kind) in cases {
        let err = lex_err(input);
        assert_eq!(&err.kind, kind, "input: {input:?}");
        assert_eq!(err.category(), ErrorCategory::Lex, "input: {input:?}");
    }
}

#[test]
fn value_errors_are_typed() {
    let cases: &[(&str, ErrorKind, ErrorCategory)] = &[
        ("a = 01", ErrorKind::InvalidNumber, ErrorCategory::Type),
        ("a = 1__2", ErrorKind::InvalidNumber, ErrorCategory::Type),
        ("a = 1.", ErrorKind::InvalidNumber, ErrorCategory::Type),
        ("a = 9223372036854775808", ErrorKind::OutOfRange("i64"), ErrorCategory::Type),
        ("a = 1e999", ErrorKind::OutOfRange("f64"), ErrorCategory::Type),
        ("a = 1979-13-01", ErrorKind::InvalidDateTime, ErrorCategory::Type),
        ("a = 07:32", ErrorKind::InvalidDateTime, ErrorCategory::Type),
        ("a = yes", ErrorKind::UnquotedString, ErrorCategory::Lex),
        ("a = True", ErrorKind::UnquotedString, ErrorCategory::Lex),
        ("a = @", ErrorKind::Unexpected('@'), ErrorCategory::Lex),
    ];
    for (input, kind, category) in cases {
        let err = lex_err(input);
        assert_eq!(&err.kind, kind, "input: {input:?}");
        assert_eq!(err.category(), *category, "input: {input:?}");
    }
}

#[test]
fn stray_characters() {
    let err = lex_err("a = 1\n$ = 2");
    assert_eq!(err.kind, ErrorKind::Unexpected('$'));
    assert_eq!(err.line_info, Some((2, 1)));

    // lone carriage return
    assert_eq!(lex_err("a = 1\rb = 2").kind, ErrorKind::Unexpected('\r'));
    // control characters in comments
    assert_eq!(lex_err("# bell \u{7}").kind, ErrorKind::Unexpected('\u{7}'));
    assert_eq!(lex_err("ключ = 1").kind, ErrorKind::Unexpected('к'));
}

#[test]
fn randomized_input_never_panics() {
    let alphabet = b"ab1.=[]{},\"'\\ \n\r#-+:eTZx_";
    let mut rng = oorandom::Rand32::new(7);
    for _ in 0..3000 {
        let len = rng.rand_u32() % 40;
        let text: String = (0..len)
            .map(|_| alphabet[rng.rand_u32() as usize % alphabet.len()] as char)
            .collect();
        let _ = tokenize(&text);
    }
}
