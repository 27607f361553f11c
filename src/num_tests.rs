use super::*;

#[test]
fn integers() {
    let ok = [
        ("0", 0),
        ("+0", 0),
        ("-0", 0),
        ("42", 42),
        ("+99", 99),
        ("-17", -17),
        ("1_000", 1000),
        ("5_349_221", 5_349_221),
        ("0xDEADBEEF", 0xDEADBEEF),
        ("0xdead_beef", 0xDEADBEEF),
        ("0x1A", 26),
        ("0o01234567", 0o01234567),
        ("0o755", 0o755),
        ("0b11010110", 0b11010110),
        ("0b0000_0001", 1),
        ("9223372036854775807", i64::MAX),
        ("-9223372036854775808", i64::MIN),
        ("0x7FFFFFFFFFFFFFFF", i64::MAX),
    ];
    for (input, expected) in ok {
        assert_eq!(decode_integer(input), Ok(expected), "input: {input}");
    }
}

#[test]
fn invalid_integers() {
    let invalid = [
        "", "+", "-", "01", "+01", "-01", "00", "1__0", "_1", "1_", "0x", "0x_1", "0xG", "0o8",
        "0b2", "0X1F", "+0x1", "-0x1", "1a", "1.0",
    ];
    for input in invalid {
        assert_eq!(
            decode_integer(input),
            Err(ErrorKind::InvalidNumber),
            "input: {input}"
        );
    }
}

#[test]
fn integer_overflow_fails() {
    for input in [
        "9223372036854775808",
        "-9223372036854775809",
        "0x8000000000000000",
        "0o1000000000000000000000",
        "99999999999999999999999",
    ] {
        assert_eq!(
            decode_integer(input),
            Err(ErrorKind::OutOfRange("i64")),
            "input: {input}"
        );
    }
}

#[test]
fn floats() {
    let ok = [
        ("1.0", 1.0),
        ("+1.0", 1.0),
        ("3.1415", 3.1415),
        ("-0.01", -0.01),
        ("5e+22", 5e22),
        ("1e06", 1e6),
        ("-2E-2", -2e-2),
        ("6.626e-34", 6.626e-34),
        ("224_617.445_991_228", 224_617.445_991_228),
        ("1e1_0", 1e10),
        ("0e0", 0.0),
        ("0.0", 0.0),
    ];
    for (input, expected) in ok {
        assert_eq!(decode_float(input), Ok(expected), "input: {input}");
    }

    assert_eq!(decode_float("inf"), Ok(f64::INFINITY));
    assert_eq!(decode_float("+inf"), Ok(f64::INFINITY));
    assert_eq!(decode_float("-inf"), Ok(f64::NEG_INFINITY));
    for input in ["nan", "+nan", "-nan"] {
        assert!(decode_float(input).unwrap().is_nan(), "input: {input}");
    }
    assert!(decode_float("-nan").unwrap().is_sign_negative());
    assert!(decode_float("-0.0").unwrap().is_sign_negative());
}

#[test]
fn invalid_floats() {
    let invalid = [
        "1", ".5", "1.", "1.e5", "01.5", "00.0", "1e", "1e+", "1e_5", "1_.5", "1._5", "1.5_",
        "1.5e5.0", "1e--5", "+-1.0", "infinity", "NaN", "1,5",
    ];
    for input in invalid {
        assert_eq!(decode_float(input), Err(ErrorKind::InvalidNumber), "input: {input}");
    }
}

#[test]
fn float_overflow_fails() {
    assert_eq!(decode_float("1e400"), Err(ErrorKind::OutOfRange("f64")));
    assert_eq!(decode_float("-1.5e999"), Err(ErrorKind::OutOfRange("f64")));
    // underflow rounds to zero, which is representable
    assert_eq!(decode_float("1e-400"), Ok(0.0));
}
