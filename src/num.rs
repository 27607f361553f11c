//! Integer and float literal decoders.
//!
//! Both take the raw literal exactly as it appears in the document, with any
//! sign, base prefix and `_` separators still in place.

#[cfg(test)]
#[path = "./num_tests.rs"]
mod tests;

use crate::error::ErrorKind;

/// Decodes an integer literal into an `i64`.
///
/// Decimal literals may carry a sign but no leading zeros. `0x`, `0o` and
/// `0b` literals are unsigned and may have leading zeros. Values outside the
/// `i64` range fail with [`ErrorKind::OutOfRange`] rather than wrapping.
pub(crate) fn decode_integer(literal: &str) -> Result<i64, ErrorKind> {
    let (radix, digits, negative) = if let Some(rest) = literal.strip_prefix("0x") {
        (16, rest, false)
    } else if let Some(rest) = literal.strip_prefix("0o") {
        (8, rest, false)
    } else if let Some(rest) = literal.strip_prefix("0b") {
        (2, rest, false)
    } else if let Some(rest) = literal.strip_prefix('-') {
        (10, rest, true)
    } else {
        (10, literal.strip_prefix('+').unwrap_or(literal), false)
    };

    if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
        return Err(ErrorKind::InvalidNumber);
    }

    let mut value: i64 = 0;
    let mut overflow = false;
    for_each_digit(digits, radix, |digit| {
        let digit = i64::from(digit);
        let next = value.checked_mul(i64::from(radix)).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(next) => value = next,
            None => overflow = true,
        }
    })?;

    if overflow {
        Err(ErrorKind::OutOfRange("i64"))
    } else {
        Ok(value)
    }
}

/// Decodes a float literal: `3.14`, `-1e10`, `6.626e-34`, `inf`, `nan`.
///
/// A fractional part needs digits on both sides of the `.`; the exponent may
/// carry a sign and leading zeros. Literals whose magnitude overflows to
/// infinity fail with [`ErrorKind::OutOfRange`].
pub(crate) fn decode_float(literal: &str) -> Result<f64, ErrorKind> {
    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    let sign = if negative { -1.0 } else { 1.0 };
    match unsigned {
        "inf" => return Ok(f64::INFINITY.copysign(sign)),
        "nan" => return Ok(f64::NAN.copysign(sign)),
        _ => {}
    }

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (integral, fraction) = match mantissa.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (mantissa, None),
    };
    if fraction.is_none() && exponent.is_none() {
        return Err(ErrorKind::InvalidNumber);
    }
    if integral.len() > 1 && integral.starts_with('0') {
        return Err(ErrorKind::InvalidNumber);
    }

    let mut clean = String::with_capacity(literal.len());
    if negative {
        clean.push('-');
    }
    push_digits(&mut clean, integral)?;
    if let Some(fraction) = fraction {
        clean.push('.');
        push_digits(&mut clean, fraction)?;
    }
    if let Some(exponent) = exponent {
        clean.push('e');
        let exponent = match exponent.as_bytes().first() {
            Some(b'+') => &exponent[1..],
            Some(b'-') => {
                clean.push('-');
                &exponent[1..]
            }
            _ => exponent,
        };
        push_digits(&mut clean, exponent)?;
    }

    match clean.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        Ok(_) => Err(ErrorKind::OutOfRange("f64")),
        Err(_) => Err(ErrorKind::InvalidNumber),
    }
}

fn push_digits(out: &mut String, digits: &str) -> Result<(), ErrorKind> {
    for_each_digit(digits, 10, |d| out.push(char::from(b'0' + d as u8)))
}

/// Walks the digits of `digits` in order, rejecting anything outside the
/// radix and any `_` that is not surrounded by digits.
fn for_each_digit(digits: &str, radix: u32, mut f: impl FnMut(u32)) -> Result<(), ErrorKind> {
    let mut previous_digit = false;
    for c in digits.chars() {
        if c == '_' {
            if !previous_digit {
                return Err(ErrorKind::InvalidNumber);
            }
            previous_digit = false;
            continue;
        }
        match c.to_digit(radix) {
            Some(digit) => f(digit),
            None => return Err(ErrorKind::InvalidNumber),
        }
        previous_digit = true;
    }
    // empty runs and trailing separators
    if previous_digit {
        Ok(())
    } else {
        Err(ErrorKind::InvalidNumber)
    }
}
