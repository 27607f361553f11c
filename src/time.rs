//! Decoding of RFC 3339 flavoured date and time literals.

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

use std::fmt;

/// A calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A wall-clock time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    precision: u8,
}

impl Time {
    /// Creates a time without fractional seconds digits.
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond: 0,
            precision: 0,
        }
    }

    /// Number of fractional second digits kept from the source, 0 if the
    /// literal had none. Capped at 9.
    pub fn subsecond_precision(&self) -> u8 {
        self.precision
    }
}

/// Offset from UTC attached to a date-time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Offset {
    /// `Z`, a UTC offset of 00:00.
    Z,
    /// Offset between local time and UTC, in minutes.
    Custom { minutes: i16 },
}

impl Offset {
    /// Offset from UTC in minutes.
    pub fn minutes(&self) -> i16 {
        match self {
            Offset::Z => 0,
            Offset::Custom { minutes } => *minutes,
        }
    }
}

/// The four temporal shapes a TOML literal can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
}

impl TemporalKind {
    /// The name `toml-test` and the serde projection use for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalKind::OffsetDateTime => "offset-datetime",
            TemporalKind::LocalDateTime => "local-datetime",
            TemporalKind::LocalDate => "local-date",
            TemporalKind::LocalTime => "local-time",
        }
    }
}

/// Any decoded temporal literal. Which components are present decides its
/// [`TemporalKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    date: Option<Date>,
    time: Option<Time>,
    offset: Option<Offset>,
}

impl DateTime {
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn time(&self) -> Option<Time> {
        self.time
    }

    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }

    pub fn kind(&self) -> TemporalKind {
        match (self.date, self.time, self.offset) {
            (Some(_), Some(_), Some(_)) => TemporalKind::OffsetDateTime,
            (Some(_), Some(_), None) => TemporalKind::LocalDateTime,
            (Some(_), None, _) => TemporalKind::LocalDate,
            (None, _, _) => TemporalKind::LocalTime,
        }
    }

    /// Decodes a complete literal such as `1979-05-27T07:32:00-08:00`.
    ///
    /// Returns `None` if the literal is malformed, has trailing input, or a
    /// field is out of range (month 1-12, day valid for the month, hour
    /// 0-23, minute and second 0-59, offset below 24 hours).
    pub fn decode(literal: &str) -> Option<DateTime> {
        let mut cursor = Cursor {
            bytes: literal.as_bytes(),
            pos: 0,
        };
        let mut value = DateTime {
            date: None,
            time: None,
            offset: None,
        };

        if !is_time_only(literal.as_bytes()) {
            value.date = Some(cursor.date()?);
            if cursor.at_end() {
                return Some(value);
            }
            match cursor.next() {
                Some(b'T' | b't' | b' ') => {}
                _ => return None,
            }
        }

        value.time = Some(cursor.time()?);

        if value.date.is_some() {
            match cursor.peek() {
                Some(b'Z' | b'z') => {
                    cursor.pos += 1;
                    value.offset = Some(Offset::Z);
                }
                Some(sign @ (b'+' | b'-')) => {
                    cursor.pos += 1;
                    let hours = cursor.digits(2)?;
                    if !cursor.eat(b':') {
                        return None;
                    }
                    let mins = cursor.digits(2)?;
                    if hours > 23 || mins > 59 {
                        return None;
                    }
                    let total = (hours * 60 + mins) as i16;
                    let minutes = if sign == b'-' { -total } else { total };
                    value.offset = Some(Offset::Custom { minutes });
                }
                _ => {}
            }
        }

        if cursor.at_end() { Some(value) } else { None }
    }
}

impl From<Date> for DateTime {
    fn from(date: Date) -> Self {
        DateTime {
            date: Some(date),
            time: None,
            offset: None,
        }
    }
}

impl From<Time> for DateTime {
    fn from(time: Time) -> Self {
        DateTime {
            date: None,
            time: Some(time),
            offset: None,
        }
    }
}

/// Whether a bare value word has the shape of a temporal literal: it starts
/// with `HH:` or `YYYY-MM-`.
pub(crate) fn looks_like_datetime(word: &[u8]) -> bool {
    is_time_only(word)
        || matches!(word, [a, b, c, d, b'-', e, f, b'-', ..]
            if [a, b, c, d, e, f].iter().all(|b| b.is_ascii_digit()))
}

fn is_time_only(word: &[u8]) -> bool {
    matches!(word, [a, b, b':', ..] if a.is_ascii_digit() && b.is_ascii_digit())
}

/// Whether `word` is exactly a `YYYY-MM-DD` date, which may be followed by a
/// space and a time.
pub(crate) fn is_full_date(word: &[u8]) -> bool {
    word.len() == 10 && looks_like_datetime(word) && word[8..].iter().all(u8::is_ascii_digit)
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Reads exactly `n` ASCII digits.
    fn digits(&mut self, n: usize) -> Option<u32> {
        let field = self.bytes.get(self.pos..self.pos + n)?;
        let mut value = 0u32;
        for b in field {
            if !b.is_ascii_digit() {
                return None;
            }
            value = value * 10 + u32::from(b - b'0');
        }
        self.pos += n;
        Some(value)
    }

    fn date(&mut self) -> Option<Date> {
        let year = self.digits(4)? as u16;
        if !self.eat(b'-') {
            return None;
        }
        let month = self.digits(2)? as u8;
        if !self.eat(b'-') {
            return None;
        }
        let day = self.digits(2)? as u8;
        if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Date { year, month, day })
    }

    fn time(&mut self) -> Option<Time> {
        let hour = self.digits(2)? as u8;
        if !self.eat(b':') {
            return None;
        }
        let minute = self.digits(2)? as u8;
        if !self.eat(b':') {
            return None;
        }
        let second = self.digits(2)? as u8;
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        let mut time = Time::new(hour, minute, second);

        if self.eat(b'.') {
            let mut count = 0usize;
            let mut nanos = 0u32;
            while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
                // digits past nanosecond precision are dropped
                if count < 9 {
                    nanos = nanos * 10 + u32::from(b - b'0');
                }
                count += 1;
                self.pos += 1;
            }
            if count == 0 {
                return None;
            }
            let kept = count.min(9);
            time.nanosecond = nanos * 10u32.pow((9 - kept) as u32);
            time.precision = kept as u8;
        }
        Some(time)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.precision > 0 {
            let scaled = self.nanosecond / 10u32.pow(9 - u32::from(self.precision));
            write!(f, ".{:0width$}", scaled, width = self.precision as usize)?;
        }
        Ok(())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Offset::Z => f.write_str("Z"),
            Offset::Custom { minutes } => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
            }
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = &self.date {
            date.fmt(f)?;
            if self.time.is_some() {
                f.write_str("T")?;
            }
        }
        if let Some(time) = &self.time {
            time.fmt(f)?;
        }
        if let Some(offset) = &self.offset {
            offset.fmt(f)?;
        }
        Ok(())
    }
}
