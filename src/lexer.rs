//! Turns TOML source text into a stream of typed tokens.
//!
//! TOML is not context free at the character level: `1.5` is a float after
//! `=` but two bare keys around a period before it, and `[[` opens either an
//! array-of-tables header or a nested array. The lexer tracks which
//! delimiters are open and whether a value is expected so it can make these
//! calls itself, leaving the parser with an unambiguous token stream.

#[cfg(test)]
#[path = "./lexer_tests.rs"]
mod tests;

use crate::{
    Span,
    error::{Error, ErrorKind},
    num,
    time::{self, DateTime},
};

/// A token and the bytes of the source it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// A line break, `\n` or `\r\n`.
    Newline,
    Equals,
    Period,
    Comma,
    LeftBracket,
    RightBracket,
    /// `[[` opening an array-of-tables header.
    DoubleLeftBracket,
    /// `]]` closing an array-of-tables header.
    DoubleRightBracket,
    LeftBrace,
    RightBrace,
    /// An unquoted key made of `A-Za-z0-9_-`.
    BareKey(String),
    /// A basic or literal string with escapes already applied.
    String { value: String, multiline: bool },
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime),
    Eof,
}

impl TokenKind {
    /// Short description used in "expected X, found Y" errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Newline => "a newline",
            TokenKind::Equals => "an equals",
            TokenKind::Period => "a period",
            TokenKind::Comma => "a comma",
            TokenKind::LeftBracket => "a left bracket",
            TokenKind::RightBracket => "a right bracket",
            TokenKind::DoubleLeftBracket => "a double left bracket",
            TokenKind::DoubleRightBracket => "a double right bracket",
            TokenKind::LeftBrace => "a left brace",
            TokenKind::RightBrace => "a right brace",
            TokenKind::BareKey(_) => "an identifier",
            TokenKind::String { .. } => "a string",
            TokenKind::Integer(_) => "an integer",
            TokenKind::Float(_) => "a float",
            TokenKind::Boolean(_) => "a boolean",
            TokenKind::DateTime(_) => "a datetime",
            TokenKind::Eof => "eof",
        }
    }
}

/// Tokenizes a whole document. The last token is always [`TokenKind::Eof`].
///
/// Comments and insignificant whitespace are dropped; newlines are kept.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token().map_err(|e| e.with_source(source))?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tracing::trace!(tokens = tokens.len(), "tokenized document");
    Ok(tokens)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    Header { double: bool },
    Array,
    InlineTable,
}

/// Pull-based tokenizer. The parser drives it one token at a time so that
/// errors surface in source order.
pub(crate) struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    cursor: usize,
    contexts: Vec<Context>,
    expect_value: bool,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            cursor: 0,
            contexts: Vec::new(),
            expect_value: false,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.cursor + offset).copied()
    }

    /// The character starting at byte offset `at`.
    fn char_at(&self, at: usize) -> char {
        self.source[at..].chars().next().unwrap_or('\0')
    }

    fn error(&self, kind: ErrorKind, start: usize, end: usize) -> Error {
        Error::from((kind, Span::new(start as u32, end as u32)))
    }

    fn unexpected_char(&self, at: usize) -> Error {
        let c = self.char_at(at);
        self.error(ErrorKind::Unexpected(c), at, at + c.len_utf8())
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, Error> {
        while let Some(b' ' | b'\t') = self.peek() {
            self.cursor += 1;
        }
        if self.peek() == Some(b'#') {
            self.comment()?;
        }

        let start = self.cursor;
        let Some(byte) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::new(start as u32, start as u32),
            });
        };

        let kind = match byte {
            b'\n' => {
                self.cursor += 1;
                self.newline()
            }
            b'\r' if self.peek_at(1) == Some(b'\n') => {
                self.cursor += 2;
                self.newline()
            }
            b'=' => {
                self.cursor += 1;
                self.expect_value = true;
                TokenKind::Equals
            }
            b',' => {
                self.cursor += 1;
                self.expect_value = self.contexts.last() == Some(&Context::Array);
                TokenKind::Comma
            }
            b'.' if !self.expect_value => {
                self.cursor += 1;
                TokenKind::Period
            }
            b'[' => self.left_bracket(),
            b']' => self.right_bracket(),
            b'{' => {
                self.cursor += 1;
                if self.expect_value {
                    self.contexts.push(Context::InlineTable);
                    self.expect_value = false;
                }
                TokenKind::LeftBrace
            }
            b'}' => {
                self.cursor += 1;
                if self.contexts.last() == Some(&Context::InlineTable) {
                    self.contexts.pop();
                    self.expect_value = false;
                }
                TokenKind::RightBrace
            }
            b'"' | b'\'' => {
                let kind = self.string(byte)?;
                self.expect_value = false;
                kind
            }
            _ if self.expect_value => self.scalar()?,
            b if is_bare_key_byte(b) => {
                while let Some(b) = self.peek() {
                    if !is_bare_key_byte(b) {
                        break;
                    }
                    self.cursor += 1;
                }
                TokenKind::BareKey(self.source[start..self.cursor].to_owned())
            }
            _ => return Err(self.unexpected_char(start)),
        };

        Ok(Token {
            kind,
            span: Span::new(start as u32, self.cursor as u32),
        })
    }

    fn newline(&mut self) -> TokenKind {
        // headers cannot span lines
        if let Some(Context::Header { .. }) = self.contexts.last() {
            self.contexts.pop();
        }
        if self.contexts.is_empty() {
            self.expect_value = false;
        }
        TokenKind::Newline
    }

    /// Skips a comment up to, but not including, the line break.
    fn comment(&mut self) -> Result<(), Error> {
        self.cursor += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\n' => break,
                b'\r' if self.peek_at(1) == Some(b'\n') => break,
                0x09 | 0x20..=0x7E | 0x80..=0xFF => self.cursor += 1,
                _ => return Err(self.unexpected_char(self.cursor)),
            }
        }
        Ok(())
    }

    fn left_bracket(&mut self) -> TokenKind {
        self.cursor += 1;
        if self.expect_value {
            self.contexts.push(Context::Array);
            TokenKind::LeftBracket
        } else if self.contexts.is_empty() {
            if self.peek() == Some(b'[') {
                self.cursor += 1;
                self.contexts.push(Context::Header { double: true });
                TokenKind::DoubleLeftBracket
            } else {
                self.contexts.push(Context::Header { double: false });
                TokenKind::LeftBracket
            }
        } else {
            TokenKind::LeftBracket
        }
    }

    fn right_bracket(&mut self) -> TokenKind {
        self.cursor += 1;
        match self.contexts.last() {
            Some(Context::Header { double: true }) if self.peek() == Some(b']') => {
                self.cursor += 1;
                self.contexts.pop();
                TokenKind::DoubleRightBracket
            }
            Some(Context::Header { .. }) => {
                self.contexts.pop();
                TokenKind::RightBracket
            }
            Some(Context::Array) => {
                self.contexts.pop();
                self.expect_value = false;
                TokenKind::RightBracket
            }
            _ => TokenKind::RightBracket,
        }
    }

    // -- strings ------------------------------------------------------------

    fn string(&mut self, delim: u8) -> Result<TokenKind, Error> {
        let start = self.cursor;
        self.cursor += 1;

        let mut multiline = false;
        if self.peek() == Some(delim) {
            if self.peek_at(1) == Some(delim) {
                self.cursor += 2;
                multiline = true;
            } else {
                self.cursor += 1;
                return Ok(TokenKind::String {
                    value: String::new(),
                    multiline: false,
                });
            }
        }

        if multiline {
            // a newline directly after the opening delimiter is trimmed
            match self.peek() {
                Some(b'\n') => self.cursor += 1,
                Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.cursor += 2,
                _ => {}
            }
        }

        let mut value = String::new();
        loop {
            let run_start = self.cursor;
            while let Some(b) = self.peek() {
                if b == delim || (b == b'\\' && delim == b'"') || b == 0x7F || (b < 0x20 && b != b'\t')
                {
                    break;
                }
                self.cursor += 1;
            }
            value.push_str(&self.source[run_start..self.cursor]);

            let at = self.cursor;
            let Some(b) = self.peek() else {
                return Err(self.error(ErrorKind::UnterminatedString, start, self.cursor));
            };
            match b {
                d if d == delim => {
                    if !multiline {
                        self.cursor += 1;
                        return Ok(TokenKind::String { value, multiline });
                    }
                    let mut run = 0;
                    while self.peek_at(run) == Some(delim) {
                        run += 1;
                    }
                    if run < 3 {
                        for _ in 0..run {
                            value.push(delim as char);
                        }
                        self.cursor += run;
                        continue;
                    }
                    // up to two quotes may directly precede the closing delimiter
                    let extra = (run - 3).min(2);
                    for _ in 0..extra {
                        value.push(delim as char);
                    }
                    self.cursor += extra + 3;
                    return Ok(TokenKind::String { value, multiline });
                }
                b'\\' => self.escape(start, multiline, &mut value)?,
                b'\n' if multiline => {
                    value.push('\n');
                    self.cursor += 1;
                }
                b'\r' if multiline && self.peek_at(1) == Some(b'\n') => {
                    value.push_str("\r\n");
                    self.cursor += 2;
                }
                _ => {
                    return Err(self.error(ErrorKind::InvalidCharInString(b as char), at, at + 1));
                }
            }
        }
    }

    fn escape(&mut self, start: usize, multiline: bool, out: &mut String) -> Result<(), Error> {
        let backslash = self.cursor;
        self.cursor += 1;
        let Some(b) = self.peek() else {
            return Err(self.error(ErrorKind::UnterminatedString, start, self.cursor));
        };
        self.cursor += 1;
        match b {
            b'b' => out.push('\u{8}'),
            b't' => out.push('\t'),
            b'n' => out.push('\n'),
            b'f' => out.push('\u{c}'),
            b'r' => out.push('\r'),
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'u' => out.push(self.hex_escape(4, start, backslash)?),
            b'U' => out.push(self.hex_escape(8, start, backslash)?),
            b' ' | b'\t' | b'\n' | b'\r' if multiline => {
                // line ending backslash: only whitespace may follow on its line
                self.cursor -= 1;
                while let Some(b' ' | b'\t') = self.peek() {
                    self.cursor += 1;
                }
                match self.peek() {
                    Some(b'\n') => self.cursor += 1,
                    Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.cursor += 2,
                    _ => {
                        return Err(self.error(
                            ErrorKind::InvalidEscape(b as char),
                            backslash,
                            backslash + 2,
                        ));
                    }
                }
                loop {
                    match self.peek() {
                        Some(b' ' | b'\t' | b'\n') => self.cursor += 1,
                        Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.cursor += 2,
                        _ => break,
                    }
                }
            }
            _ => {
                let c = self.char_at(backslash + 1);
                return Err(self.error(
                    ErrorKind::InvalidEscape(c),
                    backslash,
                    backslash + 1 + c.len_utf8(),
                ));
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, digits: usize, start: usize, backslash: usize) -> Result<char, Error> {
        let mut value = 0u32;
        for _ in 0..digits {
            let at = self.cursor;
            let Some(b) = self.peek() else {
                return Err(self.error(ErrorKind::UnterminatedString, start, at));
            };
            let Some(digit) = (b as char).to_digit(16) else {
                let c = self.char_at(at);
                return Err(self.error(ErrorKind::InvalidHexEscape(c), at, at + c.len_utf8()));
            };
            value = value * 16 + digit;
            self.cursor += 1;
        }
        match char::from_u32(value) {
            Some(c) => Ok(c),
            None => Err(self.error(
                ErrorKind::InvalidEscapeValue(value),
                backslash,
                self.cursor,
            )),
        }
    }

    // -- scalars ------------------------------------------------------------

    /// Reads an unquoted value: number, boolean or date/time.
    fn scalar(&mut self) -> Result<TokenKind, Error> {
        let start = self.cursor;
        self.eat_scalar_bytes();
        if time::is_full_date(&self.bytes[start..self.cursor])
            && self.peek() == Some(b' ')
            && self.peek_at(1).is_some_and(|b| b.is_ascii_digit())
        {
            // `1979-05-27 07:32:00` uses a space as the date/time separator
            self.cursor += 1;
            self.eat_scalar_bytes();
        }
        if self.cursor == start {
            return Err(self.unexpected_char(start));
        }
        self.expect_value = false;

        let word = &self.source[start..self.cursor];
        let decoded = match word {
            "true" => Ok(TokenKind::Boolean(true)),
            "false" => Ok(TokenKind::Boolean(false)),
            "inf" | "+inf" | "-inf" | "nan" | "+nan" | "-nan" => {
                num::decode_float(word).map(TokenKind::Float)
            }
            _ if time::looks_like_datetime(word.as_bytes()) => match DateTime::decode(word) {
                Some(dt) => Ok(TokenKind::DateTime(dt)),
                None => Err(ErrorKind::InvalidDateTime),
            },
            _ if word.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) => {
                if word.starts_with("0x") || word.starts_with("0o") || word.starts_with("0b") {
                    num::decode_integer(word).map(TokenKind::Integer)
                } else if word.contains(['.', 'e', 'E']) {
                    num::decode_float(word).map(TokenKind::Float)
                } else {
                    num::decode_integer(word).map(TokenKind::Integer)
                }
            }
            _ => Err(ErrorKind::UnquotedString),
        };
        decoded.map_err(|kind| self.error(kind, start, self.cursor))
    }

    fn eat_scalar_bytes(&mut self) {
        while let Some(b) = self.peek() {
            if !(b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'+' | b'.' | b':')) {
                break;
            }
            self.cursor += 1;
        }
    }
}

#[inline]
pub(crate) fn is_bare_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}
