#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

use crate::Span;
use std::fmt::{self, Debug, Display};

/// Error produced while turning TOML text into a value tree.
///
/// Parsing stops at the first error, so a failed call yields exactly one of
/// these and never a partial document.
#[derive(Debug, Clone)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The span where the error occurs.
    ///
    /// Note some [`ErrorKind`] contain additional span information
    pub span: Span,
    /// 1-based line and column (in characters) of `span.start`, available
    /// for every error produced while parsing source text.
    pub line_info: Option<(usize, usize)>,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self {
            kind,
            span,
            line_info: None,
        }
    }
}

impl Error {
    /// The broad class of this error.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// 1-based line of the offending token, if known.
    pub fn line(&self) -> Option<usize> {
        self.line_info.map(|(line, _)| line)
    }

    /// 1-based column of the offending token, if known.
    pub fn column(&self) -> Option<usize> {
        self.line_info.map(|(_, column)| column)
    }

    pub(crate) fn with_source(mut self, source: &str) -> Self {
        self.line_info = Some(self.span.line_col(source));
        self
    }
}

/// The four stages an error can originate from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid characters, unterminated literals, bad escapes.
    Lex,
    /// Grammar violations: unexpected tokens, unmatched delimiters.
    Syntax,
    /// Duplicate keys, table redefinition, writes through frozen tables.
    Semantic,
    /// Malformed or out-of-range numeric and temporal literals.
    Type,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lex => "lex",
            Self::Syntax => "syntax",
            Self::Semantic => "semantic",
            Self::Type => "type",
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a document can be rejected.
#[derive(Clone, PartialEq)]
pub enum ErrorKind {
    /// EOF was reached when looking for a value.
    UnexpectedEof,

    /// The input is larger than the configured maximum size.
    FileTooLarge,

    /// The input buffer is not valid UTF-8.
    InvalidUtf8,

    /// An invalid character not allowed in a string was found.
    InvalidCharInString(char),

    /// An invalid character was found as an escape.
    InvalidEscape(char),

    /// An invalid character was found in a hex escape.
    InvalidHexEscape(char),

    /// A unicode escape named something that is not a scalar value.
    InvalidEscapeValue(u32),

    /// An unexpected character was encountered, either outside the bare key
    /// charset or where no token may start.
    Unexpected(char),

    /// EOF was reached before the closing delimiter of a string.
    UnterminatedString,

    /// A bare word appeared where a value was expected.
    UnquotedString,

    /// Wanted one sort of token, but found another.
    Wanted {
        /// Expected token type.
        expected: &'static str,
        /// Actually found token type.
        found: &'static str,
    },

    /// Multiline strings are not allowed for key.
    MultilineStringKey,

    /// Tables, arrays and dotted keys are nested deeper than allowed.
    TooDeep,

    /// Duplicate key in table.
    DuplicateKey {
        /// The duplicate key
        key: String,
        /// The span where the first key is located
        first: Span,
    },

    /// A table header named a table that was already defined.
    DuplicateTable {
        /// The name of the duplicate table
        name: String,
        /// The span where the table was first defined
        first: Span,
    },

    /// A previously defined table was redefined as an array.
    RedefineAsArray,

    /// Dotted key attempted to extend something that is not a table.
    DottedKeyInvalidType {
        /// The span where the non-table value was defined
        first: Span,
    },

    /// A key was written through an inline table after it was closed.
    FrozenTable {
        /// The span of the key naming the inline table
        first: Span,
    },

    /// A number failed to parse.
    InvalidNumber,

    /// The number cannot be represented by the named type.
    OutOfRange(&'static str),

    /// A date or time literal is malformed or has fields out of range.
    InvalidDateTime,
}

impl ErrorKind {
    /// The broad class of this error kind.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileTooLarge
            | Self::InvalidUtf8
            | Self::InvalidCharInString(..)
            | Self::InvalidEscape(..)
            | Self::InvalidHexEscape(..)
            | Self::InvalidEscapeValue(..)
            | Self::Unexpected(..)
            | Self::UnterminatedString
            | Self::UnquotedString => ErrorCategory::Lex,
            Self::UnexpectedEof
            | Self::Wanted { .. }
            | Self::MultilineStringKey
            | Self::TooDeep => ErrorCategory::Syntax,
            Self::DuplicateKey { .. }
            | Self::DuplicateTable { .. }
            | Self::RedefineAsArray
            | Self::DottedKeyInvalidType { .. }
            | Self::FrozenTable { .. } => ErrorCategory::Semantic,
            Self::InvalidNumber | Self::OutOfRange(..) | Self::InvalidDateTime => {
                ErrorCategory::Type
            }
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedEof => "unexpected-eof",
            Self::FileTooLarge => "file-too-large",
            Self::InvalidUtf8 => "invalid-utf8",
            Self::InvalidCharInString(..) => "invalid-char-in-string",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::InvalidHexEscape(..) => "invalid-hex-escape",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::Unexpected(..) => "unexpected",
            Self::UnterminatedString => "unterminated-string",
            Self::UnquotedString => "unquoted-string",
            Self::Wanted { .. } => "wanted",
            Self::MultilineStringKey => "multiline-string-key",
            Self::TooDeep => "too-deep",
            Self::DuplicateKey { .. } => "duplicate-key",
            Self::DuplicateTable { .. } => "duplicate-table",
            Self::RedefineAsArray => "redefine-as-array",
            Self::DottedKeyInvalidType { .. } => "dotted-key-invalid-type",
            Self::FrozenTable { .. } => "frozen-table",
            Self::InvalidNumber => "invalid-number",
            Self::OutOfRange(_) => "out-of-range",
            Self::InvalidDateTime => "invalid-datetime",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => f.write_str("unexpected eof encountered")?,
            ErrorKind::FileTooLarge => f.write_str("input is too large")?,
            ErrorKind::InvalidUtf8 => f.write_str("input is not valid UTF-8")?,
            ErrorKind::InvalidCharInString(c) => {
                write!(f, "invalid character in string: `{}`", Escape(*c))?
            }
            ErrorKind::InvalidEscape(c) => {
                write!(f, "invalid escape character in string: `{}`", Escape(*c))?
            }
            ErrorKind::InvalidHexEscape(c) => {
                write!(f, "invalid hex escape character in string: `{}`", Escape(*c))?
            }
            ErrorKind::InvalidEscapeValue(v) => write!(f, "invalid escape value: `{v:#x}`")?,
            ErrorKind::Unexpected(c) => {
                write!(f, "unexpected character found: `{}`", Escape(*c))?
            }
            ErrorKind::UnterminatedString => f.write_str("unterminated string")?,
            ErrorKind::UnquotedString => {
                f.write_str("invalid TOML value, did you mean to use a quoted string?")?
            }
            ErrorKind::Wanted { expected, found } => write!(f, "expected {expected}, found {found}")?,
            ErrorKind::MultilineStringKey => {
                f.write_str("multiline strings are not allowed for key")?
            }
            ErrorKind::TooDeep => f.write_str("document is nested too deeply")?,
            ErrorKind::DuplicateKey { key, .. } => write!(f, "duplicate key: `{key}`")?,
            ErrorKind::DuplicateTable { name, .. } => {
                write!(f, "redefinition of table `{name}`")?
            }
            ErrorKind::RedefineAsArray => f.write_str("table redefined as array")?,
            ErrorKind::DottedKeyInvalidType { .. } => {
                f.write_str("dotted key attempted to extend non-table type")?
            }
            ErrorKind::FrozenTable { .. } => {
                f.write_str("cannot add keys to an inline table after it is closed")?
            }
            ErrorKind::InvalidNumber => f.write_str("invalid number")?,
            ErrorKind::OutOfRange(kind) => write!(f, "out of range of '{kind}'")?,
            ErrorKind::InvalidDateTime => f.write_str("invalid date or time")?,
        }
        if let Some((line, column)) = self.line_info {
            write!(f, " at line {line} column {column}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diag = Diagnostic::error()
            .with_code(self.kind.to_string())
            .with_message(format!("{} error", self.category()));

        match &self.kind {
            ErrorKind::DuplicateKey { first, .. } => diag.with_labels(vec![
                Label::secondary(fid, *first).with_message("first key instance"),
                Label::primary(fid, self.span).with_message("duplicate key"),
            ]),
            ErrorKind::DuplicateTable { first, .. } => diag.with_labels(vec![
                Label::secondary(fid, *first).with_message("first table instance"),
                Label::primary(fid, self.span).with_message("duplicate table"),
            ]),
            ErrorKind::DottedKeyInvalidType { first } => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("attempted to extend table here"),
                Label::secondary(fid, *first).with_message("non-table"),
            ]),
            ErrorKind::FrozenTable { first } => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("write through inline table"),
                Label::secondary(fid, *first).with_message("inline table defined here"),
            ]),
            ErrorKind::Unexpected(c) => diag.with_labels(vec![
                Label::primary(fid, self.span)
                    .with_message(format!("unexpected character '{}'", Escape(*c))),
            ]),
            ErrorKind::InvalidCharInString(c) => diag.with_labels(vec![
                Label::primary(fid, self.span)
                    .with_message(format!("invalid character '{}' in string", Escape(*c))),
            ]),
            ErrorKind::InvalidEscape(c) => diag.with_labels(vec![
                Label::primary(fid, self.span)
                    .with_message(format!("invalid escape character '{}' in string", Escape(*c))),
            ]),
            ErrorKind::UnterminatedString => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("eof reached before string terminator"),
            ]),
            ErrorKind::Wanted { expected, .. } => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message(format!("expected {expected}")),
            ]),
            ErrorKind::InvalidNumber => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("unable to parse number"),
            ]),
            ErrorKind::OutOfRange(kind) => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message(format!("out of range of '{kind}'")),
            ]),
            ErrorKind::UnquotedString => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("string is not quoted"),
            ]),
            _ => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message(self.kind_message()),
            ]),
        }
    }

    fn kind_message(&self) -> String {
        Error {
            kind: self.kind.clone(),
            span: self.span,
            line_info: None,
        }
        .to_string()
    }
}
