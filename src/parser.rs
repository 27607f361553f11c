//! Builds a [`Table`] from the token stream.
//!
//! The parser pulls tokens from the [`Lexer`] one at a time. Nested arrays
//! and inline tables are handled with an explicit stack of open containers
//! instead of native recursion, so nesting depth costs heap rather than call
//! stack and is capped by [`ParseOptions::max_depth`].

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use crate::{
    Span,
    array::Array,
    error::{Error, ErrorKind},
    lexer::{Lexer, Token, TokenKind},
    table::{Table, TableState},
    value::{Key, Value},
};

/// Limits applied while parsing.
///
/// ```
/// use toml_bridge::{ErrorKind, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// assert!(toml_bridge::parse_with("a = [[1]]", &options).is_ok());
/// let err = toml_bridge::parse_with("a = [[[1]]]", &options).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::TooDeep);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum combined nesting of header paths, dotted keys, arrays and
    /// inline tables. Values above [`MAX_DEPTH_LIMIT`](Self::MAX_DEPTH_LIMIT)
    /// act as that limit.
    pub max_depth: usize,
    /// Maximum input size in bytes.
    pub max_size: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    pub const DEFAULT_MAX_SIZE: usize = 512 * 1024 * 1024;
    /// Highest nesting limit honoured. Dropping, cloning and comparing trees
    /// recurse once per level, so deeper documents are always rejected.
    pub const MAX_DEPTH_LIMIT: usize = 512;

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit, clamped to [`MAX_DEPTH_LIMIT`](Self::MAX_DEPTH_LIMIT).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(Self::MAX_DEPTH_LIMIT);
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    fn check_size(&self, len: usize) -> Result<(), Error> {
        // spans are 32-bit
        let limit = self.max_size.min(u32::MAX as usize);
        if len > limit {
            return Err(Error::from((ErrorKind::FileTooLarge, Span::new(0, 0))));
        }
        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }
}

/// Parses a TOML document into its root [`Table`] with default options.
///
/// ```
/// let table = toml_bridge::parse("[server]\nport = 8080")?;
/// let port = table.get("server").and_then(|s| s.get("port"));
/// assert_eq!(port.and_then(|p| p.as_integer()), Some(8080));
/// # Ok::<(), toml_bridge::Error>(())
/// ```
pub fn parse(source: &str) -> Result<Table, Error> {
    parse_with(source, &ParseOptions::default())
}

/// Parses a TOML document with explicit limits.
///
/// Either the whole document is returned or the first error found; a
/// partially built table is never exposed.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Table, Error> {
    tracing::debug!(bytes = source.len(), "parsing document");
    let result = parse_document(source, options);
    match &result {
        Ok(table) => tracing::debug!(entries = table.len(), "parsed document"),
        Err(err) => tracing::debug!(
            code = %err.kind,
            category = %err.category(),
            line = err.line(),
            "failed to parse document"
        ),
    }
    result
}

/// Parses a byte buffer, validating that it is UTF-8 first.
///
/// Invalid UTF-8 fails with [`ErrorKind::InvalidUtf8`] positioned at the
/// first offending byte.
pub fn from_slice(bytes: &[u8]) -> Result<Table, Error> {
    from_slice_with(bytes, &ParseOptions::default())
}

/// [`from_slice`] with explicit limits.
pub fn from_slice_with(bytes: &[u8], options: &ParseOptions) -> Result<Table, Error> {
    if let Err(err) = options.check_size(bytes.len()) {
        return Err(err.with_source(""));
    }
    match std::str::from_utf8(bytes) {
        Ok(source) => parse_with(source, options),
        Err(e) => {
            let at = e.valid_up_to();
            tracing::debug!(offset = at, "input is not valid UTF-8");
            let prefix = String::from_utf8_lossy(&bytes[..at]);
            let span = Span::new(at as u32, at as u32 + 1);
            Err(Error::from((ErrorKind::InvalidUtf8, span)).with_source(&prefix))
        }
    }
}

fn parse_document(source: &str, options: &ParseOptions) -> Result<Table, Error> {
    if let Err(err) = options.check_size(source.len()) {
        return Err(err.with_source(source));
    }
    let mut root = Table::new();
    root.set_span(Span::new(0, source.len() as u32));
    let mut parser = Parser {
        lexer: Lexer::new(source),
        peeked: None,
        max_depth: options.max_depth.min(ParseOptions::MAX_DEPTH_LIMIT),
        header_depth: 0,
    };
    match parser.document(&mut root) {
        Ok(()) => Ok(root),
        Err(err) => Err(err.with_source(source)),
    }
}

/// A possibly dotted key, split into the tables it walks through and the
/// final segment.
struct DottedKey {
    parents: Vec<Key>,
    last: Key,
}

/// A container whose closing delimiter has not been reached yet.
enum Frame {
    Array {
        array: Array,
        depth: usize,
    },
    InlineTable {
        table: Table,
        depth: usize,
        open: Span,
        /// The key the value currently being read belongs to.
        pending: DottedKey,
    },
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
    max_depth: usize,
    /// Number of tables named by the active header.
    header_depth: usize,
}

impl Parser<'_> {
    fn next(&mut self) -> Result<Token, Error> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn peek_kind(&mut self) -> Result<&TokenKind, Error> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(token).kind)
    }

    /// Whether the next token is `kind`, which must be a unit variant.
    fn peek_is(&mut self, kind: TokenKind) -> Result<bool, Error> {
        Ok(*self.peek_kind()? == kind)
    }

    fn eat_newlines(&mut self) -> Result<(), Error> {
        while self.peek_is(TokenKind::Newline)? {
            self.peeked = None;
        }
        Ok(())
    }

    /// A key/value pair or header must be followed by a newline or the end
    /// of the document.
    fn expect_line_end(&mut self) -> Result<(), Error> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Newline => Ok(()),
            TokenKind::Eof => {
                self.peeked = Some(token);
                Ok(())
            }
            _ => Err(wanted("a newline", &token)),
        }
    }

    fn too_deep(&self, depth: usize, span: Span) -> Result<(), Error> {
        if depth > self.max_depth {
            Err(Error::from((ErrorKind::TooDeep, span)))
        } else {
            Ok(())
        }
    }

    fn document(&mut self, root: &mut Table) -> Result<(), Error> {
        let mut active = &mut *root;
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Newline => {}
                TokenKind::Eof => return Ok(()),
                TokenKind::LeftBracket => {
                    active = self.table_header(&mut *root, false, token.span)?;
                }
                TokenKind::DoubleLeftBracket => {
                    active = self.table_header(&mut *root, true, token.span)?;
                }
                TokenKind::BareKey(_) | TokenKind::String { .. } => {
                    self.peeked = Some(token);
                    self.key_value(active)?;
                }
                _ => return Err(wanted("a table header or key", &token)),
            }
        }
    }

    fn key(&mut self) -> Result<Key, Error> {
        let token = self.next()?;
        let span = token.span;
        match token.kind {
            TokenKind::BareKey(name) => Ok(Key::new(name, span)),
            TokenKind::String {
                value,
                multiline: false,
            } => Ok(Key::new(value, span)),
            TokenKind::String {
                multiline: true, ..
            } => Err(Error::from((ErrorKind::MultilineStringKey, span))),
            _ => Err(wanted("a key", &token)),
        }
    }

    fn key_path(&mut self) -> Result<DottedKey, Error> {
        let mut parents = Vec::new();
        loop {
            let key = self.key()?;
            if self.peek_is(TokenKind::Period)? {
                self.peeked = None;
                parents.push(key);
            } else {
                return Ok(DottedKey { parents, last: key });
            }
        }
    }

    fn expect_equals(&mut self) -> Result<(), Error> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Equals => Ok(()),
            _ => Err(wanted("an equals", &token)),
        }
    }

    /// Handles `[a.b.c]` and `[[a.b.c]]`, returning the table that following
    /// key/value pairs go into.
    fn table_header<'t>(
        &mut self,
        root: &'t mut Table,
        array: bool,
        open: Span,
    ) -> Result<&'t mut Table, Error> {
        let dotted = self.key_path()?;
        let close = self.next()?;
        let closed = if array {
            close.kind == TokenKind::DoubleRightBracket
        } else {
            close.kind == TokenKind::RightBracket
        };
        if !closed {
            let expected = if array {
                "a double right bracket"
            } else {
                "a right bracket"
            };
            return Err(wanted(expected, &close));
        }
        let header = open.join(close.span);
        let depth = dotted.parents.len() + 1;
        self.too_deep(depth, header)?;
        self.expect_line_end()?;
        self.header_depth = depth;
        tracing::trace!(depth, array, "table header");

        let mut table = root;
        for key in &dotted.parents {
            table = navigate_header_intermediate(table, key, header)?;
        }
        if array {
            navigate_header_array_final(table, dotted.last, header)
        } else {
            navigate_header_table_final(table, dotted.last, header)
        }
    }

    fn key_value(&mut self, active: &mut Table) -> Result<(), Error> {
        let dotted = self.key_path()?;
        let slot = self.header_depth + dotted.parents.len();
        self.too_deep(slot, dotted.last.span)?;
        let table = resolve_slot(active, &dotted)?;
        self.expect_equals()?;
        let value = self.value(slot)?;
        self.expect_line_end()?;
        table.insert(dotted.last, value);
        Ok(())
    }

    /// Reads the key and `=` of the next pair in an inline table, checking
    /// it against the pairs already in `table`.
    fn inline_key(&mut self, table: &mut Table, depth: usize) -> Result<(DottedKey, usize), Error> {
        let dotted = self.key_path()?;
        let slot = depth + dotted.parents.len();
        self.too_deep(slot, dotted.last.span)?;
        resolve_slot(table, &dotted)?;
        self.expect_equals()?;
        Ok((dotted, slot))
    }

    /// Reads one value, which for arrays and inline tables includes
    /// everything up to the matching closing delimiter. `depth` is the
    /// nesting depth of the slot the value is stored in.
    fn value(&mut self, mut depth: usize) -> Result<Value, Error> {
        let mut stack: Vec<Frame> = Vec::new();
        'read: loop {
            let token = self.next()?;
            let mut value = match token.kind {
                TokenKind::String { value, .. } => Value::String(value),
                TokenKind::Integer(i) => Value::Integer(i),
                TokenKind::Float(f) => Value::Float(f),
                TokenKind::Boolean(b) => Value::Boolean(b),
                TokenKind::DateTime(dt) => Value::from(dt),
                TokenKind::LeftBracket => {
                    self.too_deep(depth + 1, token.span)?;
                    self.eat_newlines()?;
                    if self.peek_is(TokenKind::RightBracket)? {
                        self.peeked = None;
                        Value::Array(Array::new())
                    } else {
                        depth += 1;
                        stack.push(Frame::Array {
                            array: Array::new(),
                            depth,
                        });
                        continue 'read;
                    }
                }
                TokenKind::LeftBrace => {
                    self.too_deep(depth + 1, token.span)?;
                    let mut table = Table::with_state(TableState::Inline, token.span);
                    if self.peek_is(TokenKind::RightBrace)? {
                        let close = self.next()?;
                        table.set_span(token.span.join(close.span));
                        Value::Table(table)
                    } else {
                        let (pending, slot) = self.inline_key(&mut table, depth + 1)?;
                        stack.push(Frame::InlineTable {
                            table,
                            depth: depth + 1,
                            open: token.span,
                            pending,
                        });
                        depth = slot;
                        continue 'read;
                    }
                }
                _ => return Err(wanted("a value", &token)),
            };

            // hand the finished value to its container, closing containers
            // whose delimiter follows
            loop {
                let Some(frame) = stack.pop() else {
                    return Ok(value);
                };
                match frame {
                    Frame::Array {
                        mut array,
                        depth: array_depth,
                    } => {
                        array.push(value);
                        self.eat_newlines()?;
                        let token = self.next()?;
                        match token.kind {
                            TokenKind::Comma => {
                                self.eat_newlines()?;
                                if self.peek_is(TokenKind::RightBracket)? {
                                    self.peeked = None;
                                    value = Value::Array(array);
                                } else {
                                    stack.push(Frame::Array {
                                        array,
                                        depth: array_depth,
                                    });
                                    depth = array_depth;
                                    continue 'read;
                                }
                            }
                            TokenKind::RightBracket => value = Value::Array(array),
                            _ => return Err(wanted("a comma or right bracket", &token)),
                        }
                    }
                    Frame::InlineTable {
                        mut table,
                        depth: table_depth,
                        open,
                        pending,
                    } => {
                        resolve_slot(&mut table, &pending)?.insert(pending.last, value);
                        let token = self.next()?;
                        match token.kind {
                            TokenKind::Comma => {
                                let (pending, slot) = self.inline_key(&mut table, table_depth)?;
                                stack.push(Frame::InlineTable {
                                    table,
                                    depth: table_depth,
                                    open,
                                    pending,
                                });
                                depth = slot;
                                continue 'read;
                            }
                            TokenKind::RightBrace => {
                                table.set_span(open.join(token.span));
                                value = Value::Table(table);
                            }
                            _ => return Err(wanted("a comma or right brace", &token)),
                        }
                    }
                }
            }
        }
    }
}

/// Builds the error for an unexpected token.
fn wanted(expected: &'static str, token: &Token) -> Error {
    let kind = match token.kind {
        TokenKind::Eof => ErrorKind::UnexpectedEof,
        _ => ErrorKind::Wanted {
            expected,
            found: token.kind.describe(),
        },
    };
    Error::from((kind, token.span))
}

fn duplicate_key(key: &Key, first: Span) -> Error {
    Error::from((
        ErrorKind::DuplicateKey {
            key: key.name.clone(),
            first,
        },
        key.span,
    ))
}

/// Walks the dotted prefix of `dotted` from `table`, creating missing tables,
/// and returns the table its last segment belongs in. Fails if the last
/// segment is already defined there.
fn resolve_slot<'t>(table: &'t mut Table, dotted: &DottedKey) -> Result<&'t mut Table, Error> {
    let mut table = table;
    for key in &dotted.parents {
        table = navigate_dotted_key(table, key)?;
    }
    if let Some(idx) = table.find_index(&dotted.last.name) {
        return Err(duplicate_key(&dotted.last, table.key_at(idx).span));
    }
    Ok(table)
}

/// Navigates one intermediate segment of a dotted key (`a` and `b` in
/// `a.b.c = 1`). Only tables created implicitly or by other dotted keys may
/// be extended.
fn navigate_dotted_key<'t>(table: &'t mut Table, key: &Key) -> Result<&'t mut Table, Error> {
    let Some(idx) = table.find_index(&key.name) else {
        let dotted = Table::with_state(TableState::Dotted, key.span);
        return Ok(table.insert_table(key.clone(), dotted));
    };
    let first = table.key_at(idx).span;
    let invalid = || Error::from((ErrorKind::DottedKeyInvalidType { first }, key.span));
    match table.value_at_mut(idx) {
        Value::Table(t) => match t.state() {
            TableState::Dotted | TableState::Implicit => Ok(t),
            TableState::Inline => Err(Error::from((ErrorKind::FrozenTable { first }, key.span))),
            TableState::Header => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

/// Navigates an intermediate segment of a table header (`a` in `[a.b]`),
/// descending into the last element of arrays of tables.
fn navigate_header_intermediate<'t>(
    table: &'t mut Table,
    key: &Key,
    header: Span,
) -> Result<&'t mut Table, Error> {
    let Some(idx) = table.find_index(&key.name) else {
        let implicit = Table::with_state(TableState::Implicit, header);
        return Ok(table.insert_table(key.clone(), implicit));
    };
    let first = table.key_at(idx).span;
    match table.value_at_mut(idx).descend_mut() {
        Some(t) if t.state() != TableState::Inline => Ok(t),
        _ => Err(duplicate_key(key, first)),
    }
}

/// Handles the final segment of a standard table header `[a.b.c]`.
fn navigate_header_table_final(
    table: &mut Table,
    key: Key,
    header: Span,
) -> Result<&mut Table, Error> {
    let Some(idx) = table.find_index(&key.name) else {
        let defined = Table::with_state(TableState::Header, header);
        return Ok(table.insert_table(key, defined));
    };
    let first = table.key_at(idx).span;
    match table.value_at_mut(idx) {
        Value::Table(t) => match t.state() {
            TableState::Implicit => {
                t.define(header);
                Ok(t)
            }
            TableState::Header => Err(Error::from((
                ErrorKind::DuplicateTable {
                    name: key.name,
                    first: t.span(),
                },
                header,
            ))),
            TableState::Dotted | TableState::Inline => Err(duplicate_key(&key, first)),
        },
        _ => Err(duplicate_key(&key, first)),
    }
}

/// Handles the final segment of an array-of-tables header `[[a.b.c]]`.
fn navigate_header_array_final(
    table: &mut Table,
    key: Key,
    header: Span,
) -> Result<&mut Table, Error> {
    let Some(idx) = table.find_index(&key.name) else {
        let first = Table::with_state(TableState::Header, header);
        return Ok(table.insert_array_of_tables(key, first));
    };
    let first = table.key_at(idx).span;
    match table.value_at_mut(idx) {
        Value::Array(a) if a.is_array_of_tables() => {
            Ok(a.push_table(Table::with_state(TableState::Header, header)))
        }
        Value::Table(_) => Err(Error::from((ErrorKind::RedefineAsArray, header))),
        _ => Err(duplicate_key(&key, first)),
    }
}
