//! A TOML parser producing an ordered, typed value tree, and a translator
//! projecting that tree into host-neutral containers.
//!
//! Parsing is whole-document: [`parse`] returns either the fully validated
//! root [`Table`] or the first [`Error`] found, classified by
//! [`ErrorCategory`] and positioned by [`Span`] plus line and column. Key
//! order is preserved everywhere, integers and floats stay distinct, and the
//! four TOML date/time shapes keep their own variants.
//!
//! # Examples
//!
//! ```
//! use toml_bridge::{Native, Value};
//!
//! let content = r#"
//! title = "example"
//!
//! [[things]]
//! name = "hammer"
//! weight = 1.5
//!
//! [[things]]
//! name = "drill"
//! weight = 3
//! added = 2024-01-02
//! "#;
//!
//! let table = toml_bridge::parse(content)?;
//! assert_eq!(table.keys().collect::<Vec<_>>(), ["title", "things"]);
//!
//! let things = table.get("things").and_then(Value::as_array).unwrap();
//! assert_eq!(things.len(), 2);
//! assert_eq!(things[0].get("weight"), Some(&Value::Float(1.5)));
//! assert_eq!(things[1].get("weight"), Some(&Value::Integer(3)));
//!
//! let native = toml_bridge::translate(&table);
//! let drill = &native.get("things").and_then(Native::as_seq).unwrap()[1];
//! assert_eq!(drill.get("added").map(Native::type_str), Some("local date"));
//! # Ok::<(), toml_bridge::Error>(())
//! ```
//!
//! Errors carry enough context to report them:
//!
//! ```
//! use toml_bridge::{ErrorCategory, ErrorKind};
//!
//! let err = toml_bridge::parse("a = 1\na = 2").unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::Semantic);
//! assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }));
//! assert_eq!((err.line(), err.column()), (Some(2), Some(1)));
//! ```

mod array;
mod error;
mod lexer;
mod native;
mod num;
mod parser;
mod span;
mod table;
mod time;
mod value;

pub use array::Array;
pub use error::{Error, ErrorCategory, ErrorKind};
pub use lexer::{Token, TokenKind, tokenize};
pub use native::{Native, parse_native, parse_native_slice, parse_native_slice_with, translate};
pub use parser::{ParseOptions, from_slice, from_slice_with, parse, parse_with};
pub use span::Span;
pub use table::Table;
pub use time::{Date, DateTime, Offset, TemporalKind, Time};
pub use value::{Key, Value};

#[cfg(feature = "serde")]
pub mod impl_serde;
