//! # json5-core
//!
//! Pure-Rust parser for **JSON5**, the JSON superset that allows comments,
//! unquoted identifier keys, single-quoted strings, trailing commas and
//! extended numeric literals (hex, leading/trailing decimal point, explicit
//! sign, `NaN`, `Infinity`).
//!
//! Parsing produces a [`Value`] tree with typed accessors. The parser is
//! forgiving: it never returns an error, and malformed input degrades to
//! `Null` or a partially built tree.
//!
//! ## Quick start
//!
//! ```rust
//! use json5_core::parse;
//!
//! let v = parse("{ witharray: [{ name: 'Joe' }], nested: [[1], [4, 5]] }");
//! assert!(v.is_object());
//! assert_eq!(v["witharray"][0]["name"].get::<&str>(), "Joe");
//! assert_eq!(v["nested"][1][0].get::<i32>(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: JSON5 text → [`Value`] (`parse`, `parse_with`, `ParseOptions`)
//! - [`value`]: the value tree and its accessors
//! - [`json`]: JSON5 text → JSON text
//! - [`error`]: Error types for reported accessor failures

pub mod error;
pub mod json;
pub mod parser;
pub mod value;

pub use error::{Json5Error, Result};
pub use json::{to_json, to_json_pretty, to_json_with};
pub use parser::{parse, parse_with, ParseOptions, Parser, DEFAULT_MAX_DEPTH};
pub use value::{FromValue, Kind, Value};
