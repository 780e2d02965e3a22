//! JSON5 → JSON conversion.
//!
//! Parses JSON5 text and writes the resulting tree as JSON through
//! `serde_json`. JSON has no `NaN` or `Infinity`, so non-finite floats come out
//! as `null`.

use crate::error::Result;
use crate::parser::{parse_with, ParseOptions};

/// Convert JSON5 text into compact JSON.
///
/// ```
/// use json5_core::to_json;
///
/// let json = to_json("{ name: 'Joe', tags: ['a', 'b',], }").unwrap();
/// assert_eq!(json, r#"{"name":"Joe","tags":["a","b"]}"#);
/// ```
pub fn to_json(text: &str) -> Result<String> {
    to_json_with(text, &ParseOptions::default(), false)
}

/// Convert JSON5 text into pretty-printed JSON.
pub fn to_json_pretty(text: &str) -> Result<String> {
    to_json_with(text, &ParseOptions::default(), true)
}

/// Convert JSON5 text into JSON using explicit parser options.
///
/// ```
/// use json5_core::{to_json_with, ParseOptions};
///
/// let opts = ParseOptions::default().with_comments(false);
/// assert_eq!(to_json_with("[1, // two\n 2]", &opts, false).unwrap(), "[1]");
/// ```
pub fn to_json_with(text: &str, options: &ParseOptions, pretty: bool) -> Result<String> {
    let value = parse_with(text, options);
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}
