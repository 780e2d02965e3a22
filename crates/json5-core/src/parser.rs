//! JSON5 recursive-descent parser: converts text into a [`Value`] tree.
//!
//! The parser walks the input once, left to right, with a single byte cursor.
//! There is no token list and no backtracking: each sub-parser advances the
//! cursor past exactly the construct it consumes and hands control back.
//!
//! Grammar dispatch looks at the next significant character:
//!
//! - `{` object, `[` array, `"`/`'` string
//! - `n` null, `t`/`f` boolean
//! - digit, `-`, `+`, `.`, `I`, `N` number (including `NaN`/`Infinity`)
//! - anything else: nothing is produced and the cursor stays put
//!
//! # Malformed input
//!
//! Parsing never fails. Unrecognized or truncated input leaves the tree as far
//! as it got: an unknown character at an element position ends the enclosing
//! array, an object member with an empty or malformed value keeps `Null` and
//! the object reads on, an unterminated string keeps what was collected, and
//! trailing text after a complete value is ignored.

use std::collections::btree_map::Entry;

use tracing::{debug, trace};

use crate::value::{Array, Object, Value};

/// Default nesting limit for objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration.
///
/// ```
/// use json5_core::{parse_with, ParseOptions};
///
/// let opts = ParseOptions::default().with_max_depth(1);
/// let v = parse_with("[[1], 2]", &opts);
/// assert_eq!(v.size(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Containers nested deeper than this are not entered.
    pub max_depth: usize,
    /// Treat `//` and `/* */` comments as insignificant input.
    pub comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            comments: true,
        }
    }
}

impl ParseOptions {
    /// Set the nesting limit for objects and arrays.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable comment skipping.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}

/// Parse JSON5 text with default options.
///
/// An empty input yields `Null`. Malformed input never fails; see the module
/// docs for how it degrades.
///
/// ```
/// use json5_core::parse;
///
/// let v = parse("{ d: {a: 1, b: 'asd', c: true} }");
/// assert_eq!(v["d"]["b"].get::<&str>(), "asd");
/// assert_eq!(v[0][2].get::<bool>(), true);
/// ```
pub fn parse(text: &str) -> Value {
    parse_with(text, &ParseOptions::default())
}

/// Parse JSON5 text with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Value {
    if text.is_empty() {
        return Value::Null;
    }

    let mut parser = Parser::with_options(text, *options);
    let value = parser.parse_value().unwrap_or_default();
    trace!(
        consumed = parser.position(),
        len = text.len(),
        kind = %value.kind(),
        "parsed JSON5 document"
    );
    value
}

/// Cursor over a JSON5 input buffer.
///
/// The cursor is a byte offset that always sits on a `char` boundary.
pub struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    /// Set once the nesting limit is hit; every open body stops after that.
    halted: bool,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, ParseOptions::default())
    }

    pub fn with_options(text: &'a str, options: ParseOptions) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            halted: false,
            options,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The input not yet consumed.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn starts_with(&self, lit: &str) -> bool {
        self.bytes[self.pos..].starts_with(lit.as_bytes())
    }

    /// Advance past one character. Returns false at end of input.
    fn bump_char(&mut self) -> bool {
        match self.peek_char() {
            Some(c) => {
                self.pos += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Skip whitespace and, unless disabled, `//` line and `/* */` block
    /// comments, in any order.
    pub fn skip_insignificant(&mut self) {
        loop {
            match self.peek() {
                Some(b'/') if self.options.comments && self.peek_at(1) == Some(b'/') => {
                    self.pos = match self.bytes[self.pos + 2..].iter().position(|&b| b == b'\n') {
                        Some(i) => self.pos + 2 + i + 1,
                        None => self.bytes.len(),
                    };
                }
                Some(b'/') if self.options.comments && self.peek_at(1) == Some(b'*') => {
                    // An unterminated block comment swallows the rest of the input.
                    self.pos = match self.bytes[self.pos + 2..]
                        .windows(2)
                        .position(|w| w == b"*/")
                    {
                        Some(i) => self.pos + 2 + i + 2,
                        None => self.bytes.len(),
                    };
                }
                Some(_) => match self.peek_char() {
                    Some(c) if is_whitespace(c) => self.pos += c.len_utf8(),
                    _ => break,
                },
                None => break,
            }
        }
    }

    /// Grammar dispatch: parse one value at the cursor.
    ///
    /// Returns `None` when nothing was produced. In that case the cursor has
    /// only moved past insignificant input, except for a malformed number
    /// token, which is consumed without producing a value.
    pub fn parse_value(&mut self) -> Option<Value> {
        if self.halted {
            return None;
        }
        self.skip_insignificant();

        match self.peek()? {
            b'{' => self.parse_object(),
            b'[' => self.parse_array(),
            b'"' | b'\'' => Some(Value::String(self.parse_string())),
            b'n' => self.parse_literal("null", Value::Null),
            b't' | b'f' => self
                .parse_literal("true", Value::Boolean(true))
                .or_else(|| self.parse_literal("false", Value::Boolean(false))),
            b'0'..=b'9' | b'-' | b'+' | b'.' | b'I' | b'N' => self.parse_number(),
            _ => None,
        }
    }

    fn enter(&mut self) -> bool {
        if self.depth >= self.options.max_depth {
            debug!(
                max_depth = self.options.max_depth,
                position = self.pos,
                "nesting limit reached, container not entered"
            );
            self.halted = true;
            return false;
        }
        self.depth += 1;
        true
    }

    fn parse_object(&mut self) -> Option<Value> {
        if !self.enter() {
            return None;
        }
        self.pos += 1;

        let mut map = Object::new();
        while !self.halted {
            self.skip_insignificant();
            match self.peek() {
                None => break,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            let key = self.parse_key();
            // Step over the separator. Without a key this is what skips commas
            // and stray characters between members.
            if !self.bump_char() {
                break;
            }
            let Some(key) = key else {
                continue;
            };

            // An empty or malformed value leaves the key at `Null`; the next
            // pass steps over whatever stopped it.
            let value = self.parse_value();
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(value.unwrap_or_default());
                }
                Entry::Occupied(slot) => {
                    trace!(key = slot.key().as_str(), "duplicate key ignored");
                }
            }
        }

        self.depth -= 1;
        Some(Value::Object(map))
    }

    fn parse_array(&mut self) -> Option<Value> {
        if !self.enter() {
            return None;
        }
        self.pos += 1;

        let mut arr = Array::new();
        while !self.halted {
            self.skip_insignificant();
            match self.peek() {
                None => break,
                Some(b',') => {
                    self.pos += 1;
                    continue;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            let before = self.pos;
            match self.parse_value() {
                Some(v) => arr.push(v),
                None if self.pos == before => break,
                None => arr.push(Value::Null),
            }
        }

        self.depth -= 1;
        Some(Value::Array(arr))
    }

    /// Scan an object key: a bare identifier or a quoted string. Whitespace
    /// between the key and its separator is consumed but is not part of the
    /// key.
    fn parse_key(&mut self) -> Option<String> {
        let key = match self.peek()? {
            b'"' | b'\'' => self.parse_string(),
            b if is_ident_start(b) => {
                let start = self.pos;
                self.pos += 1;
                while self.peek().is_some_and(is_ident_continue) {
                    self.pos += 1;
                }
                self.text[start..self.pos].to_string()
            }
            _ => return None,
        };

        if self.peek() != Some(b':') {
            self.skip_insignificant();
        }
        Some(key)
    }

    /// Parse a quoted string. The opening quote decides the closing one; the
    /// cursor ends one past the closing quote, or at end of input when the
    /// string is unterminated.
    fn parse_string(&mut self) -> String {
        let quote = self.bytes[self.pos];
        self.pos += 1;

        let mut out = String::new();
        // Start of the pending unescaped run. Runs only break at ASCII bytes,
        // so every slice lands on a char boundary.
        let mut run = self.pos;
        while let Some(b) = self.peek() {
            if b == quote {
                out.push_str(&self.text[run..self.pos]);
                self.pos += 1;
                return out;
            }
            if b == b'\\' {
                out.push_str(&self.text[run..self.pos]);
                self.pos += 1;
                self.parse_escape(&mut out);
                run = self.pos;
                continue;
            }
            self.pos += 1;
        }

        out.push_str(&self.text[run..]);
        out
    }

    /// Decode one escape sequence; the cursor sits just after the backslash.
    fn parse_escape(&mut self, out: &mut String) {
        let Some(c) = self.peek_char() else {
            return;
        };
        self.pos += c.len_utf8();

        match c {
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => match self.take_hex(2) {
                Some(n) => out.push(char::from_u32(n).unwrap_or(char::REPLACEMENT_CHARACTER)),
                None => out.push('x'),
            },
            'u' => match self.take_hex(4) {
                Some(unit) => out.push(self.decode_utf16(unit)),
                None => out.push('u'),
            },
            // Line continuations.
            '\r' => {
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn take_hex(&mut self, len: usize) -> Option<u32> {
        let digits = self.bytes.get(self.pos..self.pos + len)?;
        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let n = u32::from_str_radix(&self.text[self.pos..self.pos + len], 16).ok()?;
        self.pos += len;
        Some(n)
    }

    /// Turn a `\u` code unit into a char, pairing a high surrogate with a
    /// following `\u` low surrogate. Unpaired surrogates become U+FFFD.
    fn decode_utf16(&mut self, unit: u32) -> char {
        if (0xD800..0xDC00).contains(&unit) && self.starts_with("\\u") {
            let save = self.pos;
            self.pos += 2;
            match self.take_hex(4) {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
                _ => self.pos = save,
            }
        }
        char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn parse_literal(&mut self, lit: &str, value: Value) -> Option<Value> {
        if self.starts_with(lit) {
            self.pos += lit.len();
            Some(value)
        } else {
            None
        }
    }

    /// Parse a number or one of the special float literals.
    ///
    /// Hex (`0x`) tokens and tokens without a radix point or exponent become
    /// `Integer`; an integer that does not fit in `i64` falls back to `Float`.
    fn parse_number(&mut self) -> Option<Value> {
        for (lit, n) in [
            ("NaN", f64::NAN),
            ("+NaN", f64::NAN),
            ("-NaN", -f64::NAN),
            ("Infinity", f64::INFINITY),
            ("+Infinity", f64::INFINITY),
            ("-Infinity", f64::NEG_INFINITY),
        ] {
            if self.starts_with(lit) {
                self.pos += lit.len();
                return Some(Value::Float(n));
            }
        }

        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let negative = self.bytes[start] == b'-';

        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            self.skip_while(|b| b.is_ascii_hexdigit());
            let digits = &self.text[digits_start..self.pos];
            if digits.is_empty() {
                return None;
            }
            return Some(hex_value(digits, negative));
        }

        let mut is_float = false;
        self.skip_while(|b| b.is_ascii_digit());
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.skip_while(|b| b.is_ascii_digit());
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digit_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if self.peek_at(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                self.pos += digit_at;
                self.skip_while(|b| b.is_ascii_digit());
            }
        }

        let token = &self.text[start..self.pos];
        if !token.bytes().any(|b| b.is_ascii_digit()) {
            trace!(token, "number token without digits");
            return None;
        }

        if is_float {
            return token.parse::<f64>().ok().map(Value::Float);
        }
        match token.parse::<i64>() {
            Ok(n) => Some(Value::Integer(n)),
            Err(_) => token.parse::<f64>().ok().map(Value::Float),
        }
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }
}

fn hex_value(digits: &str, negative: bool) -> Value {
    let magnitude = match i128::from_str_radix(digits, 16) {
        Ok(m) => {
            let n = if negative { -m } else { m };
            if let Ok(n) = i64::try_from(n) {
                return Value::Integer(n);
            }
            m as f64
        }
        Err(_) => digits.bytes().fold(0.0, |acc, b| {
            acc * 16.0 + f64::from((b as char).to_digit(16).unwrap_or(0))
        }),
    };
    Value::Float(if negative { -magnitude } else { magnitude })
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
