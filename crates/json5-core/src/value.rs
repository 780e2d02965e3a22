//! The JSON5 value tree and its typed accessors.
//!
//! A [`Value`] is a closed sum type. Containers own their children by value, so
//! a parsed document is a plain acyclic tree with no shared references. There is
//! no public mutation API: once [`crate::parse`] returns, the tree is read-only.
//!
//! # Failure classes
//!
//! Accessors follow three distinct policies, and callers rely on the difference:
//!
//! - **Graceful**: [`Value::at_opt`], [`Value::value_or`], [`Value::size`] and
//!   positional/keyed access on a non-container never fail; they fall back to
//!   `Null`, a default, or zero.
//! - **Reported**: [`Value::at_key`] on an object without that key returns
//!   [`Json5Error::KeyNotFound`]; [`Value::try_get`] returns
//!   [`Json5Error::TypeMismatch`].
//! - **Caller must avoid**: [`Value::at`] with an out-of-range position and
//!   [`Value::get`] on a mismatched variant panic.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{Json5Error, Result};

/// Object payload. Iteration order is key order, not insertion order.
pub type Object = BTreeMap<String, Value>;

/// Array payload, in document order.
pub type Array = Vec<Value>;

static NULL: Value = Value::Null;

/// A parsed JSON5 value.
///
/// Integers and floats are separate variants: `1` parses as `Integer(1)` while
/// `1.0`, `1e3`, `NaN` and `Infinity` parse as `Float`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Object(Object),
    Array(Array),
}

/// The variant tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Object,
    Array,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Array => "array",
        };
        f.write_str(name)
    }
}

/// Types a [`Value`] payload can be read as.
///
/// Each implementation accepts exactly one variant: `bool` reads `Boolean`,
/// every integral type reads `Integer` (narrowing with `as`), `f32`/`f64` read
/// `Float`, and `String`/`&str` read `String`. An integer is never read as a
/// float or vice versa.
pub trait FromValue<'a>: Sized {
    /// Human-readable name of the accepted variant, used in mismatch errors.
    const EXPECTED: &'static str;

    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl<'a> FromValue<'a> for $t {
                const EXPECTED: &'static str = "integer";

                fn from_value(value: &'a Value) -> Option<Self> {
                    match value {
                        Value::Integer(n) => Some(*n as $t),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! from_float {
    ($($t:ty),*) => {
        $(
            impl<'a> FromValue<'a> for $t {
                const EXPECTED: &'static str = "float";

                fn from_value(value: &'a Value) -> Option<Self> {
                    match value {
                        Value::Float(n) => Some(*n as $t),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_float!(f32, f64);

impl<'a> FromValue<'a> for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a str {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// True for the `Float` variant only; integers answer
    /// [`is_number_integer`](Self::is_number_integer) instead.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Read the payload as `T`.
    ///
    /// # Panics
    ///
    /// Panics if the active variant is not the one `T` reads. Use
    /// [`try_get`](Self::try_get) or [`value_or`](Self::value_or) when the
    /// variant is not known up front.
    pub fn get<'a, T: FromValue<'a>>(&'a self) -> T {
        match self.try_get() {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Read the payload as `T`, reporting a [`Json5Error::TypeMismatch`] when
    /// the active variant is not the one `T` reads.
    pub fn try_get<'a, T: FromValue<'a>>(&'a self) -> Result<T> {
        T::from_value(self).ok_or(Json5Error::TypeMismatch {
            expected: T::EXPECTED,
            found: self.kind(),
        })
    }

    /// Read the payload as `T`, or return `default` when the variant does not
    /// match. Never fails.
    ///
    /// ```
    /// use json5_core::parse;
    ///
    /// let v = parse("[1, 2, 3]");
    /// assert_eq!(v.at_opt(5).value_or(42), 42);
    /// assert_eq!(v.at_opt(1).value_or(42), 2);
    /// ```
    pub fn value_or<'a, T: FromValue<'a>>(&'a self, default: T) -> T {
        T::from_value(self).unwrap_or(default)
    }

    /// Positional access.
    ///
    /// For an array this is the element at `index`; for an object it is the
    /// value of the `index`-th key in key order. Any other variant yields
    /// `Null`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for an array or object. Use
    /// [`at_opt`](Self::at_opt) for bounds-checked array access.
    pub fn at(&self, index: usize) -> &Value {
        match self {
            Value::Array(arr) => &arr[index],
            Value::Object(map) => match map.values().nth(index) {
                Some(v) => v,
                None => panic!(
                    "index out of bounds: the object has {} keys but the index is {index}",
                    map.len()
                ),
            },
            _ => &NULL,
        }
    }

    /// Bounds-checked array access. Returns `Null` when `index` is out of
    /// range or the value is not an array.
    pub fn at_opt(&self, index: usize) -> &Value {
        match self {
            Value::Array(arr) => arr.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Keyed access.
    ///
    /// A non-object yields `Ok(Null)`. An object without `key` is reported as
    /// [`Json5Error::KeyNotFound`].
    pub fn at_key(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Object(map) => map
                .get(key)
                .ok_or_else(|| Json5Error::KeyNotFound(key.to_string())),
            _ => Ok(&NULL),
        }
    }

    /// Number of elements or members; 0 for scalars and null.
    pub fn size(&self) -> usize {
        match self {
            Value::Array(arr) => arr.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Render the value as JSON5 text.
    ///
    /// Not yet provided: always returns [`Json5Error::Unsupported`]. For JSON
    /// output use [`crate::to_json`] or serialize the value with `serde_json`.
    pub fn dump(&self) -> Result<String> {
        Err(Json5Error::Unsupported("JSON5 serialization"))
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Same as [`Value::at`].
    fn index(&self, index: usize) -> &Value {
        self.at(index)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Same as [`Value::at_key`], panicking where `at_key` reports
    /// [`Json5Error::KeyNotFound`].
    fn index(&self, key: &str) -> &Value {
        match self.at_key(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! into_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

into_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

/// JSON-shaped serialization. `serde_json` writes non-finite floats as `null`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
        }
    }
}
