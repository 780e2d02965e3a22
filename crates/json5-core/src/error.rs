//! Error types for JSON5 value access and conversion.
//!
//! Parsing itself never fails: malformed input degrades to `Null` or a partial
//! tree. The variants here cover the failures that *are* reported.

use thiserror::Error;

use crate::value::Kind;

/// Errors reported by value accessors and the JSON conversion path.
#[derive(Error, Debug)]
pub enum Json5Error {
    /// Keyed lookup on an object that has no such key.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// A typed accessor was asked for a payload the value does not hold.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: Kind },

    /// The operation is declared but not yet provided.
    #[error("{0} is not yet provided")]
    Unsupported(&'static str),

    /// Converting a parsed tree to JSON text failed.
    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout json5-core.
pub type Result<T> = std::result::Result<T, Json5Error>;
