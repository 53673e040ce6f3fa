//! Wire value model
//!
//! Typed values for map keys, map values, and operation arguments. The
//! packer serializes these into payload bytes; the unpacker reproduces them
//! for inspection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single wire value
///
/// Map entries use an order-preserving pair sequence rather than a hash map
/// so that packing the same input always yields the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Explicit null marker
    Nil,

    /// Boolean
    Bool(bool),

    /// Signed 64-bit integer (also carries indices, ranks, counts, attributes)
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// UTF-8 string
    Str(String),

    /// Raw byte blob
    Blob(Vec<u8>),

    /// Ordered sequence of values
    List(Vec<Value>),

    /// Key/value entries in caller order (keys unique)
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// True for the explicit null marker
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(v: Vec<(Value, Value)>) -> Self {
        Value::Map(v)
    }
}

// =============================================================================
// Display (human-readable dumps for the CLI inspector)
// =============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Blob(v) => write!(f, "blob[{} bytes]", v.len()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
