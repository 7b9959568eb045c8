//! The document value type.
//!
//! [`Value`] is a closed variant over the six JSON kinds. Numbers keep the
//! integral/fractional distinction of the wire text through [`Number`]: the
//! reader narrows integral numbers to `Int` when they fit 32 bits and to `Long`
//! otherwise, and everything else becomes `Double`.
//!
//! The `From` impls in this module are the full set of storable argument
//! types accepted by `put`/`add`. Anything else is a compile error rather than
//! a silently ignored argument.

use std::fmt;

use crate::array::JsonArray;
use crate::object::JsonObject;

/// A JSON number, tagged with the width it was stored or parsed with.
///
/// Equality is by variant: `Int(5) != Long(5)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Long(i64),
    Double(f64),
}

impl Number {
    /// Narrows an integral value: `Int` when it fits 32 bits, `Long` otherwise.
    pub fn from_integral(n: i64) -> Self {
        match i32::try_from(n) {
            Ok(i) => Number::Int(i),
            Err(_) => Number::Long(n),
        }
    }

    /// Reads the number as a 32-bit integer.
    ///
    /// `Long` keeps its low 32 bits; `Double` truncates toward zero,
    /// saturating at the bounds (NaN reads as 0).
    pub fn as_i32(&self) -> i32 {
        match *self {
            Number::Int(i) => i,
            Number::Long(l) => l as i32,
            Number::Double(d) => d as i32,
        }
    }

    /// Reads the number as a 64-bit integer, truncating doubles toward zero.
    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Int(i) => i as i64,
            Number::Long(l) => l,
            Number::Double(d) => d as i64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Long(l) => l as f64,
            Number::Double(d) => d,
        }
    }

    pub fn is_integral(&self) -> bool {
        !matches!(self, Number::Double(_))
    }

    /// Doubles that JSON text cannot carry (NaN, ±infinity).
    pub fn is_finite(&self) -> bool {
        match *self {
            Number::Double(d) => d.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Long(l) => write!(f, "{l}"),
            Number::Double(d) => write!(f, "{d}"),
        }
    }
}

/// Any JSON value. Containers own their children.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(JsonArray),
    Object(JsonObject),
}

impl Value {
    /// Name of the value's kind, as used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null, the empty string, and containers with no entries are empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Whether the value is worth keeping when building sparse documents.
    pub fn is_non_empty_value(&self) -> bool {
        !self.is_empty()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_number().map(|n| n.as_i32())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().map(|n| n.as_i64())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut JsonArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Compact JSON text with standard escaping.
    pub fn to_json_string(&self) -> String {
        crate::writer::JsonWriter::default().to_string(self)
    }

    /// Replaces the value with `Null` and returns what was there.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(Number::Int(n as i32))
            }
        })*
    };
}

macro_rules! from_long {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(Number::Long(n as i64))
            }
        })*
    };
}

from_int!(i8, i16, i32, u8, u16);
from_long!(i64, isize, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(l) => Value::Number(Number::Long(l)),
            Err(_) => Value::Number(Number::Double(n as f64)),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(Number::Double(n as f64))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Double(n))
    }
}

impl From<JsonObject> for Value {
    fn from(o: JsonObject) -> Self {
        Value::Object(o)
    }
}

impl From<JsonArray> for Value {
    fn from(a: JsonArray) -> Self {
        Value::Array(a)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}
