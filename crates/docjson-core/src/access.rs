//! Typed accessors shared by [`JsonObject`] and [`JsonArray`].
//!
//! A container only supplies `lookup`/`lookup_mut`; every typed getter is a
//! provided method, so objects (keyed by `&str`) and arrays (keyed by index)
//! follow exactly the same rules:
//!
//! - `get_*(key)` fails with [`JsonError::Missing`] when nothing (or an
//!   explicit null) is stored, and with [`JsonError::TypeMismatch`] when the
//!   stored value cannot be read as the requested type.
//! - `get_*_or(key, default)` returns `default` in both of those cases and
//!   never fails.
//!
//! Numbers coerce freely between widths (doubles truncate toward zero).
//! Strings, booleans and containers are never coerced from other kinds.

use std::fmt::Display;

use crate::array::JsonArray;
use crate::error::{JsonError, Result};
use crate::object::JsonObject;
use crate::value::Value;

pub trait TypedAccess {
    /// How an entry is addressed: `&str` for objects, `usize` for arrays.
    type Key<'k>: Copy + Display;

    fn lookup(&self, key: Self::Key<'_>) -> Option<&Value>;

    fn lookup_mut(&mut self, key: Self::Key<'_>) -> Option<&mut Value>;

    /// Renders a key for error messages.
    fn describe_key(key: Self::Key<'_>) -> String {
        key.to_string()
    }

    /// Non-failing generic lookup. A stored null is returned as `Some(&Value::Null)`.
    fn opt(&self, key: Self::Key<'_>) -> Option<&Value> {
        self.lookup(key)
    }

    /// Generic lookup; only absence is an error.
    fn get(&self, key: Self::Key<'_>) -> Result<&Value> {
        self.lookup(key).ok_or_else(|| JsonError::Missing {
            key: Self::describe_key(key),
        })
    }

    /// Whether the key holds something other than null.
    fn has(&self, key: Self::Key<'_>) -> bool {
        self.lookup(key).is_some_and(|v| !v.is_null())
    }

    fn get_int(&self, key: Self::Key<'_>) -> Result<i32> {
        typed(self, key, "int", Value::as_i32)
    }

    fn get_long(&self, key: Self::Key<'_>) -> Result<i64> {
        typed(self, key, "long", Value::as_i64)
    }

    fn get_double(&self, key: Self::Key<'_>) -> Result<f64> {
        typed(self, key, "double", Value::as_f64)
    }

    fn get_bool(&self, key: Self::Key<'_>) -> Result<bool> {
        typed(self, key, "boolean", Value::as_bool)
    }

    fn get_string(&self, key: Self::Key<'_>) -> Result<&str> {
        typed(self, key, "string", Value::as_str)
    }

    fn get_object(&self, key: Self::Key<'_>) -> Result<&JsonObject> {
        typed(self, key, "object", Value::as_object)
    }

    fn get_array(&self, key: Self::Key<'_>) -> Result<&JsonArray> {
        typed(self, key, "array", Value::as_array)
    }

    fn get_object_mut(&mut self, key: Self::Key<'_>) -> Result<&mut JsonObject> {
        let value = present_mut(self, key)?;
        let found = value.kind();
        value.as_object_mut().ok_or_else(|| JsonError::TypeMismatch {
            key: Self::describe_key(key),
            expected: "object",
            found,
        })
    }

    fn get_array_mut(&mut self, key: Self::Key<'_>) -> Result<&mut JsonArray> {
        let value = present_mut(self, key)?;
        let found = value.kind();
        value.as_array_mut().ok_or_else(|| JsonError::TypeMismatch {
            key: Self::describe_key(key),
            expected: "array",
            found,
        })
    }

    fn get_int_or(&self, key: Self::Key<'_>, default: i32) -> i32 {
        self.lookup(key).and_then(Value::as_i32).unwrap_or(default)
    }

    fn get_long_or(&self, key: Self::Key<'_>, default: i64) -> i64 {
        self.lookup(key).and_then(Value::as_i64).unwrap_or(default)
    }

    fn get_double_or(&self, key: Self::Key<'_>, default: f64) -> f64 {
        self.lookup(key).and_then(Value::as_f64).unwrap_or(default)
    }

    fn get_bool_or(&self, key: Self::Key<'_>, default: bool) -> bool {
        self.lookup(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn get_string_or<'a>(&'a self, key: Self::Key<'_>, default: &'a str) -> &'a str {
        self.lookup(key).and_then(Value::as_str).unwrap_or(default)
    }

    fn get_object_or<'a>(&'a self, key: Self::Key<'_>, default: &'a JsonObject) -> &'a JsonObject {
        self.lookup(key).and_then(Value::as_object).unwrap_or(default)
    }

    fn get_array_or<'a>(&'a self, key: Self::Key<'_>, default: &'a JsonArray) -> &'a JsonArray {
        self.lookup(key).and_then(Value::as_array).unwrap_or(default)
    }

    fn get_or<'a>(&'a self, key: Self::Key<'_>, default: &'a Value) -> &'a Value {
        match self.lookup(key) {
            Some(v) if !v.is_null() => v,
            _ => default,
        }
    }
}

/// Shared body of the throwing getters: null counts as missing.
fn typed<'a, C, T>(
    container: &'a C,
    key: C::Key<'_>,
    expected: &'static str,
    read: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T>
where
    C: TypedAccess + ?Sized,
{
    let value = match container.lookup(key) {
        Some(v) if !v.is_null() => v,
        _ => {
            return Err(JsonError::Missing {
                key: C::describe_key(key),
            })
        }
    };
    read(value).ok_or_else(|| JsonError::TypeMismatch {
        key: C::describe_key(key),
        expected,
        found: value.kind(),
    })
}

fn present_mut<'a, C>(container: &'a mut C, key: C::Key<'_>) -> Result<&'a mut Value>
where
    C: TypedAccess + ?Sized,
{
    match container.lookup_mut(key) {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(JsonError::Missing {
            key: C::describe_key(key),
        }),
    }
}
