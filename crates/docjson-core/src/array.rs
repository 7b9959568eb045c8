//! Zero-indexed, ordered JSON array.

use std::fmt;
use std::str::FromStr;

use crate::access::TypedAccess;
use crate::error::JsonError;
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    items: Vec<Value>,
}

impl JsonArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a value.
    pub fn add(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// Appends `value` unless it is `None`.
    pub fn add_not_null<V: Into<Value>>(&mut self, value: Option<V>) {
        if let Some(v) = value {
            self.add(v);
        }
    }

    pub fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.items.extend(values.into_iter().map(Into::into));
    }

    /// Appends every element of `values`, or nothing when `values` is `None`.
    pub fn add_all_not_null<I>(&mut self, values: Option<I>)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        if let Some(values) = values {
            self.add_all(values);
        }
    }

    /// Stores `value` at `index` and returns the element it replaced.
    ///
    /// Writing at `len()` appends. Writing past the end pads the gap with
    /// nulls first, so the returned value is `None` in both cases.
    pub fn put(&mut self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        if index < self.items.len() {
            return Some(std::mem::replace(&mut self.items[index], value));
        }
        self.items.resize(index, Value::Null);
        self.items.push(value);
        None
    }

    /// Like [`put`](Self::put), but does nothing when `value` is `None`.
    pub fn put_not_null<V: Into<Value>>(&mut self, index: usize, value: Option<V>) -> Option<Value> {
        value.and_then(|v| self.put(index, v))
    }

    /// Removes the element at `index`; later elements shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Drops every element that is empty (see [`Value::is_empty`]).
    pub fn retain_non_empty(&mut self) {
        self.items.retain(Value::is_non_empty_value);
    }

    pub fn to_json_string(&self) -> String {
        crate::writer::JsonWriter::default().to_string(self)
    }
}

impl TypedAccess for JsonArray {
    type Key<'k> = usize;

    fn lookup(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    fn lookup_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    fn describe_key(index: usize) -> String {
        format!("[{index}]")
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for JsonArray {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<V: Into<Value>> FromIterator<V> for JsonArray {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Into<Value>> Extend<V> for JsonArray {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl From<Vec<Value>> for JsonArray {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl FromStr for JsonArray {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::reader::JsonReader::new(s.as_bytes()).read_array()
    }
}
