//! Insertion-ordered JSON object.
//!
//! Entries live in a `Vec<(String, Value)>`, so iteration and serialization
//! follow insertion order without depending on `IndexMap`. Re-putting an
//! existing key replaces the value where it stands; it is never moved to the
//! end. Lookups are linear, which is the right trade for the small records
//! this model is used for.

use std::fmt;
use std::str::FromStr;

use crate::access::TypedAccess;
use crate::error::JsonError;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    entries: Vec<(String, Value)>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// An existing key keeps its position in iteration order.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Like [`put`](Self::put), but does nothing when `value` is `None`.
    pub fn put_not_null<V: Into<Value>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Option<Value> {
        match value {
            Some(v) => self.put(key, v),
            None => None,
        }
    }

    /// Removes `key`, shifting later entries up one position.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Key/value pairs with mutable values. Keys cannot be changed in place.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Drops every entry whose value is empty (see [`Value::is_empty`]).
    pub fn retain_non_empty(&mut self) {
        self.entries.retain(|(_, v)| v.is_non_empty_value());
    }

    pub fn to_json_string(&self) -> String {
        crate::writer::JsonWriter::default().to_string(self)
    }
}

impl TypedAccess for JsonObject {
    type Key<'k> = &'k str;

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn describe_key(key: &str) -> String {
        format!("\"{key}\"")
    }
}

/// Same keys mapping to equal values; order does not matter.
impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.lookup(k.as_str()).is_some_and(|o| o == v))
    }
}

/// Borrowing iterator over an object's entries.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Later duplicates overwrite earlier ones in place.
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = JsonObject::new();
        obj.extend(iter);
        obj
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for JsonObject {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

impl FromStr for JsonObject {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::reader::JsonReader::new(s.as_bytes()).read_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_existing_key_keeps_position() {
        let mut obj = JsonObject::new();
        obj.put("a", 1);
        obj.put("b", 2);
        obj.put("c", 3);
        let old = obj.put("a", 10);
        assert_eq!(old, Some(Value::from(1)));
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(obj.lookup("a"), Some(&Value::from(10)));
    }

    #[test]
    fn equality_ignores_order() {
        let a: JsonObject = [("x", 1), ("y", 2)].into_iter().collect();
        let b: JsonObject = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut obj: JsonObject = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(obj.remove("b"), Some(Value::from(2)));
        assert_eq!(obj.remove("b"), None);
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn retain_non_empty_drops_blank_fields() {
        let mut obj = JsonObject::new();
        obj.put("title", "Data");
        obj.put("empty", "");
        obj.put("nested", JsonObject::new());
        obj.put("none", Value::Null);
        obj.retain_non_empty();
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["title"]);
    }
}
