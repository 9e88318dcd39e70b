//! String-keyed map that remembers insertion order.
//!
//! Serialises as a JSON object whose keys appear in insertion order, and deserialises
//! keeping the order in which keys appear in the document. Lookups are linear; the map
//! is meant for whole-document stores that are loaded, edited and written back in full.
//! Building a map from a document or an iterator is linear in the number of entries.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// An insertion-ordered map from `String` keys to `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
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

    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.position(key).map(move |idx| &mut self.entries[idx].1)
    }

    /// Inserts a value under `key`.
    ///
    /// An existing key keeps its position and has its value replaced; the previous value
    /// is returned. A new key is appended at the end.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Bulk builder that indexes key positions so duplicate keys are found in constant time.
struct Builder<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Builder<V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    // Duplicate keys: the later value wins, the first position is kept.
    fn push(&mut self, key: String, value: V) {
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    fn finish(self) -> OrderedMap<V> {
        OrderedMap {
            entries: self.entries,
        }
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut builder = Builder::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            builder.push(k, v);
        }
        builder.finish()
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: serde::Serialize> serde::Serialize for OrderedMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: serde::Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = Builder::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            builder.push(key, value);
        }
        Ok(builder.finish())
    }
}

impl<'de, V: serde::Deserialize<'de>> serde::Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_appends_and_replaces_in_place() {
        let mut map = OrderedMap::new();
        assert!(map.insert("P003", 3).is_none());
        assert!(map.insert("P001", 1).is_none());
        assert_eq!(map.insert("P003", 30), Some(3));

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["P003", "P001"]);
        assert_eq!(map.get("P003"), Some(&30));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut map: OrderedMap<i32> = [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        assert_eq!(map.remove("b"), Some(2));
        assert_eq!(map.remove("b"), None);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_json_preserves_document_order() {
        let raw = r#"{"zeta":1,"alpha":2,"mid":3}"#;
        let map: OrderedMap<i32> = serde_json::from_str(raw).unwrap();

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&map).unwrap(), raw);
    }

    #[test]
    fn test_json_duplicate_key_keeps_first_position_and_last_value() {
        let map: OrderedMap<i32> = serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_collect_large_input_with_duplicates() {
        let map: OrderedMap<usize> = (0..20_000)
            .map(|i| (format!("P{:05}", i % 10_000), i))
            .collect();

        assert_eq!(map.len(), 10_000);
        assert_eq!(map.keys().next(), Some("P00000"));
        assert_eq!(map.get("P00000"), Some(&10_000));
        assert_eq!(map.get("P09999"), Some(&19_999));
    }

    #[test]
    fn test_json_rejects_non_object() {
        let result: Result<OrderedMap<i32>, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }
}
