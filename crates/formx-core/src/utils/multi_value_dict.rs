//! A dictionary that can hold multiple values per key.
//!
//! Form submissions routinely repeat a key (multi-selects, checkbox groups),
//! so posted data is stored as a list of values per key. Keys keep the order
//! in which they were first inserted, which makes re-encoding deterministic.

use std::collections::HashMap;
use std::hash::Hash;

/// A dictionary that maps keys to lists of values.
///
/// [`first`](MultiValueDict::first) returns the first value posted for a key
/// (the conventional form-value semantics) and
/// [`get_list`](MultiValueDict::get_list) all of them.
///
/// # Examples
///
/// ```
/// use formx_core::utils::MultiValueDict;
///
/// let mut d = MultiValueDict::new();
/// d.append("color", "red");
/// d.append("color", "blue");
///
/// assert_eq!(d.first(&"color"), Some(&"red"));
/// assert_eq!(d.get_list(&"color"), Some(&["red", "blue"][..]));
/// ```
#[derive(Debug, Clone)]
pub struct MultiValueDict<K: Eq + Hash, V> {
    inner: HashMap<K, Vec<V>>,
    order: Vec<K>,
}

impl<K: Eq + Hash, V> Default for MultiValueDict<K, V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> MultiValueDict<K, V> {
    /// Creates an empty `MultiValueDict`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value associated with the key.
    pub fn first(&self, key: &K) -> Option<&V> {
        self.inner.get(key).and_then(|v| v.first())
    }

    /// Returns all values associated with the key.
    pub fn get_list(&self, key: &K) -> Option<&[V]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// Sets the value for a key, replacing any existing values.
    pub fn set(&mut self, key: K, value: V) {
        self.set_list(key, vec![value]);
    }

    /// Replaces all values for a key.
    pub fn set_list(&mut self, key: K, values: Vec<V>) {
        if !self.inner.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.inner.insert(key, values);
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: K, value: V) {
        if let Some(values) = self.inner.get_mut(&key) {
            values.push(value);
        } else {
            self.order.push(key.clone());
            self.inner.insert(key, vec![value]);
        }
    }

    /// Returns the keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Returns `(key, values)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.order
            .iter()
            .filter_map(|k| self.inner.get(k).map(|v| (k, v.as_slice())))
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the dictionary contains no keys.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the dictionary contains the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let d: MultiValueDict<String, String> = MultiValueDict::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn test_first_keeps_earliest_value() {
        let mut d = MultiValueDict::new();
        d.append("color", "red");
        d.append("color", "blue");
        d.append("color", "green");

        assert_eq!(d.first(&"color"), Some(&"red"));
        assert_eq!(d.get_list(&"color"), Some(&["red", "blue", "green"][..]));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_set_replaces_values() {
        let mut d = MultiValueDict::new();
        d.append("k", 1);
        d.append("k", 2);
        d.set("k", 3);
        assert_eq!(d.get_list(&"k"), Some(&[3][..]));
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut d = MultiValueDict::new();
        d.append("b", 1);
        d.append("a", 2);
        d.append("b", 3);
        d.set("c", 4);
        let keys: Vec<_> = d.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_key() {
        let d: MultiValueDict<&str, &str> = MultiValueDict::new();
        assert_eq!(d.first(&"x"), None);
        assert_eq!(d.get_list(&"x"), None);
    }
}
