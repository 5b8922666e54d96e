//! Insertion-ordered keyed records.

use indexmap::IndexMap;

use super::{Key, Value};

/// A plain keyed record.
///
/// Entries keep insertion order. Every insert creates an own entry: records
/// have no prototype chain, so keys such as `"__proto__"` are stored like any
/// other name and can never leak into unrelated records.
///
/// # Examples
///
/// ```
/// use deepmerge::{Key, Record, Value};
///
/// let mut record = Record::new();
/// record.insert("__proto__", Value::from(true));
/// assert!(record.contains_key(&Key::from("__proto__")));
/// assert!(Record::new().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    entries: IndexMap<Key, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Number of own entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `key` is an own entry.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up the value stored under the string `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.get(&Key::from(name))
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Define `key` as an own entry, returning the previous value.
    ///
    /// Existing keys keep their position.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Own keys: string names in insertion order, then symbols in insertion
    /// order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        let names = self.entries.keys().filter(|key| !key.is_symbol());
        let symbols = self.entries.keys().filter(|key| key.is_symbol());
        names.chain(symbols)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Record
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
