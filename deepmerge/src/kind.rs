//! Value classification and key enumeration helpers.
//!
//! These are the building blocks the dispatchers use to route values to a
//! per-kind strategy. They are public so custom merge functions can make the
//! same decisions.

use std::fmt;

use indexmap::IndexSet;

use crate::{Key, Value};

/// Classification of a [`Value`] for dispatch purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Undefined, null and primitive leaves.
    None,
    /// A plain keyed record.
    Record,
    /// An ordered list.
    List,
    /// A unique-value set.
    Set,
    /// An associative map.
    Map,
    /// Opaque payloads.
    Other,
}

impl Kind {
    /// Returns `true` for kinds that have a structural merge strategy.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Record | Self::List | Self::Set | Self::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Record => "record",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Other => "other",
        })
    }
}

/// Classify `value`.
///
/// Only the [`Value::Record`] variant is a record: an [`crate::Opaque`]
/// wrapping a [`crate::Record`] is [`Kind::Other`].
///
/// # Examples
///
/// ```
/// use deepmerge::{Kind, Value, classify};
/// use serde_json::json;
///
/// assert_eq!(classify(&Value::from(json!({"a": 1}))), Kind::Record);
/// assert_eq!(classify(&Value::from(3)), Kind::None);
/// assert_eq!(classify(&Value::opaque(std::time::Duration::ZERO)), Kind::Other);
/// ```
#[must_use]
pub const fn classify(value: &Value) -> Kind {
    match value {
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Kind::None
        }
        Value::Record(_) => Kind::Record,
        Value::List(_) => Kind::List,
        Value::Set(_) => Kind::Set,
        Value::Map(_) => Kind::Map,
        Value::Opaque(_) => Kind::Other,
    }
}

/// Union of the own keys of every record in `values`.
///
/// String keys come first in order of first appearance across the inputs,
/// followed by symbol keys in order of first appearance. Non-record values
/// contribute nothing.
///
/// # Examples
///
/// ```
/// use deepmerge::{Key, Value, record_keys};
/// use serde_json::json;
///
/// let values = [json!({"a": 1, "b": 2}), json!({"c": 3, "a": 4})].map(Value::from);
/// let keys = record_keys(&values);
/// assert_eq!(keys, ["a", "b", "c"].map(Key::from));
/// ```
#[must_use]
pub fn record_keys<'a, I>(values: I) -> Vec<Key>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut names = IndexSet::new();
    let mut symbols = IndexSet::new();
    for record in values.into_iter().filter_map(Value::as_record) {
        for key in record.keys() {
            if key.is_symbol() {
                symbols.insert(key);
            } else {
                names.insert(key);
            }
        }
    }
    names.into_iter().chain(symbols).cloned().collect()
}

/// Returns `true` when `value` is a record owning `key`.
///
/// Ownership is about presence: an entry holding [`Value::Undefined`] is
/// still owned.
#[must_use]
pub fn has_own_key(value: &Value, key: &Key) -> bool {
    value
        .as_record()
        .is_some_and(|record| record.contains_key(key))
}
