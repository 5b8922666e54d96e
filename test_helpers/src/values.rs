//! Builders for [`Value`] fixtures.

use deepmerge::Value;
use serde_json::Value as Json;

/// Converts JSON into a [`Value`].
#[must_use]
pub fn json(value: Json) -> Value {
    Value::from(value)
}

/// Converts each JSON item into a [`Value`].
#[must_use]
pub fn layers<I: IntoIterator<Item = Json>>(items: I) -> Vec<Value> {
    items.into_iter().map(Value::from).collect()
}

/// Builds a set of integers.
#[must_use]
pub fn int_set(items: &[i64]) -> Value {
    Value::set(items.iter().copied())
}

/// Builds a map from string keys to integers.
#[must_use]
pub fn str_int_map(entries: &[(&str, i64)]) -> Value {
    Value::map(entries.iter().map(|&(key, value)| (key, value)))
}
