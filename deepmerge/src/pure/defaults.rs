//! Built-in pure-mode strategies.
//!
//! Custom strategies can call these directly, or return
//! [`crate::Outcome::DefaultMerge`] to have the dispatcher do it.

use std::sync::Arc;

use super::MergeUtils;
use crate::meta::KeyContext;
use crate::{MergeResult, Record, Resolved, Value, ValueMap, ValueSet, record_keys};

/// Merge records key by key.
///
/// Keys are visited as [`crate::record_keys`] lists them. For each key the
/// values of the records owning it are merged recursively with metadata
/// derived from `meta`; a key owned by a single record is still routed
/// through the others strategy, which returns it unchanged by default. Keys
/// whose merge resolves to a skip are left out.
///
/// # Errors
///
/// Propagates errors from strategies reached by the recursion.
pub fn merge_records<M>(
    values: &[Value],
    utils: &MergeUtils<'_, M>,
    meta: Option<&M>,
) -> MergeResult<Value> {
    let keys = record_keys(values);
    let parents: Arc<[Value]> = values.into();
    let mut result = Record::with_capacity(keys.len());

    for key in keys {
        let owned: Vec<Value> = values
            .iter()
            .filter_map(|value| value.as_record()?.get(&key).cloned())
            .collect();
        if owned.is_empty() {
            continue;
        }
        let context = KeyContext::new(key.clone(), Arc::clone(&parents));
        let child_meta = utils.update_meta(meta, context);
        match utils.merge_values(&owned, Some(&child_meta))? {
            Resolved::Value(merged) => {
                result.insert(key, merged);
            }
            Resolved::Skip => tracing::trace!(%key, "skipping key"),
        }
    }
    Ok(Value::record(result))
}

/// Concatenate lists in input order. Items are neither deduplicated nor
/// merged.
#[must_use]
pub fn merge_lists(values: &[Value]) -> Value {
    let items: Vec<Value> = values
        .iter()
        .filter_map(Value::as_list)
        .flatten()
        .cloned()
        .collect();
    Value::from(items)
}

/// Union of sets in input order; repeated members keep their first position.
#[must_use]
pub fn merge_sets(values: &[Value]) -> Value {
    let items: ValueSet = values
        .iter()
        .filter_map(Value::as_set)
        .flatten()
        .cloned()
        .collect();
    Value::Set(Arc::new(items))
}

/// Union of maps in input order; later entries overwrite earlier values for
/// the same key, which keeps its first position.
#[must_use]
pub fn merge_maps(values: &[Value]) -> Value {
    let entries: ValueMap = values
        .iter()
        .filter_map(Value::as_map)
        .flatten()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Map(Arc::new(entries))
}

/// The last value wins; no values yields [`Value::Undefined`].
#[must_use]
pub fn merge_others(values: &[Value]) -> Value {
    values.last().cloned().unwrap_or_default()
}
