//! Built-in in place strategies.
//!
//! Each strategy first makes sure the target has the expected shape: a target
//! of another kind is reset to an empty value of the right kind. Writes go
//! through [`Arc::make_mut`], so a payload still shared with a source is
//! copied before it is changed.

use std::sync::Arc;

use super::MergeIntoUtils;
use crate::meta::KeyContext;
use crate::{MergeResult, Record, Value, record_keys};

/// Merge source records into the target record key by key.
///
/// Keys the target already owns are merged in place with every source that
/// owns them. Keys the target lacks start from the first source owning them,
/// which is linked rather than copied, and absorb the remaining owners.
///
/// # Errors
///
/// Propagates errors from strategies reached by the recursion.
pub fn merge_records_into<M>(
    target: &mut Value,
    sources: &[Value],
    utils: &MergeIntoUtils<'_, M>,
    meta: Option<&M>,
) -> MergeResult<()> {
    let keys = record_keys(std::iter::once(&*target).chain(sources));
    let parents: Arc<[Value]> = sources.into();

    if !matches!(target, Value::Record(_)) {
        *target = Value::record(Record::new());
    }
    let Value::Record(record) = target else {
        return Ok(());
    };
    let record = Arc::make_mut(record);

    for key in keys {
        let owned: Vec<Value> = sources
            .iter()
            .filter_map(|source| source.as_record()?.get(&key).cloned())
            .collect();
        let context = KeyContext::new(key.clone(), Arc::clone(&parents));
        let child_meta = utils.update_meta(meta, context);
        if let Some(slot) = record.get_mut(&key) {
            utils.merge_into(slot, &owned, Some(&child_meta))?;
        } else if let Some((first, rest)) = owned.split_first() {
            let mut slot = first.clone();
            utils.merge_into(&mut slot, rest, Some(&child_meta))?;
            record.insert(key, slot);
        }
    }
    Ok(())
}

/// Append the items of every source list to the target list.
pub fn merge_lists_into(target: &mut Value, sources: &[Value]) {
    if !matches!(target, Value::List(_)) {
        *target = Value::from(Vec::new());
    }
    let Value::List(items) = target else {
        return;
    };
    let additions = sources.iter().filter_map(Value::as_list).flatten().cloned();
    Arc::make_mut(items).extend(additions);
}

/// Insert the members of every source set into the target set.
pub fn merge_sets_into(target: &mut Value, sources: &[Value]) {
    if !matches!(target, Value::Set(_)) {
        *target = Value::Set(Arc::default());
    }
    let Value::Set(items) = target else {
        return;
    };
    let additions = sources.iter().filter_map(Value::as_set).flatten().cloned();
    Arc::make_mut(items).extend(additions);
}

/// Set every entry of every source map on the target map.
pub fn merge_maps_into(target: &mut Value, sources: &[Value]) {
    if !matches!(target, Value::Map(_)) {
        *target = Value::Map(Arc::default());
    }
    let Value::Map(entries) = target else {
        return;
    };
    let additions = sources
        .iter()
        .filter_map(Value::as_map)
        .flatten()
        .map(|(key, value)| (key.clone(), value.clone()));
    Arc::make_mut(entries).extend(additions);
}

/// Replace the target with the last source; no sources leave it unchanged.
pub fn merge_others_into(target: &mut Value, sources: &[Value]) {
    if let Some(last) = sources.last() {
        *target = last.clone();
    }
}
