//! Behaviour of in place merging.

use anyhow::{Result, ensure};
use deepmerge::{IntoOutcome, KeyContext, MergeIntoOptions, Value, merge, merge_into};
use rstest::rstest;
use serde_json::json;
use test_helpers::recorder::Recorder;
use test_helpers::values::{int_set, json as value, layers, str_int_map};

#[rstest]
fn sole_contributors_are_linked_by_reference() -> Result<()> {
    let mut target = value(json!({"a": 1}));
    let source = value(json!({"b": {"deep": [1, 2]}}));
    merge_into(&mut target, std::slice::from_ref(&source));

    let linked = target
        .field("b")
        .zip(source.field("b"))
        .is_some_and(|(merged, original)| merged.ptr_eq(original));
    ensure!(linked, "b should share the source's allocation");
    Ok(())
}

#[rstest]
fn later_writes_do_not_reach_linked_sources() -> Result<()> {
    let mut target = value(json!({}));
    let first = value(json!({"b": {"x": 1}}));
    merge_into(&mut target, std::slice::from_ref(&first));
    merge_into(&mut target, &[value(json!({"b": {"y": 2}}))]);

    ensure!(target == value(json!({"b": {"x": 1, "y": 2}})), "got {target:?}");
    ensure!(first == value(json!({"b": {"x": 1}})), "source changed to {first:?}");
    Ok(())
}

#[rstest]
#[case(layers([json!({"k": 1}), json!({"k": 2}), json!({"k": 3})]))]
#[case(layers([json!([1, 2]), json!([3]), json!([4])]))]
#[case(layers([
    json!({"a": {"b": [1]}}),
    json!({"a": {"b": [2], "c": null}}),
    json!({"a": "leaf"}),
]))]
#[case(vec![int_set(&[1, 2]), int_set(&[2, 3])])]
#[case(vec![str_int_map(&[("a", 1)]), str_int_map(&[("a", 2), ("b", 3)])])]
fn in_place_agrees_with_pure(#[case] values: Vec<Value>) -> Result<()> {
    let expected = merge(&values);
    let (first, sources) = values
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("case needs at least one value"))?;
    let before = first.to_json()?;
    let mut target = first.clone();
    merge_into(&mut target, sources);
    ensure!(target == expected, "in place {target:?} != pure {expected:?}");
    ensure!(first.to_json()? == before, "the value the target was cloned from changed");
    Ok(())
}

#[rstest]
fn shape_mismatch_resets_the_target() {
    let mut target = value(json!({"k": {"x": 1}}));
    merge_into(&mut target, &[value(json!({"k": [1]}))]);
    assert_eq!(target, value(json!({"k": [1]})));
}

#[rstest]
fn custom_strategies_receive_the_target_slot() -> Result<()> {
    let calls: Recorder<String> = Recorder::new();
    let merger = {
        let calls = calls.clone();
        MergeIntoOptions::<KeyContext>::new()
            .merge_others(move |target, sources, _utils, meta| {
                let key = meta.map(|context| context.key.to_string()).unwrap_or_default();
                calls.record(key);
                let total = target.as_i64().unwrap_or_default()
                    + sources.iter().filter_map(Value::as_i64).sum::<i64>();
                *target = Value::from(total);
                Ok(IntoOutcome::Done)
            })
            .build()?
    };
    let mut target = value(json!({"hits": 1, "nested": {"hits": 10}}));
    merger.merge_into(
        &mut target,
        &layers([json!({"hits": 2, "nested": {"hits": 20}}), json!({"hits": 3})]),
    )?;

    ensure!(target == value(json!({"hits": 6, "nested": {"hits": 30}})), "got {target:?}");
    ensure!(calls.snapshot() == ["hits", "hits"], "calls {:?}", calls.snapshot());
    Ok(())
}

#[rstest]
fn default_merge_action_falls_back_in_place() -> Result<()> {
    let merger = MergeIntoOptions::<KeyContext>::new()
        .merge_lists(|target, sources, _utils, _meta| {
            if sources.iter().all(|source| source.as_list().is_some_and(<[Value]>::is_empty)) {
                *target = Value::from(Vec::new());
                return Ok(IntoOutcome::Done);
            }
            Ok(IntoOutcome::DefaultMerge)
        })
        .build()?;

    let mut cleared = value(json!([1, 2]));
    merger.merge_into(&mut cleared, &[value(json!([]))])?;
    ensure!(cleared == value(json!([])));

    let mut appended = value(json!([1]));
    merger.merge_into(&mut appended, &[value(json!([2]))])?;
    ensure!(appended == value(json!([1, 2])));
    Ok(())
}

#[rstest]
fn replaced_records_take_the_last_source() -> Result<()> {
    let merger = MergeIntoOptions::<KeyContext>::new().replace_records().build()?;
    let mut target = value(json!({"a": 1}));
    let last = value(json!({"b": 2}));
    merger.merge_into(&mut target, &[value(json!({"c": 3})), last.clone()])?;
    ensure!(target.ptr_eq(&last));
    Ok(())
}

#[rstest]
fn proto_key_stays_an_own_key_in_place() -> Result<()> {
    let hostile = value(serde_json::from_str(r#"{"__proto__": {"a0": true}}"#)?);
    let mut target = value(json!({}));
    merge_into(&mut target, std::slice::from_ref(&hostile));

    let polluted = target
        .field("__proto__")
        .and_then(|inner| inner.field("a0"))
        .and_then(Value::as_bool);
    ensure!(polluted == Some(true), "__proto__ must be kept as an own key");
    ensure!(target.field("a0").is_none(), "a0 leaked onto the target");
    ensure!(
        target.as_record().map(deepmerge::Record::len) == Some(1),
        "target gained unexpected keys: {target:?}"
    );

    let mut unrelated = value(json!({"x": 1}));
    merge_into(&mut unrelated, &[value(json!({"y": 2}))]);
    ensure!(unrelated.field("a0").is_none(), "a0 leaked onto an unrelated record");
    ensure!(unrelated == value(json!({"x": 1, "y": 2})));
    Ok(())
}

#[rstest]
fn parents_list_only_the_sources_in_place() -> Result<()> {
    let frames: Recorder<(String, Vec<Value>)> = Recorder::new();
    let merger = {
        let frames = frames.clone();
        MergeIntoOptions::<KeyContext>::new()
            .merge_others(move |_target, _sources, _utils, meta| {
                if let Some(context) = meta {
                    frames.record((context.key.to_string(), context.parents.to_vec()));
                }
                Ok(IntoOutcome::DefaultMerge)
            })
            .build()?
    };
    let mut target = value(json!({"outer": {"inner": 1, "mine": true}}));
    let first = value(json!({"outer": {"inner": 2}}));
    let second = value(json!({"outer": {"inner": 3}}));
    merger.merge_into(&mut target, &[first.clone(), second.clone()])?;

    let target_outer = value(json!({"inner": 1, "mine": true}));
    let source_outers: Vec<Value> = [&first, &second]
        .into_iter()
        .filter_map(|source| source.field("outer").cloned())
        .collect();
    let recorded = frames.snapshot();
    let inner = recorded
        .iter()
        .find(|(key, _)| key == "inner")
        .ok_or_else(|| anyhow::anyhow!("no frame for inner in {recorded:?}"))?;
    ensure!(inner.1.len() == 2, "expected two parents, got {:?}", inner.1);
    ensure!(inner.1 == source_outers, "parents {:?} != sources {source_outers:?}", inner.1);
    ensure!(
        !inner.1.contains(&target_outer),
        "the target must not be listed among the parents"
    );
    ensure!(target == value(json!({"outer": {"inner": 3, "mine": true}})), "got {target:?}");
    Ok(())
}
