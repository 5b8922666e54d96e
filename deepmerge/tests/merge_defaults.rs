//! Behaviour of the zero-configuration pure merge.

use anyhow::{Result, ensure};
use deepmerge::{Key, Kind, Record, Symbol, Value, classify, merge};
use rstest::rstest;
use serde_json::json;
use test_helpers::values::{int_set, json as value, layers, str_int_map};

#[rstest]
#[case(Value::from(json!({"a": {"b": 1}})))]
#[case(Value::from(json!([1, 2])))]
#[case(int_set(&[1, 2]))]
#[case(str_int_map(&[("a", 1)]))]
#[case(Value::opaque(42_u8))]
fn a_single_value_is_returned_as_is(#[case] input: Value) -> Result<()> {
    let merged = merge(std::slice::from_ref(&input));
    ensure!(merged.ptr_eq(&input), "expected the input itself, got {merged:?}");
    Ok(())
}

#[rstest]
#[case(Value::from(7))]
#[case(Value::from("text"))]
#[case(Value::Null)]
fn a_single_leaf_is_returned_unchanged(#[case] input: Value) {
    assert_eq!(merge(std::slice::from_ref(&input)), input);
}

#[rstest]
fn no_values_merge_to_undefined() {
    assert!(merge(&[]).is_undefined());
}

#[rstest]
fn disjoint_records_union_without_mutating_inputs() -> Result<()> {
    let left = value(json!({"a": {"x": 1}}));
    let right = value(json!({"b": [2]}));
    let left_before = left.to_json()?;
    let right_before = right.to_json()?;

    let merged = merge(&[left.clone(), right.clone()]);

    ensure!(merged == value(json!({"a": {"x": 1}, "b": [2]})));
    ensure!(left.to_json()? == left_before, "left input was mutated");
    ensure!(right.to_json()? == right_before, "right input was mutated");
    let linked = merged
        .field("a")
        .zip(left.field("a"))
        .is_some_and(|(merged, original)| merged.ptr_eq(original));
    ensure!(linked, "sole contributor should be linked, not copied");
    Ok(())
}

#[rstest]
fn last_leaf_wins() {
    let merged = merge(&layers([json!({"k": 1}), json!({"k": 2}), json!({"k": 3})]));
    assert_eq!(merged, value(json!({"k": 3})));
}

#[rstest]
fn lists_concatenate_in_order() {
    let merged = merge(&layers([json!([1, 2]), json!([3, 4]), json!([2])]));
    assert_eq!(merged, value(json!([1, 2, 3, 4, 2])));
}

#[rstest]
fn sets_union_and_deduplicate() {
    let merged = merge(&[int_set(&[1, 2]), int_set(&[2, 3])]);
    assert_eq!(merged, int_set(&[1, 2, 3]));
    let order: Vec<_> = merged
        .as_set()
        .map(|set| set.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    assert_eq!(order, [1, 2, 3]);
}

#[rstest]
fn maps_overwrite_by_key() {
    let merged = merge(&[str_int_map(&[("a", 1)]), str_int_map(&[("a", 2), ("b", 3)])]);
    assert_eq!(merged, str_int_map(&[("a", 2), ("b", 3)]));
}

#[rstest]
#[case(json!({"k": {"x": 1}}), json!({"k": [1]}), json!({"k": [1]}))]
#[case(json!({"k": [1]}), json!({"k": {"x": 1}}), json!({"k": {"x": 1}}))]
#[case(json!({"k": [1]}), json!({"k": null}), json!({"k": null}))]
#[case(json!({"k": "text"}), json!({"k": [1]}), json!({"k": [1]}))]
fn kind_mismatch_takes_the_last_value(
    #[case] first: serde_json::Value,
    #[case] second: serde_json::Value,
    #[case] expected: serde_json::Value,
) {
    assert_eq!(merge(&layers([first, second])), value(expected));
}

#[rstest]
fn nested_records_merge_recursively() {
    let merged = merge(&layers([
        json!({"server": {"host": "a", "ports": [80]}}),
        json!({"server": {"ports": [443], "tls": true}}),
    ]));
    assert_eq!(
        merged,
        value(json!({"server": {"host": "a", "ports": [80, 443], "tls": true}}))
    );
}

#[rstest]
fn undefined_entries_do_not_override() {
    let mut sparse = Record::new();
    sparse.insert("k", Value::Undefined);
    let merged = merge(&[value(json!({"k": 1})), Value::record(sparse)]);
    assert_eq!(merged.field("k").and_then(Value::as_i64), Some(1));
}

#[rstest]
fn proto_key_is_an_ordinary_own_key() -> Result<()> {
    let hostile = value(serde_json::from_str(r#"{"__proto__": {"a0": true}}"#)?);
    let merged = merge(&[hostile, value(json!({}))]);

    ensure!(classify(&merged) == Kind::Record);
    let proto = merged
        .field("__proto__")
        .and_then(|inner| inner.field("a0"))
        .and_then(Value::as_bool);
    ensure!(proto == Some(true), "__proto__ must survive as an own key");
    ensure!(merged.field("a0").is_none(), "a0 leaked onto the merged record");

    let unrelated = merge(&layers([json!({"x": 1}), json!({"y": 2})]));
    ensure!(unrelated.field("a0").is_none(), "a0 leaked onto an unrelated record");
    Ok(())
}

#[rstest]
fn records_disguised_as_opaque_are_not_merged() {
    let mut inner = Record::new();
    inner.insert("a", 1);
    let disguised = Value::opaque(inner);
    let merged = merge(&[value(json!({"a": 0, "b": 2})), disguised.clone()]);
    assert_eq!(classify(&disguised), Kind::Other);
    assert!(merged.ptr_eq(&disguised));
}

#[rstest]
fn symbol_keys_follow_string_keys() {
    let token = Symbol::new("token");
    let mut first = Record::new();
    first.insert(token.clone(), 1);
    first.insert("a", 1);
    let mut second = Record::new();
    second.insert("b", 2);
    second.insert(token.clone(), 2);

    let merged = merge(&[Value::record(first), Value::record(second)]);
    let keys: Vec<Key> = merged
        .as_record()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(keys, [Key::from("a"), Key::from("b"), Key::from(token.clone())]);
    assert_eq!(
        merged
            .as_record()
            .and_then(|record| record.get(&Key::from(token)))
            .and_then(Value::as_i64),
        Some(2)
    );
}
