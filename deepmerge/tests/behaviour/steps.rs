//! Step definitions for the merge behaviour suite.

use anyhow::{Context, Result, anyhow, ensure};
use deepmerge::{MergeOptions, Value};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;
use test_helpers::text::{parse_list, unquote};

use crate::fixtures::MergeState;

#[given("a layer setting port to {port:u16}")]
fn layer_with_port(merge_state: &MergeState, port: u16) {
    merge_state.push_layer(Value::from(json!({ "port": port })));
}

#[given("a layer setting host to {host}")]
fn layer_with_host(merge_state: &MergeState, host: String) {
    merge_state.push_layer(Value::from(json!({ "host": unquote(&host) })));
}

#[given("a layer adding the tags {tags}")]
fn layer_with_tags(merge_state: &MergeState, tags: String) {
    merge_state.push_layer(Value::from(json!({ "tags": parse_list(&tags) })));
}

#[given("a layer setting tags to the text {text}")]
fn layer_with_tag_text(merge_state: &MergeState, text: String) {
    merge_state.push_layer(Value::from(json!({ "tags": unquote(&text) })));
}

fn layers(merge_state: &MergeState) -> Result<Vec<Value>> {
    merge_state
        .layers
        .take()
        .ok_or_else(|| anyhow!("no layers were given"))
}

#[when("the layers are merged")]
fn merge_layers(merge_state: &MergeState) -> Result<()> {
    let layers = layers(merge_state)?;
    merge_state.merged.set(deepmerge::merge(&layers));
    Ok(())
}

#[when("the layers are merged with lists replaced")]
fn merge_layers_replacing_lists(merge_state: &MergeState) -> Result<()> {
    let layers = layers(merge_state)?;
    let merger = MergeOptions::<deepmerge::KeyContext>::new()
        .replace_lists()
        .build()?;
    merge_state.merged.set(merger.merge(&layers)?);
    Ok(())
}

#[when("the layers are merged into the first")]
fn merge_into_first(merge_state: &MergeState) -> Result<()> {
    let layers = layers(merge_state)?;
    let (first, sources) = layers
        .split_first()
        .ok_or_else(|| anyhow!("at least one layer is required"))?;
    let snapshots = sources
        .iter()
        .map(Value::to_json)
        .collect::<Result<Vec<_>, _>>()?;
    let mut target = first.clone();
    deepmerge::merge_into(&mut target, sources);
    merge_state.merged.set(target);
    merge_state.sources_before.set(snapshots);
    merge_state.layers.set(layers);
    Ok(())
}

fn merged_field<T>(
    merge_state: &MergeState,
    name: &str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Result<T> {
    merge_state
        .merged
        .with_ref(|merged| merged.field(name).and_then(read))
        .context("no merged value was produced")?
        .ok_or_else(|| anyhow!("merged value has no usable `{name}` field"))
}

#[then("the merged port is {port:u16}")]
fn assert_port(merge_state: &MergeState, port: u16) -> Result<()> {
    let actual = merged_field(merge_state, "port", Value::as_i64)?;
    ensure!(actual == i64::from(port), "expected port {port}, found {actual}");
    Ok(())
}

#[then("the merged host is {host}")]
fn assert_host(merge_state: &MergeState, host: String) -> Result<()> {
    let actual = merged_field(merge_state, "host", |value| value.as_str().map(str::to_owned))?;
    ensure!(actual == unquote(&host), "expected host {host}, found {actual}");
    Ok(())
}

#[then("the merged tags are {tags}")]
fn assert_tags(merge_state: &MergeState, tags: String) -> Result<()> {
    let actual = merged_field(merge_state, "tags", |value| {
        value.as_list().map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
    })?;
    let expected = parse_list(&tags);
    ensure!(actual == expected, "expected tags {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the merged tags field is the text {text}")]
fn assert_tag_text(merge_state: &MergeState, text: String) -> Result<()> {
    let actual = merged_field(merge_state, "tags", |value| value.as_str().map(str::to_owned))?;
    ensure!(actual == unquote(&text), "expected text {text}, found {actual}");
    Ok(())
}

#[then("the source layers are unchanged")]
fn assert_sources_unchanged(merge_state: &MergeState) -> Result<()> {
    let before = merge_state
        .sources_before
        .take()
        .context("no source snapshot was taken")?;
    let layers = merge_state.layers.take().context("layers were not kept")?;
    let after = layers
        .iter()
        .skip(1)
        .map(Value::to_json)
        .collect::<Result<Vec<_>, _>>()?;
    ensure!(before == after, "sources changed: {before:?} -> {after:?}");
    Ok(())
}
