//! Shared scenario state for the merge behaviour suite.

use deepmerge::Value;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value as Json;

/// Layers collected by `Given` steps and the value produced by `When` steps.
#[derive(Debug, Default, ScenarioState)]
pub struct MergeState {
    /// Layers in the order the steps supplied them.
    pub layers: Slot<Vec<Value>>,
    /// Result of the last merge.
    pub merged: Slot<Value>,
    /// JSON snapshots of the source layers taken before an in place merge.
    pub sources_before: Slot<Vec<Json>>,
}

impl MergeState {
    /// Appends a layer, creating the list on first use.
    pub fn push_layer(&self, layer: Value) {
        let mut layers = self.layers.take().unwrap_or_default();
        layers.push(layer);
        self.layers.set(layers);
    }
}

/// Creates an empty merge state for each scenario.
#[fixture]
pub fn merge_state() -> MergeState {
    MergeState::default()
}
