//! Pure merging: build a new value, leave every input untouched.

pub mod defaults;
mod dispatch;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::meta::{KeyContext, MetaUpdater};
use crate::options::{MergeOptions, StrategyTable, ValueFilter};
use crate::{MergeResult, Outcome, Resolved, Value};

/// Signature of a pure-mode merge function.
pub type MergeFn<M> =
    Arc<dyn Fn(&[Value], &MergeUtils<'_, M>, Option<&M>) -> MergeResult<Outcome> + Send + Sync>;

/// Signature of a custom value filter.
pub type FilterFn<M> = Arc<dyn Fn(&[Value], Option<&M>) -> Vec<Value> + Send + Sync>;

/// A reusable, customised pure merge function.
///
/// Build one with [`MergeOptions`]; the resolved strategy table is shared by
/// every call, and calls may nest (a custom strategy can merge through the
/// same merger).
pub struct DeepMerge<M = KeyContext> {
    pub(crate) table: StrategyTable<MergeFn<M>>,
    pub(crate) meta_updater: MetaUpdater<M>,
    pub(crate) filter: ValueFilter<M>,
    pub(crate) implicit_default_merging: bool,
    pub(crate) root_meta: Option<M>,
}

impl<M: From<KeyContext> + 'static> Default for DeepMerge<M> {
    fn default() -> Self {
        MergeOptions::new().into_merger()
    }
}

impl<M> DeepMerge<M> {
    /// Merge `values` into a new value.
    ///
    /// No values yields [`Value::Undefined`]; a single value comes back as is.
    /// A skip requested at the root also yields [`Value::Undefined`].
    ///
    /// # Errors
    ///
    /// Propagates any error returned by a custom strategy or filter.
    #[tracing::instrument(
        level = "trace",
        name = "deep_merge",
        skip_all,
        fields(len = values.len())
    )]
    pub fn merge(&self, values: &[Value]) -> MergeResult<Value> {
        let resolved = self.merge_unknowns(values, self.root_meta.as_ref())?;
        if matches!(resolved, Resolved::Skip) {
            tracing::trace!("skip requested at the root; yielding undefined");
        }
        Ok(resolved.into_value())
    }

    pub(crate) const fn utils(&self) -> MergeUtils<'_, M> {
        MergeUtils { merger: self }
    }
}

impl<M: fmt::Debug> fmt::Debug for DeepMerge<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepMerge")
            .field("table", &self.table)
            .field("filter", &self.filter)
            .field("implicit_default_merging", &self.implicit_default_merging)
            .field("root_meta", &self.root_meta)
            .finish_non_exhaustive()
    }
}

/// Helpers handed to every pure-mode strategy.
pub struct MergeUtils<'a, M> {
    merger: &'a DeepMerge<M>,
}

impl<'a, M> MergeUtils<'a, M> {
    /// Recursively merge `values` with the full strategy table, exactly as
    /// the record strategy does for each key.
    ///
    /// # Errors
    ///
    /// Propagates errors from custom strategies reached by the recursion.
    pub fn merge_values(&self, values: &[Value], meta: Option<&M>) -> MergeResult<Resolved> {
        self.merger.merge_unknowns(values, meta)
    }

    /// Derive child metadata for `context` from `previous`.
    pub fn update_meta(&self, previous: Option<&M>, context: KeyContext) -> M {
        (self.merger.meta_updater)(previous, context)
    }

    /// Apply the configured value filter.
    pub fn filter_values<'v>(&self, values: &'v [Value], meta: Option<&M>) -> Cow<'v, [Value]> {
        self.merger.filter.apply(values, meta)
    }

    /// Whether implicit default merging is enabled.
    #[must_use]
    pub const fn implicit_default_merging(&self) -> bool {
        self.merger.implicit_default_merging
    }

    /// The merger these utilities belong to.
    #[must_use]
    pub const fn merger(&self) -> &'a DeepMerge<M> {
        self.merger
    }
}
