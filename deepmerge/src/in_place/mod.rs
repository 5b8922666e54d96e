//! In place merging: fold sources into a caller-owned target.
//!
//! The target slot is a plain `&mut Value`. Sources are only read. A
//! composite contributed by a single source is linked into the target by
//! sharing its [`std::sync::Arc`] rather than copied; later writes through
//! the target copy the shared payload first, so sources never change.

pub mod defaults;
mod dispatch;

use std::fmt;
use std::sync::Arc;

use crate::meta::{KeyContext, MetaUpdater};
use crate::options::{MergeIntoOptions, StrategyTable};
use crate::{IntoOutcome, MergeResult, Value};

/// Signature of an in place merge function.
///
/// The sources never include the target itself.
pub type MergeIntoFn<M> = Arc<
    dyn Fn(&mut Value, &[Value], &MergeIntoUtils<'_, M>, Option<&M>) -> MergeResult<IntoOutcome>
        + Send
        + Sync,
>;

/// A reusable, customised in place merge function.
pub struct DeepMergeInto<M = KeyContext> {
    pub(crate) table: StrategyTable<MergeIntoFn<M>>,
    pub(crate) meta_updater: MetaUpdater<M>,
    pub(crate) root_meta: Option<M>,
}

impl<M: From<KeyContext> + 'static> Default for DeepMergeInto<M> {
    fn default() -> Self {
        MergeIntoOptions::new().into_merger()
    }
}

impl<M> DeepMergeInto<M> {
    /// Merge `sources` into `target`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by a custom strategy. The target may
    /// be partially merged when that happens.
    #[tracing::instrument(
        level = "trace",
        name = "deep_merge_into",
        skip_all,
        fields(len = sources.len())
    )]
    pub fn merge_into(&self, target: &mut Value, sources: &[Value]) -> MergeResult<()> {
        self.merge_unknowns_into(target, sources, self.root_meta.as_ref())
    }

    pub(crate) const fn utils(&self) -> MergeIntoUtils<'_, M> {
        MergeIntoUtils { merger: self }
    }
}

impl<M: fmt::Debug> fmt::Debug for DeepMergeInto<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepMergeInto")
            .field("table", &self.table)
            .field("root_meta", &self.root_meta)
            .finish_non_exhaustive()
    }
}

/// Helpers handed to every in place strategy.
pub struct MergeIntoUtils<'a, M> {
    merger: &'a DeepMergeInto<M>,
}

impl<'a, M> MergeIntoUtils<'a, M> {
    /// Recursively merge `sources` into `target` with the full strategy
    /// table.
    ///
    /// # Errors
    ///
    /// Propagates errors from custom strategies reached by the recursion.
    pub fn merge_into(
        &self,
        target: &mut Value,
        sources: &[Value],
        meta: Option<&M>,
    ) -> MergeResult<()> {
        self.merger.merge_unknowns_into(target, sources, meta)
    }

    /// Derive child metadata for `context` from `previous`.
    pub fn update_meta(&self, previous: Option<&M>, context: KeyContext) -> M {
        (self.merger.meta_updater)(previous, context)
    }

    /// The merger these utilities belong to.
    #[must_use]
    pub const fn merger(&self) -> &'a DeepMergeInto<M> {
        self.merger
    }
}
