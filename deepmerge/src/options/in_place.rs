//! Builder for in place mergers.

use std::fmt;
use std::sync::Arc;

use super::{Strategy, StrategyTable};
use crate::in_place::{DeepMergeInto, MergeIntoFn, MergeIntoUtils};
use crate::meta::{KeyContext, MetaUpdater, replace_meta};
use crate::{IntoOutcome, Kind, MergeResult, MergeSettings, Value};

/// Options for building a [`DeepMergeInto`].
///
/// In place strategies receive the target slot as `&mut Value` plus the
/// sources being merged into it. There is no value filter and no implicit
/// default merging in this mode: strategies always decide explicitly.
///
/// # Examples
///
/// ```
/// use deepmerge::{IntoOutcome, KeyContext, MergeIntoOptions, Value};
/// use serde_json::json;
///
/// let merger = MergeIntoOptions::<KeyContext>::new()
///     .merge_lists(|target, sources, _utils, _meta| {
///         // Keep the target's list only when no source brings one.
///         if let Some(last) = sources.last() {
///             *target = last.clone();
///         }
///         Ok(IntoOutcome::Done)
///     })
///     .build()?;
///
/// let mut target = Value::from(json!({"tags": ["a"], "port": 1}));
/// merger.merge_into(&mut target, &[Value::from(json!({"tags": ["b"]}))])?;
/// assert_eq!(target, Value::from(json!({"tags": ["b"], "port": 1})));
/// # Ok::<_, deepmerge::MergeError>(())
/// ```
pub struct MergeIntoOptions<M = KeyContext> {
    table: StrategyTable<MergeIntoFn<M>>,
    meta_updater: MetaUpdater<M>,
    root_meta: Option<M>,
}

impl<M: From<KeyContext> + 'static> MergeIntoOptions<M> {
    /// Options using every built-in strategy and the replacing metadata
    /// updater.
    #[must_use]
    pub fn new() -> Self {
        Self::with_meta_updater(replace_meta::<M>)
    }

    /// Options seeded from declarative `settings`.
    ///
    /// Value filtering and implicit default merging only exist for pure
    /// merges; non-default values for them are reported and ignored.
    #[must_use]
    pub fn from_settings(settings: &MergeSettings) -> Self {
        if !settings.filter_undefined || settings.implicit_default_merging {
            tracing::warn!(
                filter_undefined = settings.filter_undefined,
                implicit_default_merging = settings.implicit_default_merging,
                "pure-only merge settings ignored for in place merging"
            );
        }
        let mut options = Self::new();
        options.table = StrategyTable::from_settings(settings);
        options
    }
}

impl<M: From<KeyContext> + 'static> Default for MergeIntoOptions<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: 'static> MergeIntoOptions<M> {
    /// Options for metadata types that are not built from a [`KeyContext`].
    #[must_use]
    pub fn with_meta_updater<U>(updater: U) -> Self
    where
        U: Fn(Option<&M>, KeyContext) -> M + Send + Sync + 'static,
    {
        Self {
            table: StrategyTable::default(),
            meta_updater: Arc::new(updater),
            root_meta: None,
        }
    }

    /// Set the strategy for `kind` directly. [`Kind::None`] addresses the
    /// others slot.
    #[must_use]
    pub fn strategy(mut self, kind: Kind, strategy: Strategy<MergeIntoFn<M>>) -> Self {
        self.table.set(kind, strategy);
        self
    }

    /// Merge records into the target with `merge`.
    #[must_use]
    pub fn merge_records<F>(self, merge: F) -> Self
    where
        F: Fn(&mut Value, &[Value], &MergeIntoUtils<'_, M>, Option<&M>) -> MergeResult<IntoOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.strategy(Kind::Record, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge lists into the target with `merge`.
    #[must_use]
    pub fn merge_lists<F>(self, merge: F) -> Self
    where
        F: Fn(&mut Value, &[Value], &MergeIntoUtils<'_, M>, Option<&M>) -> MergeResult<IntoOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.strategy(Kind::List, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge sets into the target with `merge`.
    #[must_use]
    pub fn merge_sets<F>(self, merge: F) -> Self
    where
        F: Fn(&mut Value, &[Value], &MergeIntoUtils<'_, M>, Option<&M>) -> MergeResult<IntoOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.strategy(Kind::Set, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge maps into the target with `merge`.
    #[must_use]
    pub fn merge_maps<F>(self, merge: F) -> Self
    where
        F: Fn(&mut Value, &[Value], &MergeIntoUtils<'_, M>, Option<&M>) -> MergeResult<IntoOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.strategy(Kind::Map, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge leaves, lone targets and mismatched kinds with `merge`.
    #[must_use]
    pub fn merge_others<F>(self, merge: F) -> Self
    where
        F: Fn(&mut Value, &[Value], &MergeIntoUtils<'_, M>, Option<&M>) -> MergeResult<IntoOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.strategy(Kind::Other, Strategy::Custom(Arc::new(merge)))
    }

    /// Treat records as leaves: the last source record replaces the target.
    #[must_use]
    pub fn replace_records(self) -> Self {
        self.strategy(Kind::Record, Strategy::Replace)
    }

    /// Treat lists as leaves: the last source list replaces the target.
    #[must_use]
    pub fn replace_lists(self) -> Self {
        self.strategy(Kind::List, Strategy::Replace)
    }

    /// Treat sets as leaves: the last source set replaces the target.
    #[must_use]
    pub fn replace_sets(self) -> Self {
        self.strategy(Kind::Set, Strategy::Replace)
    }

    /// Treat maps as leaves: the last source map replaces the target.
    #[must_use]
    pub fn replace_maps(self) -> Self {
        self.strategy(Kind::Map, Strategy::Replace)
    }

    /// Derive child metadata with `updater`.
    #[must_use]
    pub fn meta_updater<U>(mut self, updater: U) -> Self
    where
        U: Fn(Option<&M>, KeyContext) -> M + Send + Sync + 'static,
    {
        self.meta_updater = Arc::new(updater);
        self
    }

    /// Metadata handed to strategies at the root of every merge.
    #[must_use]
    pub fn root_meta(mut self, meta: M) -> Self {
        self.root_meta = Some(meta);
        self
    }

    /// Resolve the options into a reusable in place merger.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MergeError::Configuration`] when the others slot was
    /// set to [`Strategy::Replace`].
    pub fn build(self) -> MergeResult<DeepMergeInto<M>> {
        self.table.validate()?;
        Ok(self.into_merger())
    }

    pub(crate) fn into_merger(self) -> DeepMergeInto<M> {
        DeepMergeInto {
            table: self.table,
            meta_updater: self.meta_updater,
            root_meta: self.root_meta,
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for MergeIntoOptions<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeIntoOptions")
            .field("table", &self.table)
            .field("root_meta", &self.root_meta)
            .finish_non_exhaustive()
    }
}
