//! Builder for pure-mode mergers.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::{Strategy, StrategyTable};
use crate::meta::{KeyContext, MetaUpdater, replace_meta};
use crate::pure::{DeepMerge, FilterFn, MergeFn, MergeUtils};
use crate::{Kind, MergeResult, MergeSettings, Outcome, Value};

/// Pre-classification filter applied to every list of values in a pure merge.
pub enum ValueFilter<M> {
    /// Remove [`Value::Undefined`] entries. The default.
    DropUndefined,
    /// Use a caller-supplied filter.
    Custom(FilterFn<M>),
    /// Keep every value, so undefined entries take part in classification
    /// and can force a leaf merge.
    Disabled,
}

impl<M> ValueFilter<M> {
    pub(crate) fn apply<'a>(&self, values: &'a [Value], meta: Option<&M>) -> Cow<'a, [Value]> {
        match self {
            Self::DropUndefined if values.iter().any(Value::is_undefined) => Cow::Owned(
                values
                    .iter()
                    .filter(|value| !value.is_undefined())
                    .cloned()
                    .collect(),
            ),
            Self::DropUndefined | Self::Disabled => Cow::Borrowed(values),
            Self::Custom(filter) => Cow::Owned(filter(values, meta)),
        }
    }
}

impl<M> fmt::Debug for ValueFilter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropUndefined => f.write_str("DropUndefined"),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Options for building a [`DeepMerge`].
///
/// Every kind starts with its built-in strategy. Supplying a function
/// overrides it; the `replace_*` methods opt a kind out of recursion so its
/// values merge like leaves.
///
/// # Examples
///
/// ```
/// use deepmerge::{KeyContext, MergeOptions, Outcome, Value};
/// use serde_json::json;
///
/// let merger = MergeOptions::<KeyContext>::new()
///     .replace_lists()
///     .merge_others(|values, _utils, _meta| {
///         let total: i64 = values.iter().filter_map(Value::as_i64).sum();
///         Ok(Outcome::Merged(Value::from(total)))
///     })
///     .build()?;
///
/// let merged = merger.merge(&[
///     Value::from(json!({"hits": 2, "tags": ["a"]})),
///     Value::from(json!({"hits": 3, "tags": ["b"]})),
/// ])?;
/// assert_eq!(merged, Value::from(json!({"hits": 5, "tags": ["b"]})));
/// # Ok::<_, deepmerge::MergeError>(())
/// ```
pub struct MergeOptions<M = KeyContext> {
    table: StrategyTable<MergeFn<M>>,
    meta_updater: MetaUpdater<M>,
    filter: ValueFilter<M>,
    implicit_default_merging: bool,
    root_meta: Option<M>,
}

impl<M: From<KeyContext> + 'static> MergeOptions<M> {
    /// Options using every built-in strategy and the replacing metadata
    /// updater.
    #[must_use]
    pub fn new() -> Self {
        Self::with_meta_updater(replace_meta::<M>)
    }

    /// Options seeded from declarative `settings`.
    #[must_use]
    pub fn from_settings(settings: &MergeSettings) -> Self {
        let mut options = Self::new().implicit_default_merging(settings.implicit_default_merging);
        options.table = StrategyTable::from_settings(settings);
        if !settings.filter_undefined {
            options.filter = ValueFilter::Disabled;
        }
        options
    }
}

impl<M: From<KeyContext> + 'static> Default for MergeOptions<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: 'static> MergeOptions<M> {
    /// Options for metadata types that are not built from a [`KeyContext`].
    #[must_use]
    pub fn with_meta_updater<U>(updater: U) -> Self
    where
        U: Fn(Option<&M>, KeyContext) -> M + Send + Sync + 'static,
    {
        Self {
            table: StrategyTable::default(),
            meta_updater: Arc::new(updater),
            filter: ValueFilter::DropUndefined,
            implicit_default_merging: false,
            root_meta: None,
        }
    }

    /// Set the strategy for `kind` directly. [`Kind::None`] addresses the
    /// others slot.
    #[must_use]
    pub fn strategy(mut self, kind: Kind, strategy: Strategy<MergeFn<M>>) -> Self {
        self.table.set(kind, strategy);
        self
    }

    /// Merge records with `merge`.
    #[must_use]
    pub fn merge_records<F>(self, merge: F) -> Self
    where
        F: Fn(&[Value], &MergeUtils<'_, M>, Option<&M>) -> MergeResult<Outcome> + Send + Sync + 'static,
    {
        self.strategy(Kind::Record, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge lists with `merge`.
    #[must_use]
    pub fn merge_lists<F>(self, merge: F) -> Self
    where
        F: Fn(&[Value], &MergeUtils<'_, M>, Option<&M>) -> MergeResult<Outcome> + Send + Sync + 'static,
    {
        self.strategy(Kind::List, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge sets with `merge`.
    #[must_use]
    pub fn merge_sets<F>(self, merge: F) -> Self
    where
        F: Fn(&[Value], &MergeUtils<'_, M>, Option<&M>) -> MergeResult<Outcome> + Send + Sync + 'static,
    {
        self.strategy(Kind::Set, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge maps with `merge`.
    #[must_use]
    pub fn merge_maps<F>(self, merge: F) -> Self
    where
        F: Fn(&[Value], &MergeUtils<'_, M>, Option<&M>) -> MergeResult<Outcome> + Send + Sync + 'static,
    {
        self.strategy(Kind::Map, Strategy::Custom(Arc::new(merge)))
    }

    /// Merge leaves, single values and mismatched kinds with `merge`.
    #[must_use]
    pub fn merge_others<F>(self, merge: F) -> Self
    where
        F: Fn(&[Value], &MergeUtils<'_, M>, Option<&M>) -> MergeResult<Outcome> + Send + Sync + 'static,
    {
        self.strategy(Kind::Other, Strategy::Custom(Arc::new(merge)))
    }

    /// Treat records as leaves: the last record wins.
    #[must_use]
    pub fn replace_records(self) -> Self {
        self.strategy(Kind::Record, Strategy::Replace)
    }

    /// Treat lists as leaves: the last list wins.
    #[must_use]
    pub fn replace_lists(self) -> Self {
        self.strategy(Kind::List, Strategy::Replace)
    }

    /// Treat sets as leaves: the last set wins.
    #[must_use]
    pub fn replace_sets(self) -> Self {
        self.strategy(Kind::Set, Strategy::Replace)
    }

    /// Treat maps as leaves: the last map wins.
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

    /// Filter every value list with `filter` before classification.
    #[must_use]
    pub fn filter_values<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[Value], Option<&M>) -> Vec<Value> + Send + Sync + 'static,
    {
        self.filter = ValueFilter::Custom(Arc::new(filter));
        self
    }

    /// Keep undefined values in the lists handed to strategies.
    #[must_use]
    pub fn disable_filtering(mut self) -> Self {
        self.filter = ValueFilter::Disabled;
        self
    }

    /// When enabled, a custom strategy returning [`Value::Undefined`] is
    /// treated as a request for the built-in strategy of the same kind.
    #[must_use]
    pub const fn implicit_default_merging(mut self, enabled: bool) -> Self {
        self.implicit_default_merging = enabled;
        self
    }

    /// Metadata handed to strategies at the root of every merge.
    #[must_use]
    pub fn root_meta(mut self, meta: M) -> Self {
        self.root_meta = Some(meta);
        self
    }

    /// Resolve the options into a reusable merger.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MergeError::Configuration`] when the others slot was
    /// set to [`Strategy::Replace`].
    pub fn build(self) -> MergeResult<DeepMerge<M>> {
        self.table.validate()?;
        Ok(self.into_merger())
    }

    pub(crate) fn into_merger(self) -> DeepMerge<M> {
        DeepMerge {
            table: self.table,
            meta_updater: self.meta_updater,
            filter: self.filter,
            implicit_default_merging: self.implicit_default_merging,
            root_meta: self.root_meta,
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for MergeOptions<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeOptions")
            .field("table", &self.table)
            .field("filter", &self.filter)
            .field("implicit_default_merging", &self.implicit_default_merging)
            .field("root_meta", &self.root_meta)
            .finish_non_exhaustive()
    }
}
