//! Customisation resolver: per-kind strategy tables and their builders.
//!
//! Each pipeline resolves its options into an immutable strategy table once,
//! when the builder's `build` method runs. The table is then shared by every
//! call made through the resulting merger.

mod in_place;
mod pure;

use std::fmt;

pub use in_place::MergeIntoOptions;
pub use pure::{MergeOptions, ValueFilter};

use crate::settings::KindPolicy;
use crate::{Kind, MergeError, MergeResult, MergeSettings};

/// How one kind of value is merged.
#[derive(Clone)]
pub enum Strategy<F> {
    /// Use the built-in strategy for the kind.
    Default,
    /// Use a caller-supplied function.
    Custom(F),
    /// Do not recurse: treat values of this kind as leaves, so the last one
    /// wins. Not allowed for the others slot.
    Replace,
}

impl<F> Strategy<F> {
    /// Returns `true` when the strategy is caller-supplied.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl<F> Default for Strategy<F> {
    fn default() -> Self {
        Self::Default
    }
}

impl<F> fmt::Debug for Strategy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::Replace => f.write_str("Replace"),
        }
    }
}

impl<F> From<KindPolicy> for Strategy<F> {
    fn from(policy: KindPolicy) -> Self {
        match policy {
            KindPolicy::Merge => Self::Default,
            KindPolicy::Replace => Self::Replace,
        }
    }
}

/// The resolved function table: one strategy per composable kind.
#[derive(Clone)]
pub(crate) struct StrategyTable<F> {
    records: Strategy<F>,
    lists: Strategy<F>,
    sets: Strategy<F>,
    maps: Strategy<F>,
    others: Strategy<F>,
}

impl<F> Default for StrategyTable<F> {
    fn default() -> Self {
        Self {
            records: Strategy::Default,
            lists: Strategy::Default,
            sets: Strategy::Default,
            maps: Strategy::Default,
            others: Strategy::Default,
        }
    }
}

impl<F> fmt::Debug for StrategyTable<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyTable")
            .field("records", &self.records)
            .field("lists", &self.lists)
            .field("sets", &self.sets)
            .field("maps", &self.maps)
            .field("others", &self.others)
            .finish()
    }
}

impl<F> StrategyTable<F> {
    pub(crate) fn from_settings(settings: &MergeSettings) -> Self {
        Self {
            records: settings.records.into(),
            lists: settings.lists.into(),
            sets: settings.sets.into(),
            maps: settings.maps.into(),
            others: settings.others.into(),
        }
    }

    /// Strategy for `kind`. [`Kind::None`] shares the others slot.
    pub(crate) const fn get(&self, kind: Kind) -> &Strategy<F> {
        match kind {
            Kind::Record => &self.records,
            Kind::List => &self.lists,
            Kind::Set => &self.sets,
            Kind::Map => &self.maps,
            Kind::None | Kind::Other => &self.others,
        }
    }

    pub(crate) fn set(&mut self, kind: Kind, strategy: Strategy<F>) {
        let slot = match kind {
            Kind::Record => &mut self.records,
            Kind::List => &mut self.lists,
            Kind::Set => &mut self.sets,
            Kind::Map => &mut self.maps,
            Kind::None | Kind::Other => &mut self.others,
        };
        *slot = strategy;
    }

    /// Reject tables whose others slot opts out of merging: leaves have
    /// nothing simpler to fall back to.
    pub(crate) fn validate(&self) -> MergeResult<()> {
        if matches!(self.others, Strategy::Replace) {
            return Err(MergeError::configuration(
                "merge_others",
                "the others strategy cannot be replaced; supply a function or keep the default",
            ));
        }
        Ok(())
    }
}
