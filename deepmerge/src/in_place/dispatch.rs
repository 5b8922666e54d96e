//! Routing of in place merges to per-kind strategies.

use super::{DeepMergeInto, defaults};
use crate::options::Strategy;
use crate::{IntoOutcome, Kind, MergeResult, Value, classify};

impl<M> DeepMergeInto<M> {
    /// Classify `target` against `sources` and merge them into it.
    pub(crate) fn merge_unknowns_into(
        &self,
        target: &mut Value,
        sources: &[Value],
        meta: Option<&M>,
    ) -> MergeResult<()> {
        if sources.is_empty() {
            return self.invoke(Kind::Other, target, sources, meta);
        }

        let kind = classify(target);
        if kind.is_composite() && sources.iter().any(|value| classify(value) != kind) {
            tracing::trace!(%kind, "kind mismatch; merging as leaves");
            return self.invoke(Kind::Other, target, sources, meta);
        }
        self.invoke(kind, target, sources, meta)
    }

    fn invoke(
        &self,
        kind: Kind,
        target: &mut Value,
        sources: &[Value],
        meta: Option<&M>,
    ) -> MergeResult<()> {
        let merge = match self.table.get(kind) {
            Strategy::Custom(merge) => merge,
            Strategy::Default => return self.builtin(kind, target, sources, meta),
            Strategy::Replace => return self.builtin(Kind::Other, target, sources, meta),
        };

        match merge(target, sources, &self.utils(), meta)? {
            IntoOutcome::Done => Ok(()),
            IntoOutcome::DefaultMerge => {
                tracing::trace!(%kind, "default merge requested");
                self.builtin(kind, target, sources, meta)
            }
        }
    }

    fn builtin(
        &self,
        kind: Kind,
        target: &mut Value,
        sources: &[Value],
        meta: Option<&M>,
    ) -> MergeResult<()> {
        match kind {
            Kind::Record => defaults::merge_records_into(target, sources, &self.utils(), meta)?,
            Kind::List => defaults::merge_lists_into(target, sources),
            Kind::Set => defaults::merge_sets_into(target, sources),
            Kind::Map => defaults::merge_maps_into(target, sources),
            Kind::None | Kind::Other => defaults::merge_others_into(target, sources),
        }
        Ok(())
    }
}
