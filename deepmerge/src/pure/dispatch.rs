//! Routing of value lists to per-kind strategies.

use super::{DeepMerge, defaults};
use crate::options::Strategy;
use crate::{Kind, MergeResult, Outcome, Resolved, Value, classify};

impl<M> DeepMerge<M> {
    /// Filter, classify and merge `values`.
    pub(crate) fn merge_unknowns(
        &self,
        values: &[Value],
        meta: Option<&M>,
    ) -> MergeResult<Resolved> {
        let filtered = self.filter.apply(values, meta);
        let (first, rest) = match filtered.split_first() {
            None => return Ok(Resolved::Value(Value::Undefined)),
            Some((_, [])) => return self.invoke(Kind::Other, &filtered, meta),
            Some(split) => split,
        };

        let kind = classify(first);
        if kind.is_composite() && rest.iter().any(|value| classify(value) != kind) {
            tracing::trace!(%kind, "kind mismatch; merging as leaves");
            return self.invoke(Kind::Other, &filtered, meta);
        }
        self.invoke(kind, &filtered, meta)
    }

    /// Run the strategy configured for `kind`, honouring default-merge
    /// requests.
    fn invoke(&self, kind: Kind, values: &[Value], meta: Option<&M>) -> MergeResult<Resolved> {
        let merge = match self.table.get(kind) {
            Strategy::Custom(merge) => merge,
            Strategy::Default => return self.builtin(kind, values, meta),
            Strategy::Replace => return self.builtin(Kind::Other, values, meta),
        };

        match merge(values, &self.utils(), meta)? {
            Outcome::Merged(Value::Undefined) if self.implicit_default_merging => {
                tracing::trace!(%kind, "undefined result; falling back to the built-in strategy");
                self.builtin(kind, values, meta)
            }
            Outcome::Merged(value) => Ok(Resolved::Value(value)),
            Outcome::DefaultMerge => {
                tracing::trace!(%kind, "default merge requested");
                self.builtin(kind, values, meta)
            }
            Outcome::Skip => Ok(Resolved::Skip),
        }
    }

    fn builtin(&self, kind: Kind, values: &[Value], meta: Option<&M>) -> MergeResult<Resolved> {
        let merged = match kind {
            Kind::Record => defaults::merge_records(values, &self.utils(), meta)?,
            Kind::List => defaults::merge_lists(values),
            Kind::Set => defaults::merge_sets(values),
            Kind::Map => defaults::merge_maps(values),
            Kind::None | Kind::Other => defaults::merge_others(values),
        };
        Ok(Resolved::Value(merged))
    }
}
