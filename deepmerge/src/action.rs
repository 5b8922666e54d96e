//! Return types for custom merge functions.
//!
//! Actions travel out of band: they are enum variants, never a special
//! [`Value`], so no legitimate merge result (including
//! [`Value::Undefined`]) can be mistaken for one.

use crate::Value;

/// What a pure-mode merge function produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The merged value.
    Merged(Value),
    /// Run the built-in strategy for this kind on the same inputs instead.
    DefaultMerge,
    /// Leave the current key out of the enclosing record.
    Skip,
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Self::Merged(value)
    }
}

/// Result of dispatching values through a pure merge.
///
/// Unlike [`Outcome`] this never carries a default-merge request: the
/// dispatcher has already honoured it.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// The merged value.
    Value(Value),
    /// A strategy asked for the current key to be left out.
    Skip,
}

impl Resolved {
    /// The merged value, with a skip collapsing to [`Value::Undefined`].
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Skip => Value::Undefined,
        }
    }
}

impl From<Resolved> for Outcome {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Value(value) => Self::Merged(value),
            Resolved::Skip => Self::Skip,
        }
    }
}

/// What an in place merge function did.
///
/// There is no skip in this mode: the target slot always keeps a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntoOutcome {
    /// The target slot holds the merged result.
    Done,
    /// Run the built-in strategy for this kind on the same target and sources.
    DefaultMerge,
}
