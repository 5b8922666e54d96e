//! Metadata threaded through recursive merges.

use std::sync::Arc;

use crate::{Key, Value};

/// Position of the current merge step inside its parent records.
///
/// This is the default metadata type and the frame handed to every metadata
/// updater when the record strategies recurse into a key.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyContext {
    /// Key being merged.
    pub key: Key,
    /// Records merged at the parent level. In place merges list the source
    /// records only; the target is being rewritten and is not included.
    pub parents: Arc<[Value]>,
}

impl KeyContext {
    /// Build a frame for `key` under `parents`.
    #[must_use]
    pub const fn new(key: Key, parents: Arc<[Value]>) -> Self {
        Self { key, parents }
    }
}

/// Function deriving the metadata for a child key from its parent's.
pub type MetaUpdater<M> = Arc<dyn Fn(Option<&M>, KeyContext) -> M + Send + Sync>;

/// The built-in updater: drops the previous metadata and keeps the new frame.
///
/// Callers wanting the whole key path must accumulate it in their own updater.
#[must_use]
pub fn replace_meta<M: From<KeyContext>>(_previous: Option<&M>, context: KeyContext) -> M {
    M::from(context)
}
