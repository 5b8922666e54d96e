//! Error types produced while configuring or running a merge.

mod constructors;
mod types;

pub use types::MergeError;

/// Result alias used throughout the crate.
pub type MergeResult<T> = Result<T, MergeError>;
