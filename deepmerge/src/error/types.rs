//! Primary error enum for merge configuration and execution.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::Kind;

/// Errors that can occur while building or running a merge.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// A merge option was given a value its contract forbids.
    #[error("invalid merge option '{option}': {message}")]
    Configuration {
        /// Name of the offending option.
        option: &'static str,
        /// Human-readable explanation of the violation.
        message: String,
    },

    /// A custom merge function reported a failure.
    #[error("custom merge function failed: {source}")]
    Callback {
        /// Error raised by the callback.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Converting between [`crate::Value`] and serde data failed.
    #[error("value conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),

    /// The value has no JSON representation.
    #[error("{kind} value cannot be represented as JSON: {detail}")]
    Unrepresentable {
        /// Classification of the rejected value.
        kind: Kind,
        /// What made the value unrepresentable.
        detail: &'static str,
    },

    /// Loading [`crate::MergeSettings`] failed.
    #[error("failed to load merge settings: {0}")]
    Settings(#[from] Box<FigmentError>),
}
