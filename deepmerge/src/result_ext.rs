//! Extensions for mapping foreign errors into `MergeResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| MergeError::…(e))` patterns
//! inside custom merge functions and conversion code.
//!
//! - Use [`MergeResultExt::into_merge`] for error types that implement
//!   `Into<MergeError>` (for example `serde_json::Error`).
//! - Use [`CallbackResultExt::into_callback`] for any other error raised by a
//!   custom merge function; it becomes [`MergeError::Callback`].
//!
//! # Examples
//!
//! ```
//! use deepmerge::{CallbackResultExt, MergeResult};
//!
//! fn parse_port(raw: &str) -> MergeResult<u16> {
//!     raw.parse::<u16>().into_callback()
//! }
//!
//! assert!(parse_port("8080").is_ok());
//! assert!(parse_port("eighty").is_err());
//! ```

use crate::{MergeError, MergeResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<MergeError>`
/// into a `MergeResult<T>`.
pub trait MergeResultExt<T, E> {
    /// Convert `Result<T, E>` into `MergeResult<T>` using `Into<MergeError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into [`MergeError`].
    fn into_merge(self) -> MergeResult<T>;
}

impl<T, E> MergeResultExt<T, E> for Result<T, E>
where
    E: Into<MergeError>,
{
    fn into_merge(self) -> MergeResult<T> {
        self.map_err(Into::into)
    }
}

/// Extension tailored to errors raised inside custom merge functions.
pub trait CallbackResultExt<T> {
    /// Convert the error into a [`MergeError::Callback`].
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when the input is `Err`.
    fn into_callback(self) -> MergeResult<T>;
}

impl<T, E> CallbackResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_callback(self) -> MergeResult<T> {
        self.map_err(MergeError::callback)
    }
}
