//! Convenience constructors for `MergeError`.

use figment::Error as FigmentError;

use super::MergeError;

impl MergeError {
    /// Construct a configuration error for `option`.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepmerge::MergeError;
    /// let err = MergeError::configuration("merge_others", "cannot be replaced");
    /// assert!(matches!(err, MergeError::Configuration { option: "merge_others", .. }));
    /// ```
    #[must_use]
    pub fn configuration(option: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            option,
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error raised inside a custom merge function.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepmerge::MergeError;
    /// let io = std::io::Error::other("disk on fire");
    /// let err = MergeError::callback(io);
    /// assert_eq!(err.to_string(), "custom merge function failed: disk on fire");
    /// ```
    #[must_use]
    pub fn callback<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Callback {
            source: source.into(),
        }
    }

    /// Construct a settings error from a [`figment::Error`].
    #[must_use]
    pub fn settings(source: FigmentError) -> Self {
        Self::Settings(Box::new(source))
    }
}
