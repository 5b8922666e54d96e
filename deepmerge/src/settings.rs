//! Declarative merge settings loaded through `figment`.
//!
//! Settings cover the parts of a merge configuration that can be written
//! down as data: which kinds recurse, whether undefined values are filtered,
//! and whether implicit default merging is on. Custom functions still have to
//! be supplied in code through [`crate::MergeOptions`].
//!
//! Sources are layered in the usual order: built-in defaults, then a TOML
//! document, then environment variables.
//!
//! ```
//! use deepmerge::{KindPolicy, MergeSettings};
//!
//! let settings = MergeSettings::from_toml_str("lists = \"replace\"")?;
//! assert_eq!(settings.lists, KindPolicy::Replace);
//! assert!(settings.filter_undefined);
//! # Ok::<_, deepmerge::MergeError>(())
//! ```

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{MergeError, MergeResult};

/// Prefix used by [`MergeSettings::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "DEEPMERGE_";

/// Whether values of one kind are merged structurally or replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KindPolicy {
    /// Use the built-in structural strategy.
    #[default]
    Merge,
    /// Treat the kind as a leaf: the last value wins.
    Replace,
}

/// Data-only merge configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeSettings {
    /// Policy for records.
    pub records: KindPolicy,
    /// Policy for lists.
    pub lists: KindPolicy,
    /// Policy for sets.
    pub sets: KindPolicy,
    /// Policy for maps.
    pub maps: KindPolicy,
    /// Policy for leaves. `replace` is rejected when options are built.
    pub others: KindPolicy,
    /// Drop undefined values before classification (pure merges only).
    pub filter_undefined: bool,
    /// Treat an undefined result from a custom function as a default-merge
    /// request (pure merges only).
    pub implicit_default_merging: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            records: KindPolicy::Merge,
            lists: KindPolicy::Merge,
            sets: KindPolicy::Merge,
            maps: KindPolicy::Merge,
            others: KindPolicy::Merge,
            filter_undefined: true,
            implicit_default_merging: false,
        }
    }
}

impl MergeSettings {
    /// A figment seeded with the default settings, ready for more providers.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    /// Extract settings from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Settings`] when a provider fails or a field has
    /// the wrong shape.
    pub fn extract(figment: &Figment) -> MergeResult<Self> {
        figment.extract().map_err(MergeError::settings)
    }

    /// Parse settings from a TOML document layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Settings`] when the document is invalid.
    pub fn from_toml_str(toml: &str) -> MergeResult<Self> {
        Self::extract(&Self::figment().merge(Toml::string(toml)))
    }

    /// Load settings from the TOML file at `path`, then apply environment
    /// variables carrying `env_prefix`.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Settings`] when the file or the environment
    /// holds invalid values.
    pub fn load(path: &Utf8Path, env_prefix: &str) -> MergeResult<Self> {
        tracing::debug!(path = %path, env_prefix, "loading merge settings");
        let figment = Self::figment()
            .merge(Toml::file(path.as_std_path()))
            .merge(Env::prefixed(env_prefix));
        Self::extract(&figment)
    }

    /// Load settings from environment variables prefixed with
    /// [`DEFAULT_ENV_PREFIX`], for example `DEEPMERGE_LISTS=replace`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Settings`] when a variable holds an invalid value.
    pub fn from_env() -> MergeResult<Self> {
        Self::extract(&Self::figment().merge(Env::prefixed(DEFAULT_ENV_PREFIX)))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{KindPolicy, MergeSettings};
    use crate::MergeError;

    #[rstest]
    fn defaults_merge_everything() {
        let settings = MergeSettings::default();
        assert_eq!(settings.records, KindPolicy::Merge);
        assert!(settings.filter_undefined);
        assert!(!settings.implicit_default_merging);
    }

    #[rstest]
    #[case::lists("lists = \"replace\"", |s: &MergeSettings| s.lists == KindPolicy::Replace)]
    #[case::maps("maps = \"replace\"", |s: &MergeSettings| s.maps == KindPolicy::Replace)]
    #[case::filter("filter_undefined = false", |s: &MergeSettings| !s.filter_undefined)]
    #[case::implicit(
        "implicit_default_merging = true",
        |s: &MergeSettings| s.implicit_default_merging
    )]
    fn toml_overrides_defaults(#[case] toml: &str, #[case] check: fn(&MergeSettings) -> bool) {
        let settings = MergeSettings::from_toml_str(toml).expect("valid settings parse");
        assert!(check(&settings), "unexpected settings: {settings:?}");
    }

    #[rstest]
    #[case::unknown_field("colour = \"blue\"")]
    #[case::bad_policy("records = \"shuffle\"")]
    fn invalid_toml_is_a_settings_error(#[case] toml: &str) {
        let err = MergeSettings::from_toml_str(toml).expect_err("invalid settings rejected");
        assert!(matches!(err, MergeError::Settings(_)));
    }
}
