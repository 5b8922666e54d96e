//! Helpers for running settings tests inside a `figment::Jail`.
//!
//! The jail isolates the working directory and environment, so tests can
//! write settings files and export `DEEPMERGE_*` variables without leaking
//! state into one another.

use std::path::PathBuf;

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes a TOML settings file into the jail and returns its absolute path.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub fn write_settings(
    jail: &mut figment::Jail,
    name: &str,
    toml: &str,
) -> figment::error::Result<PathBuf> {
    jail.create_file(name, toml)?;
    Ok(jail.directory().join(name))
}

/// Converts a merge error into a [`figment::Error`] so it can leave a jail
/// closure through `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used with map_err, which hands over the owned error"
)]
pub fn jail_error(err: deepmerge::MergeError) -> figment::Error {
    figment::Error::from(err.to_string())
}
