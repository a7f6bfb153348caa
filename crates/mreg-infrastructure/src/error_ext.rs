//! Error extension utilities
//!
//! Foreign errors only enter the registry through configuration handling
//! (figment, toml, file writes). They are folded into
//! [`Error::Configuration`], keeping the foreign error as the source.

use std::fmt;

use mreg_domain::error::{Error, Result};

/// Attach a configuration context to a foreign error
///
/// ```ignore
/// let text = toml::to_string_pretty(&config).config_context("Serializing config")?;
/// std::fs::write(&path, text)
///     .with_config_context(|| format!("Writing {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Map the error to [`Error::Configuration`] prefixed with `what`
    fn config_context<C: fmt::Display>(self, what: C) -> Result<T>;

    /// Same as [`ErrorContext::config_context`], building the prefix only on failure
    fn with_config_context<C: fmt::Display, F: FnOnce() -> C>(self, what: F) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context<C: fmt::Display>(self, what: C) -> Result<T> {
        self.map_err(|err| config_error(what, err))
    }

    fn with_config_context<C: fmt::Display, F: FnOnce() -> C>(self, what: F) -> Result<T> {
        self.map_err(|err| config_error(what(), err))
    }
}

fn config_error<C, E>(what: C, err: E) -> Error
where
    C: fmt::Display,
    E: std::error::Error + Send + Sync + 'static,
{
    Error::configuration_with_source(format!("{what}: {err}"), err)
}
