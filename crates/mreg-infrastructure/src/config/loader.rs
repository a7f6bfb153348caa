//! Configuration loader
//!
//! Layers, lowest priority first:
//!
//! ```text
//! AppConfig::default()
//!   └── TOML file   explicit path, or the first mreg.toml found in
//!                   ./  ./mreg/  <user config dir>/mreg/
//!         └── env   MREG__REGISTRY__MAX_RESOLUTION_DEPTH=64
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use mreg_domain::error::Result;

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Figment-backed loader for [`AppConfig`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit file; when unset the default locations are searched
    config_path: Option<PathBuf>,

    /// Prefix of overriding environment variables, without separator
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading `mreg.toml` from the default locations and `MREG__*` variables
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Read this file instead of searching the default locations
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read `<prefix>__*` environment variables instead of `MREG__*`
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Explicit file path, if one was set
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Merge every layer, then validate the result
    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Write `config` as pretty TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(config)
            .config_context("Failed to serialize configuration")?;
        std::fs::write(path, text)
            .with_config_context(|| format!("Failed to write {}", path.display()))
    }

    fn figment(&self) -> Figment {
        let defaults = Figment::from(Serialized::defaults(AppConfig::default()));
        let with_file = match self.file_layer() {
            Some(path) => defaults.merge(Toml::file(path)),
            None => defaults,
        };
        let prefix = format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix);
        with_file.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR))
    }

    /// File to merge, logging what was picked
    fn file_layer(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => {
                let found = path.exists();
                log_config_loaded(path, found);
                found.then(|| path.clone())
            }
            None => {
                let path = discover()?;
                log_config_loaded(&path, true);
                Some(path)
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// First existing `mreg.toml` among the default locations
fn discover() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let local = cwd.iter().flat_map(|dir| {
        [
            dir.join(DEFAULT_CONFIG_FILENAME),
            dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME),
        ]
    });
    let user = dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
    local.chain(user).find(|path| path.is_file())
}
