//! Registry bootstrap
//!
//! Builds a [`Registry`] from loaded configuration. Populating definitions
//! is left to the caller; this only wires reserved ids, the depth limit,
//! parameters and options.
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().with_config_path("mreg.toml").load()?;
//! let registry = build_registry(&config);
//! registry.add(Definition::new("Mailer")?)?;
//! ```

use std::path::Path;

use mreg_domain::error::Result;
use tracing::info;

use super::registry::Registry;
use crate::config::{AppConfig, ConfigLoader};

/// Build a registry from application configuration
pub fn build_registry(config: &AppConfig) -> Registry {
    let registry = Registry::with_config(&config.registry);
    info!(
        reserved_ids = ?config.registry.reserved_ids,
        max_resolution_depth = config.registry.max_resolution_depth,
        parameters = config.registry.parameters.len(),
        options = config.registry.options.len(),
        "Registry bootstrapped"
    );
    registry
}

/// Load configuration (optionally from `config_path`) and build a registry
pub fn bootstrap(config_path: Option<&Path>) -> Result<Registry> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    Ok(build_registry(&config))
}
