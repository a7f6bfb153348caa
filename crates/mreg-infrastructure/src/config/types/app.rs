//! Application configuration root

use mreg_domain::error::Result;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::registry::RegistryConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry engine settings
    pub registry: RegistryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reject values the registry or the logger cannot run with
    pub fn validate(&self) -> Result<()> {
        self.registry.validate()?;
        self.logging.validate()
    }
}
