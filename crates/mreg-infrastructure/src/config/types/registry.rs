//! Registry engine configuration types

use std::collections::BTreeMap;

use mreg_domain::constants::DEFAULT_RESERVED_IDS;
use mreg_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_RESOLUTION_DEPTH;

/// Registry engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Names that resolve to the registry itself and cannot be registered
    pub reserved_ids: Vec<String>,

    /// Maximum nested resolution depth
    pub max_resolution_depth: usize,

    /// Initial parameters, read by parameter references
    pub parameters: BTreeMap<String, serde_json::Value>,

    /// Initial options, read by option references
    pub options: BTreeMap<String, serde_json::Value>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reserved_ids: DEFAULT_RESERVED_IDS.iter().map(ToString::to_string).collect(),
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            parameters: BTreeMap::new(),
            options: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// At least one non-empty reserved id and a positive depth limit
    pub fn validate(&self) -> Result<()> {
        if self.reserved_ids.is_empty() {
            return Err(Error::configuration(
                "registry.reserved_ids needs at least one id",
            ));
        }
        if self.reserved_ids.iter().any(String::is_empty) {
            return Err(Error::configuration(
                "registry.reserved_ids contains an empty id",
            ));
        }
        if self.max_resolution_depth == 0 {
            return Err(Error::configuration(
                "registry.max_resolution_depth must be greater than 0",
            ));
        }
        Ok(())
    }
}
