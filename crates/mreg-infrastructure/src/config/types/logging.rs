//! Logging configuration types

use std::path::PathBuf;

use mreg_domain::error::Result;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;
use crate::logging::parse_log_level;

/// `[logging]` section, consumed by [`crate::logging::init_logging`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level; `MREG_LOG` replaces it with a full filter directive
    pub level: String,

    /// One JSON object per event instead of human-readable lines
    pub json_format: bool,

    /// Also write to a daily-rolling file named after this path's stem
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

impl LoggingConfig {
    /// The level must parse as a tracing level
    pub fn validate(&self) -> Result<()> {
        parse_log_level(&self.level).map(drop)
    }
}
