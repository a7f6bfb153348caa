//! Infrastructure layer constants
//!
//! Domain-level constants (reserved ids) live in `mreg_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "mreg.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "mreg";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MREG";

/// Separator between prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Maximum nested `get` depth before resolution is aborted
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 128;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "MREG_LOG";

/// Log file prefix used when the configured path has no file stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "mreg";
