//! Domain constants

/// Names that always resolve to the registry itself
pub const DEFAULT_RESERVED_IDS: [&str; 3] = ["registry", "container", "service_container"];

/// Id carried by [`crate::Reference::registry`]
pub const SELF_REFERENCE_ID: &str = "registry";
