//! Error handling types

use std::fmt;

use thiserror::Error;

/// Result type alias for registry operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Shape of a detected dependency cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleKind {
    /// A definition declares an argument pointing at itself
    SelfReference,
    /// Two definitions point at each other through their arguments
    Mutual,
    /// The walk or the resolution went deeper than the configured bound
    DepthExceeded,
    /// A pre-built instance is the registry itself
    RegistryInstance,
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SelfReference => "self reference",
            Self::Mutual => "circular reference",
            Self::DepthExceeded => "resolution depth exceeded",
            Self::RegistryInstance => "registry instance",
        };
        f.write_str(label)
    }
}

/// Main error type for the registry
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup of an id with no cached value and no definition
    #[error("Undefined \"{id}\" instance")]
    NotFound {
        /// The id that was requested
        id: String,
    },

    /// Self or mutual cycle among declared argument references
    #[error("Detected {kind}: {message}")]
    CircularReference {
        /// Which shape of cycle was found
        kind: CycleKind,
        /// Human-readable description naming the definitions involved
        message: String,
    },

    /// Duplicate registration of an id
    #[error("Instance \"{id}\" already exists")]
    AlreadyExists {
        /// The id registered twice
        id: String,
    },

    /// An id collides with a name meaning "the registry itself"
    #[error("Instance \"{id}\" refers to reserved \"[{}]\"", .reserved.join(","))]
    ReservedId {
        /// The rejected id
        id: String,
        /// The reserved names in effect
        reserved: Vec<String>,
    },

    /// A definition extends a parent that is not registered
    #[error("Not found parent instance \"{parent_id}\" for \"{type_name}\"")]
    ParentNotFound {
        /// The missing parent id
        parent_id: String,
        /// Target type of the child definition
        type_name: String,
    },

    /// Malformed definition or reference
    #[error("Invalid definition: {message}")]
    InvalidDefinition {
        /// Description of the problem
        message: String,
    },

    /// Constructor argument missing or of an unexpected type
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

// Lookup and registration errors
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an already exists error
    pub fn already_exists<S: Into<String>>(id: S) -> Self {
        Self::AlreadyExists { id: id.into() }
    }

    /// Create a reserved id error
    pub fn reserved_id<S: Into<String>>(id: S, reserved: &[String]) -> Self {
        Self::ReservedId {
            id: id.into(),
            reserved: reserved.to_vec(),
        }
    }

    /// Create a missing parent error
    pub fn parent_not_found<P: Into<String>, T: Into<String>>(parent_id: P, type_name: T) -> Self {
        Self::ParentNotFound {
            parent_id: parent_id.into(),
            type_name: type_name.into(),
        }
    }
}

// Cycle errors
impl Error {
    /// A definition referencing itself at the first level
    pub fn self_reference(type_name: &str) -> Self {
        Self::CircularReference {
            kind: CycleKind::SelfReference,
            message: format!("\"{type_name}\""),
        }
    }

    /// Two definitions referencing each other
    pub fn circular_reference(first: &str, second: &str) -> Self {
        Self::CircularReference {
            kind: CycleKind::Mutual,
            message: format!("\"{first}\" -> <- \"{second}\""),
        }
    }

    /// Resolution or cycle walk exceeded its bound
    pub fn depth_exceeded(id: &str, limit: usize) -> Self {
        Self::CircularReference {
            kind: CycleKind::DepthExceeded,
            message: format!("\"{id}\" exceeded depth {limit}"),
        }
    }

    /// The registry was offered as one of its own instances
    pub fn registry_instance(id: &str) -> Self {
        Self::CircularReference {
            kind: CycleKind::RegistryInstance,
            message: format!("\"{id}\" is the registry itself"),
        }
    }
}

// Validation errors
impl Error {
    /// Create an invalid definition error
    pub fn invalid_definition<S: Into<String>>(message: S) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this reports a dependency cycle
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularReference { .. })
    }

    /// Cycle shape, if this reports a dependency cycle
    pub fn cycle_kind(&self) -> Option<CycleKind> {
        match self {
            Self::CircularReference { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
