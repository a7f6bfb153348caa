//! Facade error types

use thiserror::Error;

/// Errors surfaced by [`crate::Container`]
#[derive(Error, Debug)]
pub enum ContainerError {
    /// The requested id is unknown to the registry
    #[error("Service \"{id}\" not found")]
    ServiceNotFound {
        /// The id that was requested
        id: String,
        /// The registry's lookup error
        #[source]
        source: mreg_domain::Error,
    },

    /// Any other registry failure, unchanged
    #[error(transparent)]
    Registry(#[from] mreg_domain::Error),
}

impl ContainerError {
    /// Whether this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServiceNotFound { .. })
    }
}
