//! Public lookup facade

use std::any::Any;
use std::sync::Arc;

use mreg_domain::{Error, Service};
use mreg_infrastructure::Registry;

use crate::error::ContainerError;

/// Two-method view of a [`Registry`] for application code
#[derive(Debug, Clone)]
pub struct Container {
    registry: Registry,
}

impl Container {
    /// Wrap a registry
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Resolve `id`, reporting lookup misses as [`ContainerError::ServiceNotFound`]
    ///
    /// A miss anywhere in the dependency chain is reported against `id`; the
    /// registry's error naming the missing dependency is kept as the source.
    pub fn get(&self, id: &str) -> Result<Service, ContainerError> {
        self.registry.get(id).map_err(|err| {
            if err.is_not_found() {
                ContainerError::ServiceNotFound {
                    id: id.to_string(),
                    source: err,
                }
            } else {
                ContainerError::Registry(err)
            }
        })
    }

    /// Resolve `id` and downcast it to `T`
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        self.get(id)?.downcast::<T>().map_err(|_| {
            ContainerError::Registry(Error::invalid_argument(format!(
                "Service \"{id}\" is not a {}",
                std::any::type_name::<T>()
            )))
        })
    }

    /// Whether `id` is cached, defined or reserved
    pub fn has(&self, id: &str) -> bool {
        self.registry.has(id)
    }

    /// The wrapped registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl From<Registry> for Container {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
