//! Instance cache slots

use std::fmt;
use std::sync::Arc;

use mreg_domain::{Result, Service};

use super::registry::Registry;

/// Deferred constructor stored in the instance cache until first read
pub type Factory = Arc<dyn Fn(&Registry) -> Result<Service> + Send + Sync>;

/// One entry of the instance cache
///
/// `Pending` is replaced by `Resolved` exactly once, on the first successful
/// factory call. A failing factory leaves the slot pending.
#[derive(Clone)]
pub(crate) enum Slot {
    Pending(Factory),
    Resolved(Service),
}

impl Slot {
    pub(crate) fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(_) => f.write_str("Pending"),
            Self::Resolved(service) => f
                .debug_tuple("Resolved")
                .field(&Arc::as_ptr(service))
                .finish(),
        }
    }
}
