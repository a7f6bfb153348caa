//! Resolved argument values

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a constructed object
///
/// Two lookups of the same id yield handles for which [`same_service`] holds.
pub type Service = Arc<dyn Any + Send + Sync>;

/// Identity comparison between two service handles
pub fn same_service(a: &Service, b: &Service) -> bool {
    Arc::ptr_eq(a, b)
}

/// What a reference resolves to
#[derive(Clone, Default)]
pub enum Value {
    /// Unset environment variable, parameter or option
    #[default]
    Absent,
    /// Plain data from the environment, parameters or options
    Scalar(serde_json::Value),
    /// Another service, or the registry itself
    Service(Service),
}

impl Value {
    /// Wrap a string scalar
    pub fn string<S: Into<String>>(value: S) -> Self {
        Self::Scalar(serde_json::Value::String(value.into()))
    }

    /// Lift an optional scalar, mapping `None` to [`Value::Absent`]
    pub fn from_scalar(value: Option<serde_json::Value>) -> Self {
        value.map_or(Self::Absent, Self::Scalar)
    }

    /// Whether nothing was found for the reference
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Scalar payload, if any
    pub fn as_scalar(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// String form of a scalar; non-string scalars are rendered as JSON text
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Scalar(serde_json::Value::String(s)) => Some(s.clone()),
            Self::Scalar(serde_json::Value::Null) => None,
            Self::Scalar(other) => Some(other.to_string()),
            _ => None,
        }
    }

    /// Service payload, if any
    pub fn as_service(&self) -> Option<&Service> {
        match self {
            Self::Service(service) => Some(service),
            _ => None,
        }
    }

    /// Downcast a service payload to a concrete type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_service()
            .and_then(|service| Arc::clone(service).downcast::<T>().ok())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::Service(service) => f
                .debug_tuple("Service")
                .field(&Arc::as_ptr(service))
                .finish(),
        }
    }
}

impl From<Service> for Value {
    fn from(service: Service) -> Self {
        Self::Service(service)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Scalar(value)
    }
}
