//! Resolved constructor arguments

use std::any::Any;
use std::sync::Arc;

use indexmap::IndexMap;

use super::value::{Service, Value};
use crate::error::{Error, Result};

/// Resolved arguments handed to a type constructor
///
/// Iteration order is the merged declared order of the definition: the
/// child's own arguments first, then the ones inherited from its parent.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: IndexMap<String, Value>,
}

impl Arguments {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty argument list with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    /// Append a resolved value
    pub fn insert<S: Into<String>>(&mut self, name: S, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Raw value for `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether `name` was declared
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Name/value pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Untyped service handle for `name`
    pub fn raw_service(&self, name: &str) -> Result<Service> {
        match self.require(name)? {
            Value::Service(service) => Ok(Arc::clone(service)),
            other => Err(Error::invalid_argument(format!(
                "Argument \"{name}\" is not a service: {other:?}"
            ))),
        }
    }

    /// Service for `name`, downcast to `T`
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.raw_service(name)?.downcast::<T>().map_err(|_| {
            Error::invalid_argument(format!(
                "Argument \"{name}\" is not a {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// String form of a scalar argument; `None` when absent
    pub fn string(&self, name: &str) -> Result<Option<String>> {
        match self.require(name)? {
            Value::Service(_) => Err(Error::invalid_argument(format!(
                "Argument \"{name}\" is a service, not a scalar"
            ))),
            value => Ok(value.as_string()),
        }
    }

    /// Scalar argument; `None` when absent
    pub fn scalar(&self, name: &str) -> Result<Option<&serde_json::Value>> {
        match self.require(name)? {
            Value::Service(_) => Err(Error::invalid_argument(format!(
                "Argument \"{name}\" is a service, not a scalar"
            ))),
            value => Ok(value.as_scalar()),
        }
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("Missing argument \"{name}\"")))
    }
}

impl IntoIterator for Arguments {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
