//! Argument references
//!
//! A reference names the source of one constructor argument and knows how
//! to resolve itself against a [`ServiceResolver`]:
//!
//! | Kind | Resolves to |
//! |------|-------------|
//! | `Definition` | `resolver.get(id)`, or the registry itself for reserved ids |
//! | `Env` | process environment value, absent when unset |
//! | `Parameter` | `resolver.get_parameter(id)` |
//! | `Option` | `resolver.get_option(id)` |
//! | `SelfRef` | the registry itself |

use std::fmt;

use crate::constants::SELF_REFERENCE_ID;
use crate::error::{Error, Result};
use crate::ports::ServiceResolver;
use crate::value_objects::Value;

/// Resolution strategy of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Another definition or instance in the registry
    Definition,
    /// Process environment variable
    Env,
    /// Registry parameter
    Parameter,
    /// Registry option
    Option,
    /// The registry itself
    SelfRef,
}

/// Named pointer to something resolvable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    id: String,
    kind: ReferenceKind,
}

impl Reference {
    fn with_kind<S: Into<String>>(id: S, kind: ReferenceKind) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_definition(format!(
                "Reference id of kind {kind:?} is empty"
            )));
        }
        Ok(Self { id, kind })
    }

    /// Reference to another definition or instance
    pub fn service<S: Into<String>>(id: S) -> Result<Self> {
        Self::with_kind(id, ReferenceKind::Definition)
    }

    /// Reference to a process environment variable
    pub fn env<S: Into<String>>(name: S) -> Result<Self> {
        Self::with_kind(name, ReferenceKind::Env)
    }

    /// Reference to a registry parameter
    pub fn parameter<S: Into<String>>(name: S) -> Result<Self> {
        Self::with_kind(name, ReferenceKind::Parameter)
    }

    /// Reference to a registry option
    pub fn option<S: Into<String>>(name: S) -> Result<Self> {
        Self::with_kind(name, ReferenceKind::Option)
    }

    /// Reference to the registry itself
    pub fn registry() -> Self {
        Self {
            id: SELF_REFERENCE_ID.to_string(),
            kind: ReferenceKind::SelfRef,
        }
    }

    /// Target id or variable name
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolution strategy
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Whether resolving this may instantiate another definition
    pub fn targets_definition(&self) -> bool {
        self.kind == ReferenceKind::Definition
    }

    /// Resolve against `resolver`
    ///
    /// Only definition references can fail or recurse; the other kinds are
    /// pure reads that yield [`Value::Absent`] when nothing is set.
    pub fn load(&self, resolver: &dyn ServiceResolver) -> Result<Value> {
        match self.kind {
            ReferenceKind::Definition => {
                if resolver.is_container_id(&self.id) {
                    return Ok(Value::Service(resolver.self_handle()));
                }
                resolver.get(&self.id).map(Value::Service)
            }
            // set but non-UTF-8 values are kept, lossily decoded
            ReferenceKind::Env => Ok(std::env::var_os(&self.id)
                .map(|value| Value::string(value.to_string_lossy()))
                .unwrap_or_default()),
            ReferenceKind::Parameter => Ok(Value::from_scalar(resolver.get_parameter(&self.id))),
            ReferenceKind::Option => Ok(Value::from_scalar(resolver.get_option(&self.id))),
            ReferenceKind::SelfRef => Ok(Value::Service(resolver.self_handle())),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReferenceKind::Definition => write!(f, "@{}", self.id),
            ReferenceKind::Env => write!(f, "env({})", self.id),
            ReferenceKind::Parameter => write!(f, "%{}%", self.id),
            ReferenceKind::Option => write!(f, "option({})", self.id),
            ReferenceKind::SelfRef => f.write_str("@registry"),
        }
    }
}
