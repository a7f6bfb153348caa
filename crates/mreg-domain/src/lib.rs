//! # Domain Layer
//!
//! Core types of the registry: blueprints, references and the values they
//! resolve to. Nothing here performs resolution on its own; the engine in
//! `mreg-infrastructure` drives it through the [`ServiceResolver`] port.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | `Definition` and `Reference` |
//! | [`value_objects`] | `Value`, `Service`, `Arguments` |
//! | [`ports`] | `ServiceResolver` and the `SERVICE_TYPES` catalog |
//! | [`error`] | Error taxonomy |
//! | [`constants`] | Reserved ids |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::{Definition, Reference, ReferenceKind};
pub use error::{CycleKind, Error, Result};
pub use ports::{
    ConstructFn, SERVICE_TYPES, ServiceResolver, TypeEntry, find_type, is_constructible,
    list_types,
};
pub use value_objects::{Arguments, Service, Value, same_service};
