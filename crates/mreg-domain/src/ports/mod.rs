//! Domain ports
//!
//! - [`resolver`]: the read/write handle references resolve against
//! - [`types`]: compile-time catalog of constructible target types

pub mod resolver;
pub mod types;

pub use resolver::ServiceResolver;
pub use types::{
    ConstructFn, SERVICE_TYPES, TypeEntry, find_type, is_constructible, list_types,
};
