//! Constructible type catalog
//!
//! Target types register themselves at compile time with `linkme` and are
//! looked up by name when a definition is created and when it is
//! instantiated.
//!
//! ```text
//! 1. Type defines:     #[linkme::distributed_slice(SERVICE_TYPES)]
//!                      static ENTRY: TypeEntry = ...
//! 2. Catalog declares: #[linkme::distributed_slice]
//!                      pub static SERVICE_TYPES: [TypeEntry] = [..]
//! 3. Definition::new("Mailer") checks is_constructible("Mailer")
//! 4. Registry::get calls (entry.construct)(arguments)
//! ```
//!
//! ## Registering a type
//!
//! ```ignore
//! use mreg_domain::{Arguments, Result, Service, SERVICE_TYPES, TypeEntry};
//!
//! fn construct_mailer(args: Arguments) -> Result<Service> {
//!     Ok(Arc::new(Mailer::new(args.service::<Transport>("transport")?)))
//! }
//!
//! #[linkme::distributed_slice(SERVICE_TYPES)]
//! static MAILER: TypeEntry = TypeEntry {
//!     name: "Mailer",
//!     description: "Outgoing mail sender",
//!     construct: construct_mailer,
//! };
//! ```

use crate::error::Result;
use crate::value_objects::{Arguments, Service};

/// Constructor invoked with resolved arguments in declared order
pub type ConstructFn = fn(Arguments) -> Result<Service>;

/// Catalog entry for one constructible type
pub struct TypeEntry {
    /// Type name used by definitions
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Constructor
    pub construct: ConstructFn,
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - types submit entries at compile time
#[linkme::distributed_slice]
pub static SERVICE_TYPES: [TypeEntry] = [..];

/// Find the catalog entry for `name`
pub fn find_type(name: &str) -> Option<&'static TypeEntry> {
    SERVICE_TYPES.iter().find(|entry| entry.name == name)
}

/// Whether `name` can be constructed
pub fn is_constructible(name: &str) -> bool {
    find_type(name).is_some()
}

/// All registered types as (name, description) pairs
pub fn list_types() -> Vec<(&'static str, &'static str)> {
    SERVICE_TYPES
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
