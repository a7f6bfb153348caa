//! # mreg
//!
//! A declarative dependency-injection registry. Objects are described by
//! [`Definition`]s whose constructor arguments are [`Reference`]s to other
//! definitions, environment variables, parameters, options or the registry
//! itself. The [`Registry`] resolves the graph on demand, constructs each
//! object at most once and rejects cycles before they recurse.
//!
//! ## Example
//!
//! ```ignore
//! use mreg::{Container, Definition, Reference, Registry};
//!
//! let registry = Registry::new();
//! registry.add(Definition::with_id("SmtpTransport", "smtp")?
//!     .argument("host", Reference::env("SMTP_HOST")?)?)?;
//! registry.add(Definition::new("Mailer")?
//!     .argument("transport", Reference::service("smtp")?)?)?;
//!
//! let container = Container::new(registry);
//! let mailer = container.get_as::<Mailer>("Mailer")?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - definitions, references, values, error taxonomy, type catalog
//! - `infrastructure` - resolution engine, configuration, logging
//! - [`Container`] - public lookup facade

pub mod container;
pub mod error;

/// Domain layer - definitions, references and the type catalog
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use mreg_domain::*;
}

/// Infrastructure layer - registry engine, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use mreg_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use container::Container;
pub use error::ContainerError;
pub use infrastructure::Registry;
