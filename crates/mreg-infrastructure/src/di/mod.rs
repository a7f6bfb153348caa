//! Dependency Injection Engine
//!
//! ```text
//! bootstrap (config) ──► Registry ◄── add / add_instance / add_factory
//!                           │
//!                           ├── slot      instance cache entries (Pending | Resolved)
//!                           └── cycle     declared-graph cycle walk
//! ```

pub mod bootstrap;
mod cycle;
pub mod registry;
mod slot;

pub use bootstrap::{bootstrap, build_registry};
pub use registry::Registry;
pub use slot::Factory;
