//! # Infrastructure Layer
//!
//! The resolution engine and the cross-cutting concerns around it.
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | `Registry`: instance cache, cycle detection, inheritance, lazy factories |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (TOML + environment) |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use di::{Factory, Registry, bootstrap, build_registry};
pub use error_ext::ErrorContext;
