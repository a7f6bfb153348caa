//! Registry entities
//!
//! - [`Reference`]: where one constructor argument comes from
//! - [`Definition`]: inert blueprint for one object

pub mod definition;
pub mod reference;

pub use definition::Definition;
pub use reference::{Reference, ReferenceKind};
