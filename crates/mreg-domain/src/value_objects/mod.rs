//! Value objects flowing through resolution
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Service`] | Shared handle to a constructed object |
//! | [`Value`] | What a single reference resolves to |
//! | [`Arguments`] | Ordered resolved constructor arguments |

pub mod arguments;
pub mod value;

pub use arguments::Arguments;
pub use value::{Service, Value, same_service};
