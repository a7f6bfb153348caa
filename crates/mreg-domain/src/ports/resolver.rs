//! Resolution port
//!
//! References never hold on to the registry; they receive it as a
//! `&dyn ServiceResolver` for the duration of one `load` call.

use crate::error::Result;
use crate::value_objects::Service;

/// Handle that references and factories resolve against
pub trait ServiceResolver: Send + Sync {
    /// Resolve `id` to a service, instantiating it on first use
    fn get(&self, id: &str) -> Result<Service>;

    /// Whether `id` is cached, defined or reserved
    fn has(&self, id: &str) -> bool;

    /// Named parameter lookup; no resolution recursion
    fn get_parameter(&self, name: &str) -> Option<serde_json::Value>;

    /// Named option lookup; no resolution recursion
    fn get_option(&self, name: &str) -> Option<serde_json::Value>;

    /// Whether `id` is one of the names meaning "the registry itself"
    fn is_container_id(&self, id: &str) -> bool;

    /// A handle to the registry itself, usable as a service
    fn self_handle(&self) -> Service;
}
