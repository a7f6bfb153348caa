//! Registry resolution engine
//!
//! Owns the definition table, the instance cache, parameters and options,
//! and resolves ids to services on demand:
//!
//! ```text
//! get(id)
//!   ├── reserved id?          → handle to this registry
//!   ├── cached Resolved?      → cached service
//!   ├── cached Pending?       → run factory once, cache, return
//!   ├── definition?           → merge parent args, check cycles,
//!   │                           resolve args, construct, cache, return
//!   └── otherwise             → NotFound
//! ```
//!
//! `Registry` is a cheap-clone handle; clones share the same tables. No lock
//! is held while a constructor or factory runs, so both may call back into
//! the registry they receive.

use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexMap;
use mreg_domain::{
    Arguments, Definition, Error, Reference, Result, Service, ServiceResolver, find_type,
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::cycle::check_circular;
use super::slot::{Factory, Slot};
use crate::config::RegistryConfig;

#[derive(Default)]
struct RegistryState {
    /// Blueprints in insertion order
    definitions: IndexMap<String, Definition>,
    /// Resolved or pre-seeded values
    instances: HashMap<String, Slot>,
    compiled: bool,
}

struct RegistryInner {
    reserved_ids: Vec<String>,
    max_resolution_depth: usize,
    state: RwLock<RegistryState>,
    parameters: DashMap<String, serde_json::Value>,
    options: DashMap<String, serde_json::Value>,
}

/// Dependency-injection registry
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Create a registry with the default reserved ids and depth limit
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Create a registry from configuration, seeding parameters and options
    pub fn with_config(config: &RegistryConfig) -> Self {
        let inner = RegistryInner {
            reserved_ids: config.reserved_ids.clone(),
            max_resolution_depth: config.max_resolution_depth,
            state: RwLock::new(RegistryState::default()),
            parameters: config
                .parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            options: config
                .options
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Create a registry pre-seeded with built services
    pub fn with_instances<I, S>(instances: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Service)>,
        S: Into<String>,
    {
        let registry = Self::new();
        for (id, service) in instances {
            registry.add_instance(id, service)?;
        }
        Ok(registry)
    }

    // ------------------------------------------------------------------
    // Population
    // ------------------------------------------------------------------

    /// Register a definition
    pub fn add(&self, definition: Definition) -> Result<()> {
        let id = definition.id().to_string();
        self.check_container_id(&id, definition.type_name())?;

        let mut state = self.inner.state.write();
        if state.definitions.contains_key(&id) || state.instances.contains_key(&id) {
            warn!(id = %id, "Rejected duplicate definition");
            return Err(Error::already_exists(id));
        }
        debug!(id = %id, type_name = definition.type_name(), "Registered definition");
        state.definitions.insert(id, definition);
        Ok(())
    }

    /// Register a built service under `id`
    ///
    /// The registry itself is refused by identity, whatever the id.
    pub fn add_instance<S: Into<String>>(&self, id: S, service: Service) -> Result<()> {
        let id = id.into();
        self.check_container_id(&id, "instance")?;
        if self.is_self(&service) {
            warn!(id = %id, "Rejected registry as its own instance");
            return Err(Error::registry_instance(&id));
        }
        self.insert_slot(id, Slot::Resolved(service))
    }

    /// Register a factory run on the first `get(id)`, with this registry as argument
    pub fn add_factory<S, F>(&self, id: S, factory: F) -> Result<()>
    where
        S: Into<String>,
        F: Fn(&Registry) -> Result<Service> + Send + Sync + 'static,
    {
        let id = id.into();
        self.check_container_id(&id, "factory")?;
        let factory: Factory = Arc::new(factory);
        self.insert_slot(id, Slot::Pending(factory))
    }

    /// Set a named parameter
    pub fn set_parameter<S: Into<String>>(&self, name: S, value: serde_json::Value) {
        self.inner.parameters.insert(name.into(), value);
    }

    /// Named parameter, or `default` when unset
    pub fn get_parameter_or(&self, name: &str, default: serde_json::Value) -> serde_json::Value {
        self.get_parameter(name).unwrap_or(default)
    }

    /// Set a named option
    pub fn add_option<S: Into<String>>(&self, name: S, value: serde_json::Value) {
        self.inner.options.insert(name.into(), value);
    }

    /// Named option, or `default` when unset
    pub fn get_option_or(&self, name: &str, default: serde_json::Value) -> serde_json::Value {
        self.get_option(name).unwrap_or(default)
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve `id` to a service, instantiating it on first use
    pub fn get(&self, id: &str) -> Result<Service> {
        self.resolve(id)
    }

    /// Whether `id` is cached, defined or reserved
    pub fn has(&self, id: &str) -> bool {
        if self.is_container_id(id) {
            return true;
        }
        let state = self.inner.state.read();
        state.instances.contains_key(id) || state.definitions.contains_key(id)
    }

    /// Named parameter; no resolution recursion
    pub fn get_parameter(&self, name: &str) -> Option<serde_json::Value> {
        self.inner.parameters.get(name).map(|v| v.value().clone())
    }

    /// Named option; no resolution recursion
    pub fn get_option(&self, name: &str) -> Option<serde_json::Value> {
        self.inner.options.get(name).map(|v| v.value().clone())
    }

    /// Whether `id` is one of the names meaning "this registry"
    pub fn is_container_id(&self, id: &str) -> bool {
        self.inner.reserved_ids.iter().any(|reserved| reserved == id)
    }

    /// This registry as a service, downcastable to `Registry`
    pub fn handle(&self) -> Service {
        Arc::new(self.clone())
    }

    /// Resolve `id` and downcast it to `T`
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.resolve(id)?.downcast::<T>().map_err(|_| {
            Error::invalid_argument(format!(
                "Instance \"{id}\" is not a {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Instantiate every definition not yet cached, in insertion order
    ///
    /// Idempotent: once a compile succeeded, later calls return immediately.
    pub fn compile(&self) -> Result<()> {
        let ids: Vec<String> = {
            let state = self.inner.state.read();
            if state.compiled {
                return Ok(());
            }
            state.definitions.keys().cloned().collect()
        };

        let mut instantiated = 0usize;
        for id in &ids {
            if self.is_cached(id) {
                continue;
            }
            self.resolve(id)?;
            instantiated += 1;
        }

        self.inner.state.write().compiled = true;
        info!(
            definitions = ids.len(),
            instantiated, "Registry compiled"
        );
        Ok(())
    }

    fn resolve(&self, id: &str) -> Result<Service> {
        if self.is_container_id(id) {
            return Ok(self.handle());
        }

        let _guard = DepthGuard::enter(self, id)?;

        let (slot, definition) = {
            let state = self.inner.state.read();
            (
                state.instances.get(id).cloned(),
                state.definitions.get(id).cloned(),
            )
        };

        match slot {
            Some(Slot::Resolved(service)) => {
                debug!(id = %id, "Instance cache hit");
                return Ok(service);
            }
            Some(Slot::Pending(factory)) => {
                debug!(id = %id, "Running deferred factory");
                let service = factory(self)?;
                return Ok(self.store(id, service));
            }
            None => {}
        }

        match definition {
            Some(definition) => self.instantiate(&definition),
            None => Err(Error::not_found(id)),
        }
    }

    fn instantiate(&self, definition: &Definition) -> Result<Service> {
        let id = definition.id();
        let arguments = self.merged_arguments(definition)?;

        let mut resolved = Arguments::with_capacity(arguments.len());
        for (name, reference) in &arguments {
            {
                let state = self.inner.state.read();
                check_circular(&state.definitions, definition, reference)?;
            }
            resolved.insert(name.clone(), reference.load(self)?);
        }

        let entry = find_type(definition.type_name()).ok_or_else(|| {
            Error::invalid_definition(format!(
                "Type \"{}\" does not exist",
                definition.type_name()
            ))
        })?;
        let service = (entry.construct)(resolved)?;

        debug!(
            id = %id,
            type_name = definition.type_name(),
            arguments = arguments.len(),
            "Instantiated definition"
        );
        Ok(self.store(id, service))
    }

    /// Child arguments plus the parent's arguments the child does not declare
    fn merged_arguments(&self, definition: &Definition) -> Result<IndexMap<String, Reference>> {
        let Some(parent_id) = definition.parent_id() else {
            return Ok(definition.arguments().clone());
        };
        let state = self.inner.state.read();
        let parent = state
            .definitions
            .get(parent_id)
            .ok_or_else(|| Error::parent_not_found(parent_id, definition.type_name()))?;
        Ok(definition.merged_arguments(Some(parent)))
    }

    /// Single mutation point of the instance cache
    ///
    /// If a nested resolution already produced a value for `id`, that value
    /// wins so every caller observes the same service.
    fn store(&self, id: &str, service: Service) -> Service {
        let mut state = self.inner.state.write();
        if let Some(Slot::Resolved(existing)) = state.instances.get(id) {
            return Arc::clone(existing);
        }
        state
            .instances
            .insert(id.to_string(), Slot::Resolved(Arc::clone(&service)));
        service
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Whether the last `compile` completed
    pub fn is_compiled(&self) -> bool {
        self.inner.state.read().compiled
    }

    /// Registered definitions in insertion order
    pub fn definitions(&self) -> Vec<Definition> {
        self.inner.state.read().definitions.values().cloned().collect()
    }

    /// Definition registered as `id`
    pub fn definition(&self, id: &str) -> Option<Definition> {
        self.inner.state.read().definitions.get(id).cloned()
    }

    /// Ids present in the instance cache, resolved or pending
    pub fn instance_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.state.read().instances.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Whether `id` holds a materialized value
    pub fn is_cached(&self, id: &str) -> bool {
        self.inner
            .state
            .read()
            .instances
            .get(id)
            .is_some_and(Slot::is_resolved)
    }

    /// Names meaning "this registry"
    pub fn reserved_ids(&self) -> &[String] {
        &self.inner.reserved_ids
    }

    /// Whether two handles share the same tables
    pub fn same_registry(&self, other: &Registry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn is_self(&self, service: &Service) -> bool {
        (**service)
            .downcast_ref::<Registry>()
            .is_some_and(|other| self.same_registry(other))
    }

    fn check_container_id(&self, id: &str, type_name: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::invalid_definition(format!(
                "Empty id for \"{type_name}\""
            )));
        }
        if self.is_container_id(id) {
            warn!(id = %id, type_name = %type_name, "Rejected reserved id");
            return Err(Error::reserved_id(id, &self.inner.reserved_ids));
        }
        Ok(())
    }

    fn insert_slot(&self, id: String, slot: Slot) -> Result<()> {
        let mut state = self.inner.state.write();
        if state.definitions.contains_key(&id) || state.instances.contains_key(&id) {
            warn!(id = %id, "Rejected duplicate instance");
            return Err(Error::already_exists(id));
        }
        debug!(id = %id, slot = ?slot, "Registered instance");
        state.instances.insert(id, slot);
        Ok(())
    }
}

impl ServiceResolver for Registry {
    fn get(&self, id: &str) -> Result<Service> {
        Registry::get(self, id)
    }

    fn has(&self, id: &str) -> bool {
        Registry::has(self, id)
    }

    fn get_parameter(&self, name: &str) -> Option<serde_json::Value> {
        Registry::get_parameter(self, name)
    }

    fn get_option(&self, name: &str) -> Option<serde_json::Value> {
        Registry::get_option(self, name)
    }

    fn is_container_id(&self, id: &str) -> bool {
        Registry::is_container_id(self, id)
    }

    fn self_handle(&self) -> Service {
        self.handle()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Registry")
            .field("definitions", &state.definitions.keys().collect::<Vec<_>>())
            .field("instances", &state.instances.len())
            .field("compiled", &state.compiled)
            .finish_non_exhaustive()
    }
}

thread_local! {
    /// Nested `get` calls on the current thread, across all registries
    static RESOLUTION_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Bounds nested `get` calls so a runaway factory or definition chain
/// fails instead of overflowing the stack
///
/// The count follows one resolution chain, which always runs on a single
/// thread; concurrent lookups on other threads never add to it.
struct DepthGuard;

impl DepthGuard {
    fn enter(registry: &Registry, id: &str) -> Result<Self> {
        let limit = registry.inner.max_resolution_depth;
        RESOLUTION_DEPTH.with(|depth| {
            let current = depth.get();
            if current >= limit {
                return Err(Error::depth_exceeded(id, limit));
            }
            depth.set(current + 1);
            Ok(Self)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        RESOLUTION_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
