//! Catalog entries and helpers shared by the registry tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mreg_domain::{
    Arguments, Definition, Error, Reference, Result, SERVICE_TYPES, Service, TypeEntry,
};
use mreg_infrastructure::Registry;

/// Per-test construction counter, injected as the `counter` argument
#[derive(Debug, Default)]
pub struct BuildCounter(AtomicUsize);

impl BuildCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Object that keeps whatever arguments it was built with
#[derive(Debug)]
pub struct Node {
    pub args: Arguments,
    /// Position in the build sequence of its counter; 0 when uncounted
    pub order: usize,
}

/// Object holding a handle to the registry that built it
#[derive(Debug)]
pub struct RegistryAware {
    pub registry: Arc<Registry>,
}

fn construct_node(args: Arguments) -> Result<Service> {
    Ok(Arc::new(Node { args, order: 0 }))
}

fn construct_counted(args: Arguments) -> Result<Service> {
    let order = args
        .service::<BuildCounter>("counter")?
        .0
        .fetch_add(1, Ordering::SeqCst)
        + 1;
    Ok(Arc::new(Node { args, order }))
}

fn construct_failing(_args: Arguments) -> Result<Service> {
    Err(Error::invalid_argument("constructor refused"))
}

fn construct_flaky(args: Arguments) -> Result<Service> {
    if args.get("ready").is_none_or(|ready| ready.is_absent()) {
        return Err(Error::invalid_argument("not ready"));
    }
    construct_counted(args)
}

fn construct_registry_aware(args: Arguments) -> Result<Service> {
    Ok(Arc::new(RegistryAware {
        registry: args.service::<Registry>("container")?,
    }))
}

#[linkme::distributed_slice(SERVICE_TYPES)]
static NODE: TypeEntry = TypeEntry {
    name: "infra.Node",
    description: "Keeps its arguments",
    construct: construct_node,
};

#[linkme::distributed_slice(SERVICE_TYPES)]
static COUNTED: TypeEntry = TypeEntry {
    name: "infra.Counted",
    description: "Counts its constructions",
    construct: construct_counted,
};

#[linkme::distributed_slice(SERVICE_TYPES)]
static FAILING: TypeEntry = TypeEntry {
    name: "infra.Failing",
    description: "Always fails to construct",
    construct: construct_failing,
};

#[linkme::distributed_slice(SERVICE_TYPES)]
static FLAKY: TypeEntry = TypeEntry {
    name: "infra.Flaky",
    description: "Fails until its `ready` argument is set",
    construct: construct_flaky,
};

#[linkme::distributed_slice(SERVICE_TYPES)]
static REGISTRY_AWARE: TypeEntry = TypeEntry {
    name: "infra.RegistryAware",
    description: "Receives the registry as `container`",
    construct: construct_registry_aware,
};

/// Registry with a fresh counter pre-seeded under `counter`
pub fn counted_registry() -> (Registry, Arc<BuildCounter>) {
    let registry = Registry::new();
    let counter = Arc::new(BuildCounter::default());
    let service: Service = counter.clone();
    registry.add_instance("counter", service).unwrap();
    (registry, counter)
}

/// `infra.Node` definition under `id` with service references `deps`
pub fn node(id: &str, deps: &[(&str, &str)]) -> Definition {
    deps.iter().fold(
        Definition::with_id("infra.Node", id).unwrap(),
        |definition, (name, target)| {
            definition
                .argument(*name, Reference::service(*target).unwrap())
                .unwrap()
        },
    )
}

/// `infra.Counted` definition under `id` with service references `deps`
pub fn counted(id: &str, deps: &[(&str, &str)]) -> Definition {
    deps.iter().fold(
        Definition::with_id("infra.Counted", id)
            .unwrap()
            .argument("counter", Reference::service("counter").unwrap())
            .unwrap(),
        |definition, (name, target)| {
            definition
                .argument(*name, Reference::service(*target).unwrap())
                .unwrap()
        },
    )
}
