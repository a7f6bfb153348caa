//! Registry population, lookup and caching

use std::sync::Arc;

use mreg_domain::{CycleKind, Definition, Error, Reference, Service, same_service};
use mreg_infrastructure::Registry;
use serde_json::json;

use super::fixtures::{Node, RegistryAware, counted, counted_registry, node};

#[test]
fn test_unknown_id_is_not_found() {
    let registry = Registry::new();
    let err = registry.get("nope").unwrap_err();
    match err {
        Error::NotFound { id } => assert_eq!(id, "nope"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert!(!registry.has("nope"));
}

#[test]
fn test_single_instantiation() {
    let (registry, counter) = counted_registry();
    registry.add(counted("svc", &[])).unwrap();

    let first = registry.get("svc").unwrap();
    let second = registry.get("svc").unwrap();

    assert!(same_service(&first, &second));
    assert_eq!(counter.count(), 1);
    assert!(registry.is_cached("svc"));
}

#[test]
fn test_shared_dependency_is_built_once() {
    let (registry, counter) = counted_registry();
    registry.add(counted("db", &[])).unwrap();
    registry.add(counted("users", &[("db", "db")])).unwrap();
    registry.add(counted("orders", &[("db", "db")])).unwrap();
    registry
        .add(counted("app", &[("users", "users"), ("orders", "orders")]))
        .unwrap();

    registry.get("app").unwrap();
    assert_eq!(counter.count(), 4);

    let users = registry.get_as::<Node>("users").unwrap();
    let orders = registry.get_as::<Node>("orders").unwrap();
    let db_from_users = users.args.raw_service("db").unwrap();
    let db_from_orders = orders.args.raw_service("db").unwrap();
    assert!(same_service(&db_from_users, &db_from_orders));
}

#[test]
fn test_definition_id_defaults_to_type_name() {
    let registry = Registry::new();
    registry.add(Definition::new("infra.Node").unwrap()).unwrap();
    assert!(registry.has("infra.Node"));
    assert!(registry.get_as::<Node>("infra.Node").is_ok());
}

#[test]
fn test_duplicate_definition_is_rejected() {
    let registry = Registry::new();
    registry.add(node("a", &[])).unwrap();
    let err = registry.add(node("a", &[])).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { id } if id == "a"));
}

#[test]
fn test_definition_colliding_with_instance_is_rejected() {
    let registry = Registry::new();
    let service: Service = Arc::new(42u32);
    registry.add_instance("a", service).unwrap();
    assert!(matches!(
        registry.add(node("a", &[])),
        Err(Error::AlreadyExists { .. })
    ));
}

#[test]
fn test_instance_colliding_with_definition_is_rejected() {
    let registry = Registry::new();
    registry.add(node("a", &[])).unwrap();
    let service: Service = Arc::new(42u32);
    assert!(matches!(
        registry.add_instance("a", service),
        Err(Error::AlreadyExists { .. })
    ));
}

#[test]
fn test_reserved_ids_are_rejected() {
    let registry = Registry::new();
    for reserved in ["registry", "container", "service_container"] {
        let err = registry.add(node(reserved, &[])).unwrap_err();
        assert!(matches!(err, Error::ReservedId { ref id, .. } if id == reserved));

        let service: Service = Arc::new(1u8);
        assert!(matches!(
            registry.add_instance(reserved, service),
            Err(Error::ReservedId { .. })
        ));
    }
}

#[test]
fn test_reserved_id_resolves_to_registry_itself() {
    let registry = Registry::new();
    assert!(registry.has("container"));
    assert!(registry.is_container_id("service_container"));
    assert!(!registry.is_container_id("mailer"));

    let handle = registry.get_as::<Registry>("container").unwrap();
    assert!(handle.same_registry(&registry));
}

#[test]
fn test_registry_is_refused_as_its_own_instance() {
    let registry = Registry::new();
    let itself: Service = Arc::new(registry.clone());
    let err = registry.add_instance("me", itself).unwrap_err();
    assert_eq!(err.cycle_kind(), Some(CycleKind::RegistryInstance));
    assert!(!registry.has("me"));
}

#[test]
fn test_other_registry_is_accepted_as_instance() {
    let registry = Registry::new();
    let other: Service = Arc::new(Registry::new());
    registry.add_instance("other", other).unwrap();
    assert!(registry.get_as::<Registry>("other").is_ok());
}

#[test]
fn test_with_instances_seeds_cache() {
    let service: Service = Arc::new(String::from("hello"));
    let registry = Registry::with_instances([("greeting", Arc::clone(&service))]).unwrap();
    let resolved = registry.get("greeting").unwrap();
    assert!(same_service(&resolved, &service));
    assert_eq!(registry.instance_ids(), ["greeting"]);
}

#[test]
fn test_with_instances_rejects_reserved_id() {
    let service: Service = Arc::new(0u8);
    assert!(Registry::with_instances([("registry", service)]).is_err());
}

#[test]
fn test_container_argument_receives_registry_handle() {
    let registry = Registry::new();
    registry
        .add(
            Definition::with_id("infra.RegistryAware", "aware")
                .unwrap()
                .argument("container", Reference::service("container").unwrap())
                .unwrap(),
        )
        .unwrap();

    let aware = registry.get_as::<RegistryAware>("aware").unwrap();
    assert!(aware.registry.same_registry(&registry));
    assert!(aware.registry.has("aware"));
}

#[test]
fn test_failed_construction_caches_nothing() {
    let registry = Registry::new();
    registry
        .add(Definition::with_id("infra.Failing", "broken").unwrap())
        .unwrap();

    assert!(registry.get("broken").is_err());
    assert!(!registry.is_cached("broken"));
    assert!(registry.get("broken").is_err());
}

#[test]
fn test_failed_dependency_aborts_whole_get() {
    let (registry, counter) = counted_registry();
    registry.add(counted("ok", &[])).unwrap();
    registry
        .add(counted("top", &[("ok", "ok"), ("missing", "ghost")]))
        .unwrap();

    let err = registry.get("top").unwrap_err();
    assert!(matches!(err, Error::NotFound { ref id } if id == "ghost"));
    assert!(!registry.is_cached("top"));
    // the dependency that did resolve stays cached
    assert!(registry.is_cached("ok"));
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_get_as_wrong_type() {
    let registry = Registry::new();
    registry.add(node("a", &[])).unwrap();
    let err = registry.get_as::<RegistryAware>("a").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_parameters_and_options() {
    let registry = Registry::new();
    registry.set_parameter("retries", json!(3));
    registry.add_option("verbose", json!(true));

    assert_eq!(registry.get_parameter("retries"), Some(json!(3)));
    assert_eq!(registry.get_parameter("missing"), None);
    assert_eq!(registry.get_parameter_or("missing", json!(1)), json!(1));
    assert_eq!(registry.get_option("verbose"), Some(json!(true)));
    assert_eq!(registry.get_option_or("missing", json!("x")), json!("x"));
    // parameters and options are separate stores
    assert_eq!(registry.get_option("retries"), None);
}

#[test]
fn test_definitions_inspection_keeps_insertion_order() {
    let registry = Registry::new();
    registry.add(node("c", &[])).unwrap();
    registry.add(node("a", &[])).unwrap();
    registry.add(node("b", &[])).unwrap();

    let ids: Vec<String> = registry
        .definitions()
        .iter()
        .map(|d| d.id().to_string())
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert_eq!(registry.definition("a").unwrap().type_name(), "infra.Node");
    assert!(registry.definition("zzz").is_none());
}

#[test]
fn test_definition_stays_inspectable_after_instantiation() {
    let registry = Registry::new();
    registry.add(node("a", &[])).unwrap();
    registry.get("a").unwrap();
    assert!(registry.definition("a").is_some());
    assert!(registry.is_cached("a"));
}

#[test]
fn test_clones_share_tables() {
    let registry = Registry::new();
    let clone = registry.clone();
    clone.add(node("a", &[])).unwrap();
    assert!(registry.has("a"));
    assert!(clone.same_registry(&registry));
    assert!(!Registry::new().same_registry(&registry));
}
