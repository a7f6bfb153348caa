//! Eager instantiation with `compile`

use mreg_domain::{Definition, Reference, same_service};
use mreg_infrastructure::Registry;
use serde_json::json;

use super::fixtures::{Node, counted, counted_registry};

#[test]
fn test_compile_builds_every_definition_once() {
    let (registry, counter) = counted_registry();
    registry.add(counted("a", &[("b", "b")])).unwrap();
    registry.add(counted("b", &[])).unwrap();
    registry.add(counted("c", &[("a", "a"), ("b", "b")])).unwrap();

    assert!(!registry.is_compiled());
    registry.compile().unwrap();

    assert!(registry.is_compiled());
    assert_eq!(counter.count(), 3);
    for id in ["a", "b", "c"] {
        assert!(registry.is_cached(id));
    }
}

#[test]
fn test_compile_follows_insertion_order() {
    let (registry, _counter) = counted_registry();
    for id in ["third", "first", "second"] {
        registry.add(counted(id, &[])).unwrap();
    }

    registry.compile().unwrap();

    let order: Vec<usize> = ["third", "first", "second"]
        .iter()
        .map(|id| registry.get_as::<Node>(id).unwrap().order)
        .collect();
    assert_eq!(order, [1, 2, 3]);
}

#[test]
fn test_compile_skips_cached_instances() {
    let (registry, counter) = counted_registry();
    registry.add(counted("a", &[])).unwrap();
    registry.add(counted("b", &[])).unwrap();

    let before = registry.get("a").unwrap();
    registry.compile().unwrap();

    assert_eq!(counter.count(), 2);
    assert!(same_service(&before, &registry.get("a").unwrap()));
}

#[test]
fn test_compile_is_idempotent() {
    let (registry, counter) = counted_registry();
    registry.add(counted("a", &[])).unwrap();

    registry.compile().unwrap();
    registry.compile().unwrap();
    assert_eq!(counter.count(), 1);

    // a compiled registry ignores later definitions until they are requested
    registry.add(counted("late", &[])).unwrap();
    registry.compile().unwrap();
    assert!(!registry.is_cached("late"));
    assert_eq!(counter.count(), 1);

    registry.get("late").unwrap();
    assert_eq!(counter.count(), 2);
}

#[test]
fn test_compile_on_empty_registry() {
    let registry = Registry::new();
    registry.compile().unwrap();
    assert!(registry.is_compiled());
}

#[test]
fn test_failed_compile_can_be_retried() {
    let (registry, counter) = counted_registry();
    registry.add(counted("first", &[])).unwrap();
    registry
        .add(
            Definition::with_id("infra.Flaky", "flaky")
                .unwrap()
                .argument("counter", Reference::service("counter").unwrap())
                .unwrap()
                .argument("ready", Reference::parameter("ready").unwrap())
                .unwrap(),
        )
        .unwrap();

    assert!(registry.compile().is_err());
    assert!(!registry.is_compiled());
    assert!(registry.is_cached("first"));
    assert!(!registry.is_cached("flaky"));

    registry.set_parameter("ready", json!(true));
    registry.compile().unwrap();

    assert!(registry.is_compiled());
    assert!(registry.is_cached("flaky"));
    assert_eq!(counter.count(), 2);
}

#[test]
fn test_compile_reports_cycles() {
    let registry = Registry::new();
    registry.add(super::fixtures::node("a", &[("b", "b")])).unwrap();
    registry.add(super::fixtures::node("b", &[("a", "a")])).unwrap();

    let err = registry.compile().unwrap_err();
    assert!(err.is_circular());
    assert!(!registry.is_compiled());
}
