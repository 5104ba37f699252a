use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Builder, QueryStrategy, Registry};
use crate::bits::Mask;
use crate::error::Error;
use crate::test_util::{self, Comp1, Comp2, Comp3, TestSchema};

static_assertions::assert_impl_all!(Registry<TestSchema>: Send);

#[test]
fn test_register_then_get() {
    test_util::init();

    let mut registry = Registry::<TestSchema>::new();
    let entity = registry.create_entity();

    let value = registry.register_to_system(entity, Comp1(5)).expect("entity is alive");
    value.0 += 1;
    assert_eq!(registry.get_component::<Comp1>(entity), Ok(&Comp1(6)));
    assert!(registry.is_registered_to::<Comp1>(entity));
    assert!(!registry.is_registered_to::<Comp2>(entity));

    registry.get_component_mut::<Comp1>(entity).expect("registered").0 *= 2;
    assert_eq!(registry.get_component::<Comp1>(entity), Ok(&Comp1(12)));
}

#[test]
fn test_unregister_then_get_fails() {
    test_util::init();

    let mut registry = Registry::<TestSchema>::new();
    let entity = registry.create_entity();
    registry.register_to_system(entity, Comp3("hello".into())).expect("entity is alive");

    assert_eq!(registry.unregister_from_system::<Comp3>(entity), Ok(Comp3("hello".into())));
    assert!(!registry.is_registered_to::<Comp3>(entity));
    assert_eq!(
        registry.get_component::<Comp3>(entity),
        Err(Error::NotRegistered { entity: entity.id(), component: "Comp3" })
    );
    assert_eq!(
        registry.unregister_from_system::<Comp3>(entity),
        Err(Error::NotRegistered { entity: entity.id(), component: "Comp3" })
    );
}

#[test]
fn test_register_twice_fails() {
    let mut registry = Registry::<TestSchema>::new();
    let entity = registry.create_entity();
    registry.register_to_system(entity, Comp2(1)).expect("entity is alive");

    assert_eq!(
        registry.register_to_system(entity, Comp2(2)).map(|value| value.0),
        Err(Error::AlreadyRegistered { entity: entity.id(), component: "Comp2" })
    );
    assert_eq!(registry.get_component::<Comp2>(entity), Ok(&Comp2(1)));
}

#[test]
fn test_destroy_unregisters_everything() {
    test_util::init();

    let unregistered = Arc::new(Mutex::new(Vec::new()));

    let mut registry = Registry::<TestSchema>::new();
    registry.attach_on_unregister_callback::<Comp1>({
        let unregistered = Arc::clone(&unregistered);
        move |entity, value| unregistered.lock().push(format!("{}:Comp1({})", entity.id(), value.0))
    });
    registry.attach_on_unregister_callback::<Comp3>({
        let unregistered = Arc::clone(&unregistered);
        move |entity, value| unregistered.lock().push(format!("{}:Comp3({})", entity.id(), value.0))
    });

    let keep = registry.create_entity();
    let doomed = registry.create_entity();
    registry.register_to_system(keep, Comp1(1)).expect("alive");
    registry.register_to_system(doomed, Comp1(2)).expect("alive");
    registry.register_to_system(doomed, Comp3("x".into())).expect("alive");

    registry.destroy_entity(doomed).expect("alive");

    assert_eq!(*unregistered.lock(), vec!["1:Comp1(2)", "1:Comp3(x)"]);
    assert!(!registry.contains(doomed));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get_component::<Comp1>(doomed), Err(Error::OutOfRange { index: 1 }));
    assert!(!registry.is_registered_to::<Comp1>(doomed));
    assert_eq!(registry.system::<Comp1>().len(), 1);
    assert_eq!(registry.system::<Comp3>().len(), 0);
    assert_eq!(registry.get_component::<Comp1>(keep), Ok(&Comp1(1)));

    assert_eq!(registry.destroy_entity(doomed), Err(Error::OutOfRange { index: 1 }));
    assert_eq!(
        registry.register_to_system(doomed, Comp2(0)).map(|_| ()),
        Err(Error::OutOfRange { index: 1 })
    );
}

#[test]
fn test_destroyed_handle_is_recycled_clean() {
    let mut registry = Registry::<TestSchema>::new();
    let first = registry.create_entity();
    let second = registry.create_entity();
    registry.register_to_system(second, Comp2(9)).expect("alive");
    registry.destroy_entity(second).expect("alive");

    let recycled = registry.create_entity();
    assert_eq!(recycled.id(), second.id());
    assert_ne!(recycled, second);
    assert_ne!(recycled, first);
    assert!(!registry.is_registered_to::<Comp2>(recycled));
    assert!(registry.record(recycled).expect("alive").mask().is_empty());
    assert!(!registry.contains(second));
    assert!(registry.record(second).is_none());
}

#[test]
fn test_stale_handle_does_not_reach_new_occupant() {
    let mut registry = Registry::<TestSchema>::new();
    let _keep = registry.create_entity();
    let old = registry.create_entity();
    registry.register_to_system(old, Comp1(1)).expect("alive");
    registry.destroy_entity(old).expect("alive");

    let new = registry.create_entity();
    assert_eq!(new.id(), old.id());
    registry.register_to_system(new, Comp1(99)).expect("alive");

    let stale = Error::OutOfRange { index: old.id() };
    assert_eq!(registry.get_component::<Comp1>(old), Err(stale.clone()));
    assert_eq!(registry.get_component_mut::<Comp1>(old).err(), Some(stale.clone()));
    assert!(!registry.is_registered_to::<Comp1>(old));
    assert_eq!(registry.register_to_system(old, Comp2(0)).err(), Some(stale.clone()));
    assert_eq!(registry.unregister_from_system::<Comp1>(old), Err(stale.clone()));
    assert_eq!(registry.destroy_entity(old), Err(stale));

    assert_eq!(registry.get_component::<Comp1>(new), Ok(&Comp1(99)));
    assert!(!registry.is_registered_to::<Comp2>(new));
    assert_eq!(registry.entities().filter(|&entity| entity == new).count(), 1);
}

#[test]
fn test_stale_handle_after_indices_reset() {
    let mut registry = Registry::<TestSchema>::new();
    let a = registry.create_entity();
    let b = registry.create_entity();
    registry.register_to_system(b, Comp2(2)).expect("alive");
    registry.destroy_entity(a).expect("alive");
    registry.destroy_entity(b).expect("alive");
    assert!(registry.is_empty());

    let c = registry.create_entity();
    let d = registry.create_entity();
    registry.register_to_system(d, Comp2(4)).expect("alive");
    assert_eq!((c.id(), d.id()), (a.id(), b.id()));

    assert!(!registry.contains(a));
    assert_eq!(registry.get_component::<Comp2>(b), Err(Error::OutOfRange { index: b.id() }));
    assert_eq!(registry.get_component::<Comp2>(d), Ok(&Comp2(4)));

    let mut handles: Vec<_> = registry.entities().collect();
    handles.sort_unstable();
    assert_eq!(handles, vec![c, d]);
}

#[test]
fn test_panicking_register_callback_keeps_cache_consistent() {
    let mut registry = Registry::<TestSchema>::new();
    let entity = registry.create_entity();
    registry.register_to_system(entity, Comp1(1)).expect("alive");

    let handle = registry.attach_on_register_callback::<Comp2>(|_, _| panic!("rejected"));
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = registry.register_to_system(entity, Comp2(2));
    }));
    assert!(result.is_err());
    assert!(registry.detach_on_register_callback::<Comp2>(handle));

    assert!(registry.is_registered_to::<Comp2>(entity));
    assert_eq!(registry.query::<(Comp1, Comp2)>().collect::<Vec<_>>(), vec![entity]);
    assert_eq!(registry.cache.bucket_count(), 1);

    registry.destroy_entity(entity).expect("alive");
    assert_eq!(registry.cache.bucket_count(), 0);
    assert_eq!(registry.query::<(Comp1, Comp2)>().count(), 0);
}

#[test]
fn test_register_callback_fires_once_per_registration() {
    let count = Arc::new(Mutex::new(0));

    let mut registry = Registry::<TestSchema>::new();
    let handle = registry.attach_on_register_callback::<Comp2>({
        let count = Arc::clone(&count);
        move |_, _| *count.lock() += 1
    });

    let a = registry.create_entity();
    let b = registry.create_entity();
    registry.register_to_system(a, Comp2(0)).expect("alive");
    registry.register_to_system(b, Comp2(0)).expect("alive");
    registry.register_to_system(b, Comp1(0)).expect("alive");
    assert!(registry.register_to_system(b, Comp2(0)).is_err());
    assert_eq!(*count.lock(), 2);

    assert!(registry.detach_on_register_callback::<Comp2>(handle));
    registry.unregister_from_system::<Comp2>(a).expect("registered");
    registry.register_to_system(a, Comp2(0)).expect("alive");
    assert_eq!(*count.lock(), 2);
}

#[test]
fn test_detach_unregister_callback() {
    let count = Arc::new(Mutex::new(0));

    let mut registry = Registry::<TestSchema>::new();
    let handle = registry.attach_on_unregister_callback::<Comp1>({
        let count = Arc::clone(&count);
        move |_, _| *count.lock() += 1
    });

    let entity = registry.create_entity();
    registry.register_to_system(entity, Comp1(0)).expect("alive");
    registry.unregister_from_system::<Comp1>(entity).expect("registered");
    assert_eq!(*count.lock(), 1);

    assert!(registry.detach_on_unregister_callback::<Comp1>(handle));
    assert!(!registry.detach_on_unregister_callback::<Comp1>(handle));
    registry.register_to_system(entity, Comp1(0)).expect("alive");
    registry.destroy_entity(entity).expect("alive");
    assert_eq!(*count.lock(), 1);
}

#[test]
fn test_cache_tracks_signatures() {
    let mut registry = Registry::<TestSchema>::new();
    assert_eq!(registry.cache.bucket_count(), 0);

    let a = registry.create_entity();
    let b = registry.create_entity();
    assert_eq!(registry.cache.bucket_count(), 1);

    registry.register_to_system(a, Comp1(0)).expect("alive");
    assert_eq!(registry.cache.bucket_count(), 2);

    registry.register_to_system(b, Comp1(0)).expect("alive");
    assert_eq!(registry.cache.bucket_count(), 1);

    registry.destroy_entity(a).expect("alive");
    registry.destroy_entity(b).expect("alive");
    assert_eq!(registry.cache.bucket_count(), 0);
}

#[test]
fn test_each() {
    let mut registry = Registry::<TestSchema>::new();
    for i in 0..5 {
        let entity = registry.create_entity();
        if i % 2 == 0 {
            registry.register_to_system(entity, Comp1(i)).expect("alive");
        }
    }

    for (_, value) in registry.each_mut::<Comp1>() {
        value.0 += 10;
    }

    let mut pairs: Vec<_> = registry.each::<Comp1>().map(|(e, value)| (e.id(), value.0)).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 10), (2, 12), (4, 14)]);
    assert_eq!(registry.entities().count(), 5);
}

#[test]
fn test_builder() {
    test_util::init();

    let registry = Builder::new()
        .entity_capacity(64)
        .query_strategy(QueryStrategy::Scan)
        .build::<TestSchema>();
    assert_eq!(registry.query_strategy(), QueryStrategy::Scan);
    assert!(registry.is_empty());

    assert_eq!(Registry::<TestSchema>::default().query_strategy(), QueryStrategy::Cached);
}
