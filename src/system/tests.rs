use std::sync::Arc;

use parking_lot::Mutex;

use super::System;
use crate::entity::{Entity, Generation, Record};
use crate::test_util::{Comp1, TestSchema};

fn entity(raw: u32) -> Entity<TestSchema> { Entity::new(raw, Generation::default()) }

#[test]
fn test_register_get_unregister() {
    let mut system = System::<TestSchema, Comp1>::default();
    let mut record = Record::new();

    let value = system.register_entity(entity(3), &mut record, Comp1(10));
    value.0 += 1;
    assert_eq!(system.len(), 1);
    assert_eq!(system.get(&record), Some(&Comp1(11)));

    system.get_mut(&record).expect("registered").0 += 1;
    assert_eq!(system.unregister_entity(entity(3), &mut record), Some(Comp1(12)));
    assert!(!record.is_registered_to::<Comp1>());
    assert_eq!(system.get(&record), None);
    assert_eq!(system.unregister_entity(entity(3), &mut record), None);
    assert!(system.is_empty());
}

#[test]
fn test_iter_yields_owners() {
    let mut system = System::<TestSchema, Comp1>::default();
    let mut records: Vec<_> = (0..4).map(|_| Record::new()).collect();
    for (i, record) in records.iter_mut().enumerate() {
        system.register_entity(entity(i as u32), record, Comp1(i as i32 * 2));
    }
    system.unregister_entity(entity(1), &mut records[1]);

    for (owner, value) in system.iter_mut() {
        assert_eq!(value.0, owner.id() as i32 * 2);
        value.0 = -value.0;
    }

    let mut owners: Vec<_> = system.owners().map(Entity::id).collect();
    owners.sort_unstable();
    assert_eq!(owners, vec![0, 2, 3]);
    assert_eq!(system.values().map(|value| value.0).sum::<i32>(), -10);
    assert_eq!(system.get(&records[3]), Some(&Comp1(-6)));
}

#[test]
fn test_register_callback_sees_stored_component() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut system = System::<TestSchema, Comp1>::default();
    let handle = system.attach_on_register({
        let seen = Arc::clone(&seen);
        move |owner, value: &mut Comp1| {
            seen.lock().push((owner.id(), value.0));
            value.0 += 100;
        }
    });

    let mut record = Record::new();
    let value = system.register_entity(entity(0), &mut record, Comp1(1));
    assert_eq!(value.0, 101);
    assert_eq!(*seen.lock(), vec![(0, 1)]);

    assert!(system.detach_on_register(handle));
    assert!(!system.detach_on_register(handle));

    let mut other = Record::new();
    system.register_entity(entity(1), &mut other, Comp1(2));
    assert_eq!(*seen.lock(), vec![(0, 1)]);
    assert_eq!(system.callback_count(), (0, 0));
}

#[test]
fn test_unregister_callback_runs_before_removal() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut system = System::<TestSchema, Comp1>::default();
    system.attach_on_unregister({
        let seen = Arc::clone(&seen);
        move |owner, value: &mut Comp1| {
            seen.lock().push((owner.id(), value.0));
            value.0 = 42;
        }
    });

    let mut record = Record::new();
    system.register_entity(entity(5), &mut record, Comp1(7));
    assert!(seen.lock().is_empty());

    assert_eq!(system.unregister_entity(entity(5), &mut record), Some(Comp1(42)));
    assert_eq!(*seen.lock(), vec![(5, 7)]);
}

#[test]
fn test_callbacks_fire_in_attach_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut system = System::<TestSchema, Comp1>::default();
    for tag in ["first", "second", "third"] {
        let seen = Arc::clone(&seen);
        system.attach_on_register(move |_, _: &mut Comp1| seen.lock().push(tag));
    }

    let mut record = Record::new();
    system.register_entity(entity(0), &mut record, Comp1(0));
    assert_eq!(*seen.lock(), vec!["first", "second", "third"]);
}
