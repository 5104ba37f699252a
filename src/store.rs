//! A type-keyed collection of vectors with visitor broadcast.
//!
//! [`Store`] is a lighter alternative to [`Registry`](crate::Registry)
//! for values that never need to be combined per entity.
//! Each value type gets its own vector, created on first use,
//! and [`Store::apply`] hands every value of every type to one visitor.

use std::any::{self, Any, TypeId};
use std::fmt;

use indexmap::IndexMap;


/// A visitor accepting values of type `T`.
///
/// A [`Store<V>`] can only hold types that `V` knows how to visit.
pub trait Visit<T> {
    /// Visits one stored value.
    fn visit(&mut self, value: &mut T);
}

trait AnyStorage<V>: Send {
    fn apply(&mut self, visitor: &mut V);

    fn len(&self) -> usize;

    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Typed<T>(Vec<T>);

impl<V: Visit<T>, T: Send + 'static> AnyStorage<V> for Typed<T> {
    fn apply(&mut self, visitor: &mut V) {
        for value in &mut self.0 {
            visitor.visit(value);
        }
    }

    fn len(&self) -> usize { self.0.len() }

    fn type_name(&self) -> &'static str { any::type_name::<T>() }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Stores values of any type that the visitor `V` accepts.
pub struct Store<V> {
    storages: IndexMap<TypeId, Box<dyn AnyStorage<V>>>,
}

impl<V> Default for Store<V> {
    fn default() -> Self { Self { storages: IndexMap::new() } }
}

impl<V> fmt::Debug for Store<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.storages.values().map(|storage| (storage.type_name(), storage.len())))
            .finish()
    }
}

impl<V> Store<V> {
    /// Creates an empty store.
    pub fn new() -> Self { Self::default() }

    /// The vector of `T` values, created empty if `T` has not been stored before.
    ///
    /// The position of `T` in the visiting order of [`apply`](Self::apply)
    /// is fixed by the first call that mentions it.
    pub fn get_storage<T: Send + 'static>(&mut self) -> &mut Vec<T>
    where
        V: Visit<T>,
    {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Typed::<T>(Vec::new())));
        let typed = storage.as_any_mut().downcast_mut::<Typed<T>>().expect("TypeId mismatch");
        &mut typed.0
    }

    /// Appends a value and returns a reference to it.
    pub fn emplace_back<T: Send + 'static>(&mut self, value: T) -> &mut T
    where
        V: Visit<T>,
    {
        let storage = self.get_storage::<T>();
        storage.push(value);
        storage.last_mut().expect("just pushed")
    }

    /// The vector of `T` values, or `None` if `T` has never been stored.
    pub fn storage<T: 'static>(&self) -> Option<&Vec<T>> {
        let storage = self.storages.get(&TypeId::of::<T>())?;
        let typed = storage.as_any().downcast_ref::<Typed<T>>().expect("TypeId mismatch");
        Some(&typed.0)
    }

    /// Returns whether a vector for `T` exists.
    pub fn contains<T: 'static>(&self) -> bool { self.storages.contains_key(&TypeId::of::<T>()) }

    /// The number of value types with a vector.
    pub fn type_count(&self) -> usize { self.storages.len() }

    /// The total number of values across all types.
    pub fn object_count(&self) -> usize { self.storages.values().map(|storage| storage.len()).sum() }

    /// Visits every value, type by type in the order the types were first stored,
    /// and each type's values in insertion order.
    pub fn apply(&mut self, visitor: &mut V) {
        for storage in self.storages.values_mut() {
            storage.apply(visitor);
        }
    }

    /// Removes every value and forgets every type.
    pub fn clear(&mut self) { self.storages.clear(); }
}
