//! Per-component-type storage.
//!
//! A [`System`] owns every instance of one component type in a [`SparseArray`].
//! Entities refer to their instance through the slot stored in their [`Record`],
//! so a lookup is a single indexed read.
//!
//! Each system also carries the callbacks fired when an entity is registered to it
//! or unregistered from it.
//! Register callbacks run after the component has been stored and the record updated,
//! so they observe the final state.
//! Unregister callbacks run before anything is removed,
//! so the component is still readable from them.

use std::{fmt, iter, slice};

use crate::entity::{Entity, Record};
use crate::schema::{Component, Schema};
use crate::sparse::SparseArray;

mod callback;
pub use callback::{Callback, CallbackHandle};

#[cfg(test)]
mod tests;

/// A stored component together with the entity that owns it.
struct Attached<S: Schema, C> {
    owner: Entity<S>,
    value: C,
}

/// The storage of component type `C` in schema `S`.
pub struct System<S: Schema, C> {
    storage:       SparseArray<Attached<S, C>, S::Index>,
    on_register:   callback::List<S, C>,
    on_unregister: callback::List<S, C>,
}

impl<S: Schema, C> Default for System<S, C> {
    fn default() -> Self {
        Self {
            storage:       SparseArray::new(),
            on_register:   callback::List::default(),
            on_unregister: callback::List::default(),
        }
    }
}

impl<S: Schema, C> fmt::Debug for System<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("component", &std::any::type_name::<C>())
            .field("len", &self.storage.len())
            .field("on_register", &self.on_register)
            .field("on_unregister", &self.on_unregister)
            .finish()
    }
}

impl<S: Schema, C: Component<S>> System<S, C> {
    /// Stores `value` for `owner` and records its slot in `record`.
    ///
    /// Register callbacks fire after the record is updated.
    ///
    /// # Panics
    /// Panics if `record` is already registered to `C`.
    /// The registry checks this before calling.
    pub fn register_entity(&mut self, owner: Entity<S>, record: &mut Record<S>, value: C) -> &mut C {
        assert!(
            !record.is_registered_to::<C>(),
            "{owner:?} is already registered to `{}`",
            C::name()
        );

        let (slot, _) = self.storage.emplace(Attached { owner, value });
        record.register::<C>(slot);

        let attached = self.storage.get_mut(slot).expect("slot was just allocated");
        self.on_register.fire(owner, &mut attached.value);
        &mut attached.value
    }

    /// Removes the component of `owner` and clears its slot in `record`.
    ///
    /// Unregister callbacks fire before the component is removed.
    /// Returns `None` if `record` is not registered to `C`.
    pub fn unregister_entity(&mut self, owner: Entity<S>, record: &mut Record<S>) -> Option<C> {
        let slot = record.try_component_index::<C>()?;

        let attached = self.storage.get_mut(slot).unwrap_or_else(|| {
            panic!("invariant violation: {owner:?} points to a dead slot of `{}`", C::name())
        });
        debug_assert_eq!(attached.owner, owner, "record does not belong to the slot owner");
        self.on_unregister.fire(owner, &mut attached.value);

        let attached = self.storage.remove(slot).expect("slot is live");
        record.unregister::<C>();
        Some(attached.value)
    }

    /// Gets the component referenced by `record`.
    pub fn get(&self, record: &Record<S>) -> Option<&C> {
        let slot = record.try_component_index::<C>()?;
        Some(&self.storage.get(slot)?.value)
    }

    /// Gets the component referenced by `record` mutably.
    pub fn get_mut(&mut self, record: &Record<S>) -> Option<&mut C> {
        let slot = record.try_component_index::<C>()?;
        Some(&mut self.storage.get_mut(slot)?.value)
    }
}

impl<S: Schema, C> System<S, C> {
    /// The number of entities registered to this system.
    pub fn len(&self) -> usize { self.storage.len() }

    /// Returns `true` if no entity is registered to this system.
    pub fn is_empty(&self) -> bool { self.storage.is_empty() }

    /// Iterates over `(owner, component)` pairs in storage order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Entity<S>, &C)> + '_ {
        self.storage.values().iter().map(|attached| (attached.owner, &attached.value))
    }

    /// Iterates over `(owner, component)` pairs in storage order, mutably.
    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (Entity<S>, &mut C)> + '_ {
        self.storage.values_mut().iter_mut().map(|attached| (attached.owner, &mut attached.value))
    }

    /// Iterates over the components in storage order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &C> + '_ {
        self.storage.values().iter().map(|attached| &attached.value)
    }

    /// Iterates over the entities registered to this system in storage order.
    pub fn owners(&self) -> Owners<'_, S, C> { Owners { inner: self.storage.values().iter() } }

    /// Attaches a callback fired after an entity is registered to this system.
    pub fn attach_on_register(
        &mut self,
        callback: impl FnMut(Entity<S>, &mut C) + Send + 'static,
    ) -> CallbackHandle {
        self.on_register.attach(Box::new(callback))
    }

    /// Detaches a register callback. Returns `false` if it was not attached.
    pub fn detach_on_register(&mut self, handle: CallbackHandle) -> bool {
        self.on_register.detach(handle)
    }

    /// Attaches a callback fired before an entity is unregistered from this system.
    pub fn attach_on_unregister(
        &mut self,
        callback: impl FnMut(Entity<S>, &mut C) + Send + 'static,
    ) -> CallbackHandle {
        self.on_unregister.attach(Box::new(callback))
    }

    /// Detaches an unregister callback. Returns `false` if it was not attached.
    pub fn detach_on_unregister(&mut self, handle: CallbackHandle) -> bool {
        self.on_unregister.detach(handle)
    }

    /// The number of attached register and unregister callbacks.
    pub fn callback_count(&self) -> (usize, usize) {
        (self.on_register.len(), self.on_unregister.len())
    }
}

/// Return value of [`System::owners`].
pub struct Owners<'t, S: Schema, C> {
    inner: slice::Iter<'t, Attached<S, C>>,
}

impl<'t, S: Schema, C> Iterator for Owners<'t, S, C> {
    type Item = Entity<S>;

    fn next(&mut self) -> Option<Entity<S>> { self.inner.next().map(|attached| attached.owner) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'t, S: Schema, C> ExactSizeIterator for Owners<'t, S, C> {}
impl<'t, S: Schema, C> iter::FusedIterator for Owners<'t, S, C> {}
