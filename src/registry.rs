//! The registry coordinates entities, their components and queries over them.
//!
//! A [`Registry`] owns one [`System`] per component type of its schema,
//! the [`Record`] of every live entity,
//! and an adjacency cache grouping entities by their exact component signature.
//!
//! # Example
//! ```
//! use satchel::Registry;
//!
//! satchel::schema! {
//!     pub Game { Position, Velocity }
//! }
//! #[derive(Debug, PartialEq)]
//! struct Position(i32);
//! struct Velocity(i32);
//!
//! let mut registry = Registry::<Game>::new();
//! let still = registry.create_entity();
//! let moving = registry.create_entity();
//! registry.register_to_system(still, Position(0)).unwrap();
//! registry.register_to_system(moving, Position(0)).unwrap();
//! registry.register_to_system(moving, Velocity(3)).unwrap();
//!
//! let movers: Vec<_> = registry.query::<(Position, Velocity)>().collect();
//! assert_eq!(movers, [moving]);
//! ```

use crate::bits::Mask;
use crate::entity::{generation, Entity, Record};
use crate::error::{Error, Result};
use crate::query::{ComponentSet, Query};
use crate::schema::{Component, Schema, Systems};
use crate::sparse::{Index, SparseArray};
use crate::system::{CallbackHandle, System};

mod builder;
pub use builder::Builder;

mod cache;

#[cfg(test)]
mod tests;

/// How a multi-component query finds its entities.
///
/// Both strategies yield the entities that carry *at least* the requested components.
/// Single-component queries always iterate the system of that component directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStrategy {
    /// Merge every cached signature bucket that contains the requested components.
    ///
    /// Entities are yielded in ascending handle order.
    #[default]
    Cached,
    /// Test the mask of every live entity.
    ///
    /// Entities are yielded in entity storage order.
    Scan,
}

/// Stores the entities and components of the schema `S`.
pub struct Registry<S: Schema> {
    entities:    SparseArray<Record<S>, S::Index>,
    /// Never cleared, so stale handles stay stale after the entity indices reset.
    generations: generation::Store,
    systems:     S::Systems,
    cache:       cache::Adjacency<S>,
    strategy:    QueryStrategy,
}

impl<S: Schema> Default for Registry<S> {
    fn default() -> Self { Self::new() }
}

impl<S: Schema> Registry<S> {
    /// Creates an empty registry with the default configuration.
    ///
    /// Use [`Builder`] to configure it.
    pub fn new() -> Self { Builder::new().build() }

    /// The strategy used by [`query`](Self::query).
    pub fn query_strategy(&self) -> QueryStrategy { self.strategy }

    /// Creates an entity registered to no component.
    ///
    /// The index of a previously destroyed entity may be reused,
    /// but the returned handle never equals the handle of the destroyed entity.
    pub fn create_entity(&mut self) -> Entity<S> {
        let (raw, _) = self.entities.emplace(Record::new());
        let generation = self.generations.next(raw.to_usize());
        let entity = Entity::new(raw, generation);
        self.cache.insert(S::Mask::default(), entity);

        log::trace!("create {entity:?}");
        entity
    }

    /// Unregisters the entity from every component and frees its handle.
    ///
    /// Unregister callbacks fire for every component the entity carried,
    /// in declaration order.
    pub fn destroy_entity(&mut self, entity: Entity<S>) -> Result<()> {
        self.check_alive(entity)?;
        let record = self.entities.try_get_mut(entity.raw())?;
        let mask = *record.mask();

        for index in mask.iter_ones() {
            let unregistered = self.systems.unregister_at(index, entity, record);
            assert!(
                unregistered,
                "invariant violation: {entity:?} has the bit of `{}` but its system has no entry",
                S::NAMES[index]
            );
        }

        self.entities.remove(entity.raw())?;
        self.cache.remove(&mask, entity);

        log::trace!("destroy {entity:?} with {mask:?}");
        Ok(())
    }

    /// Returns whether `entity` is alive.
    pub fn contains(&self, entity: Entity<S>) -> bool {
        self.check_alive(entity).is_ok() && self.entities.contains(entity.raw())
    }

    /// The number of live entities.
    pub fn len(&self) -> usize { self.entities.len() }

    /// Returns `true` if there are no live entities.
    pub fn is_empty(&self) -> bool { self.entities.is_empty() }

    /// Iterates over all live entities in storage order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = Entity<S>> + '_ {
        let generations = &self.generations;
        self.entities.indices().map(move |raw| Entity::new(raw, generations.get(raw.to_usize())))
    }

    /// The registration record of `entity`, or `None` if it is not alive.
    pub fn record(&self, entity: Entity<S>) -> Option<&Record<S>> {
        self.check_alive(entity).ok()?;
        self.entities.get(entity.raw())
    }

    /// Fails with [`Error::OutOfRange`] if `entity` was issued for an earlier occupant of its index.
    fn check_alive(&self, entity: Entity<S>) -> Result<()> {
        if self.generations.get(entity.id()) == entity.generation() {
            Ok(())
        } else {
            Err(Error::OutOfRange { index: entity.id() })
        }
    }

    /// Stores `value` as the `C` component of `entity`.
    ///
    /// Register callbacks of `C` fire before this returns.
    /// The entity is already in its new signature bucket when they fire,
    /// so a panicking callback leaves the registry consistent.
    pub fn register_to_system<C: Component<S>>(
        &mut self,
        entity: Entity<S>,
        value: C,
    ) -> Result<&mut C> {
        self.check_alive(entity)?;
        let record = self.entities.try_get_mut(entity.raw())?;
        if record.is_registered_to::<C>() {
            return Err(Error::AlreadyRegistered { entity: entity.id(), component: C::name() });
        }

        let old_mask = *record.mask();
        let mut new_mask = old_mask;
        new_mask.toggle(C::INDEX, true);
        self.cache.relocate(&old_mask, new_mask, entity);

        let value = C::system_mut(&mut self.systems).register_entity(entity, record, value);

        log::trace!("register {entity:?} to `{}`", C::name());
        Ok(value)
    }

    /// Removes the `C` component of `entity` and returns it.
    ///
    /// Unregister callbacks of `C` fire before the component is removed.
    pub fn unregister_from_system<C: Component<S>>(&mut self, entity: Entity<S>) -> Result<C> {
        self.check_alive(entity)?;
        let record = self.entities.try_get_mut(entity.raw())?;

        let old_mask = *record.mask();
        let value = C::system_mut(&mut self.systems)
            .unregister_entity(entity, record)
            .ok_or_else(|| not_registered::<S, C>(entity))?;
        self.cache.relocate(&old_mask, *record.mask(), entity);

        log::trace!("unregister {entity:?} from `{}`", C::name());
        Ok(value)
    }

    /// Returns whether `entity` is alive and carries a `C` component.
    pub fn is_registered_to<C: Component<S>>(&self, entity: Entity<S>) -> bool {
        self.record(entity).map_or(false, |record| record.is_registered_to::<C>())
    }

    /// Gets the `C` component of `entity`.
    pub fn get_component<C: Component<S>>(&self, entity: Entity<S>) -> Result<&C> {
        self.check_alive(entity)?;
        let record = self.entities.try_get(entity.raw())?;
        C::system(&self.systems).get(record).ok_or_else(|| not_registered::<S, C>(entity))
    }

    /// Gets the `C` component of `entity` mutably.
    pub fn get_component_mut<C: Component<S>>(&mut self, entity: Entity<S>) -> Result<&mut C> {
        self.check_alive(entity)?;
        let record = self.entities.try_get(entity.raw())?;
        C::system_mut(&mut self.systems)
            .get_mut(record)
            .ok_or_else(|| not_registered::<S, C>(entity))
    }

    /// The system storing `C`.
    pub fn system<C: Component<S>>(&self) -> &System<S, C> { C::system(&self.systems) }

    /// Iterates over every entity carrying `C` together with its component.
    pub fn each<C: Component<S>>(&self) -> impl ExactSizeIterator<Item = (Entity<S>, &C)> + '_ {
        self.system::<C>().iter()
    }

    /// Iterates over every entity carrying `C` together with its component, mutably.
    pub fn each_mut<C: Component<S>>(
        &mut self,
    ) -> impl ExactSizeIterator<Item = (Entity<S>, &mut C)> + '_ {
        C::system_mut(&mut self.systems).iter_mut()
    }

    /// Lazily yields every live entity carrying at least the components in `Q`.
    ///
    /// `Q` is a tuple of component types, e.g. `(Position,)` or `(Position, Velocity)`.
    pub fn query<Q: ComponentSet<S>>(&self) -> Query<'_, S, Q> {
        let mask = Q::mask();
        if mask.count() == 1 {
            return Query::dense(self.system::<Q::Lead>().owners());
        }

        match self.strategy {
            QueryStrategy::Cached => Query::merge(self.cache.matching(mask)),
            QueryStrategy::Scan => Query::scan(self.entities.iter(), &self.generations, mask),
        }
    }

    /// Attaches a callback fired whenever an entity is registered to `C`.
    pub fn attach_on_register_callback<C: Component<S>>(
        &mut self,
        callback: impl FnMut(Entity<S>, &mut C) + Send + 'static,
    ) -> CallbackHandle {
        C::system_mut(&mut self.systems).attach_on_register(callback)
    }

    /// Detaches a register callback of `C`. Returns `false` if it was not attached.
    pub fn detach_on_register_callback<C: Component<S>>(&mut self, handle: CallbackHandle) -> bool {
        C::system_mut(&mut self.systems).detach_on_register(handle)
    }

    /// Attaches a callback fired whenever an entity is unregistered from `C`,
    /// including when the entity is destroyed.
    pub fn attach_on_unregister_callback<C: Component<S>>(
        &mut self,
        callback: impl FnMut(Entity<S>, &mut C) + Send + 'static,
    ) -> CallbackHandle {
        C::system_mut(&mut self.systems).attach_on_unregister(callback)
    }

    /// Detaches an unregister callback of `C`. Returns `false` if it was not attached.
    pub fn detach_on_unregister_callback<C: Component<S>>(&mut self, handle: CallbackHandle) -> bool {
        C::system_mut(&mut self.systems).detach_on_unregister(handle)
    }
}

fn not_registered<S: Schema, C: Component<S>>(entity: Entity<S>) -> Error {
    Error::NotRegistered { entity: entity.id(), component: C::name() }
}
