//! Entity handles and the per-entity registration record.
//!
//! An entity owns no component data itself.
//! Its [`Record`] only says which component types it is registered to
//! and where each component lives in the corresponding [`System`](crate::System).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::bits::Mask;
use crate::schema::{Component, Schema};
use crate::sparse::Index;

pub(crate) mod generation;
pub use generation::Generation;


/// A handle to an entity in a [`Registry`](crate::Registry) of schema `S`.
///
/// The raw index of a destroyed entity is reused by later entities,
/// but each allocation bumps the [`Generation`] of the index,
/// so the handle of a destroyed entity never equals the handle of a live one.
pub struct Entity<S: Schema> {
    raw:        S::Index,
    generation: Generation,
    _ph:        PhantomData<fn() -> S>,
}

impl<S: Schema> Entity<S> {
    pub(crate) fn new(raw: S::Index, generation: Generation) -> Self {
        Self { raw, generation, _ph: PhantomData }
    }

    /// The raw index of this entity.
    pub fn raw(self) -> S::Index { self.raw }

    /// The raw index of this entity as a `usize`.
    pub fn id(self) -> usize { self.raw.to_usize() }

    /// The allocation generation of the raw index this handle was created with.
    pub fn generation(self) -> Generation { self.generation }
}

impl<S: Schema> Clone for Entity<S> {
    fn clone(&self) -> Self { *self }
}
impl<S: Schema> Copy for Entity<S> {}

impl<S: Schema> PartialEq for Entity<S> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.generation == other.generation
    }
}
impl<S: Schema> Eq for Entity<S> {}

impl<S: Schema> PartialOrd for Entity<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl<S: Schema> Ord for Entity<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw).then(self.generation.cmp(&other.generation))
    }
}

impl<S: Schema> Hash for Entity<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
        self.generation.hash(state);
    }
}

impl<S: Schema> fmt::Debug for Entity<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({:?}#{})", self.raw, self.generation.get())
    }
}

/// The registration state of one entity.
///
/// Bit `i` of the mask is set exactly when slot `i` holds a live index
/// into the system of the `i`-th component type.
/// A disagreement between the two is a bug in this crate and panics.
pub struct Record<S: Schema> {
    mask:  S::Mask,
    slots: S::Slots,
}

impl<S: Schema> Clone for Record<S> {
    fn clone(&self) -> Self { Self { mask: self.mask, slots: self.slots } }
}

impl<S: Schema> fmt::Debug for Record<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record").field("mask", &self.mask).field("slots", &self.slots).finish()
    }
}

impl<S: Schema> Default for Record<S> {
    fn default() -> Self { Self::new() }
}

impl<S: Schema> Record<S> {
    /// Creates a record registered to no component.
    pub fn new() -> Self { Self { mask: S::Mask::default(), slots: S::empty_slots() } }

    /// The component-presence mask.
    pub fn mask(&self) -> &S::Mask { &self.mask }

    /// The component slots, indexed by [`Component::INDEX`].
    pub fn slots(&self) -> &[S::Index] { self.slots.as_ref() }

    /// Marks the entity as registered to `C` at `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is the sentinel or the entity is already registered to `C`.
    pub fn register<C: Component<S>>(&mut self, slot: S::Index) {
        assert!(slot != S::Index::SENTINEL, "cannot register `{}` at the sentinel slot", C::name());
        assert!(
            !self.is_registered_to::<C>(),
            "entity is already registered to `{}`",
            C::name()
        );

        self.mask.toggle(C::INDEX, true);
        self.slots.as_mut()[C::INDEX] = slot;
    }

    /// Marks the entity as no longer registered to `C`,
    /// returning the slot it occupied.
    pub fn unregister<C: Component<S>>(&mut self) -> Option<S::Index> {
        let slot = self.try_component_index::<C>()?;
        self.mask.toggle(C::INDEX, false);
        self.slots.as_mut()[C::INDEX] = S::Index::SENTINEL;
        Some(slot)
    }

    /// Returns whether the entity is registered to `C`.
    pub fn is_registered_to<C: Component<S>>(&self) -> bool { self.checked_slot(C::INDEX).is_some() }

    /// The slot of `C` in its system.
    ///
    /// # Panics
    /// Panics if the entity is not registered to `C`.
    /// Check [`is_registered_to`](Self::is_registered_to) first
    /// or use [`try_component_index`](Self::try_component_index).
    pub fn component_index<C: Component<S>>(&self) -> S::Index {
        match self.try_component_index::<C>() {
            Some(slot) => slot,
            None => panic!("entity is not registered to `{}`", C::name()),
        }
    }

    /// The slot of `C` in its system, or `None` if the entity is not registered to it.
    pub fn try_component_index<C: Component<S>>(&self) -> Option<S::Index> {
        self.checked_slot(C::INDEX)
    }

    /// Reads slot `index` after checking it against the mask.
    fn checked_slot(&self, index: usize) -> Option<S::Index> {
        let bit = self.mask.test(index);
        let slot = self.slots.as_ref()[index];
        match (bit, slot != S::Index::SENTINEL) {
            (true, true) => Some(slot),
            (false, false) => None,
            (true, false) => panic!(
                "invariant violation: mask bit of `{}` is set but its slot is empty",
                S::NAMES[index]
            ),
            (false, true) => panic!(
                "invariant violation: slot of `{}` is {slot:?} but its mask bit is unset",
                S::NAMES[index]
            ),
        }
    }
}
