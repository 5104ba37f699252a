//! The closed list of component types a registry stores.
//!
//! A schema is declared once with the [`schema!`](crate::schema) macro,
//! which assigns each component its position in the list as a compile-time constant.
//! Every lookup from a component type to its storage, mask bit or slot
//! resolves through these constants, so there is no runtime type registry.

use std::fmt;

use crate::bits::Mask;
use crate::entity::{Entity, Record};
use crate::sparse;
use crate::system::System;

/// A statically declared, ordered list of component types.
///
/// Implemented on an uninhabited marker type by [`schema!`](crate::schema).
/// Implementing it by hand is possible but the associated items must stay consistent:
/// `Mask` must have at least `COUNT` bits and `Slots` must have exactly `COUNT` entries.
pub trait Schema: Sized + Send + Sync + 'static {
    /// The number of component types.
    const COUNT: usize;

    /// The declared names of the component types, in declaration order.
    const NAMES: &'static [&'static str];

    /// The integer type used for entity handles and component slots.
    type Index: sparse::Index;

    /// The component-presence mask of an entity.
    type Mask: Mask;

    /// One slot per component type, `Index::SENTINEL` when unregistered.
    type Slots: Copy
        + fmt::Debug
        + AsRef<[Self::Index]>
        + AsMut<[Self::Index]>
        + Send
        + Sync
        + 'static;

    /// The struct holding one [`System`] per component type.
    type Systems: Systems<Self>;

    /// A slot array with every entry set to the sentinel.
    fn empty_slots() -> Self::Slots;
}

/// A component type declared in the schema `S`.
pub trait Component<S: Schema>: Send + Sync + Sized + 'static {
    /// The position of this type in the declared list.
    const INDEX: usize;

    /// Selects the storage of this component from the schema's systems.
    fn system(systems: &S::Systems) -> &System<S, Self>;

    /// Selects the storage of this component from the schema's systems mutably.
    fn system_mut(systems: &mut S::Systems) -> &mut System<S, Self>;

    /// The declared name of this component.
    fn name() -> &'static str { S::NAMES[Self::INDEX] }
}

/// The generated struct-of-systems of a schema.
///
/// Statically typed access goes through [`Component::system`];
/// this trait only covers the operations that must dispatch on a runtime component index,
/// i.e. tearing down an entity bit by bit.
pub trait Systems<S: Schema>: Default + Send {
    /// Unregisters `entity` from the system of the component at `index`.
    ///
    /// Returns `false` if `index` is out of range or the entity was not registered to it.
    fn unregister_at(&mut self, index: usize, entity: Entity<S>, record: &mut Record<S>) -> bool;
}
