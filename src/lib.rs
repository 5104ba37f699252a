//! A data-oriented component storage engine with statically declared component schemas.
//!
//! # Entities, components and systems
//! An *entity* is a plain integer handle tagged with the [`Generation`] of its index.
//! It owns no data itself, but can be registered to any number of *components*,
//! each of which is stored in the *system* of its type.
//! A system keeps every instance of its component type in one dense array,
//! so processing all instances of a type touches contiguous memory only.
//!
//! # Schemas
//! The set of component types is closed and declared once with [`schema!`]:
//!
//! ```
//! satchel::schema! {
//!     /// The components of the game world.
//!     pub Game { Position, Velocity, Health }
//! }
//!
//! struct Position(f32, f32);
//! struct Velocity(f32, f32);
//! struct Health(u32);
//!
//! let mut registry = satchel::Registry::<Game>::new();
//! let player = registry.create_entity();
//! registry.register_to_system(player, Health(100)).unwrap();
//! assert!(registry.is_registered_to::<Health>(player));
//! assert!(!registry.is_registered_to::<Position>(player));
//! ```
//!
//! Each component type is assigned its position in the list at compile time.
//! The position selects the mask bit and the slot of the component in every entity [`Record`],
//! and the generated struct-of-systems gives statically typed access to each [`System`],
//! so no lookup goes through a runtime type registry.
//!
//! # Queries
//! [`Registry::query`] yields every entity carrying *at least* the requested components.
//! Single-component queries walk the system of that component directly.
//! Multi-component queries either merge the cached buckets of matching component signatures
//! or scan every entity, as selected by [`registry::QueryStrategy`].
//!
//! # Type-erased storage
//! [`store::Store`] is a simpler container keyed by value type,
//! for data that is broadcast to a visitor as a whole rather than combined per entity.

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

/// Internal re-exports used in macros.
#[doc(hidden)]
pub mod _reexports {
    pub use static_assertions;
}

mod macros;
#[doc(inline)]
pub use macros::*;

pub mod bits;

pub mod error;
pub use error::{Error, Result};

pub mod flat;

pub mod sparse;
pub use sparse::SparseArray;

pub mod schema;
pub use schema::{Component, Schema};

pub mod entity;
pub use entity::{Entity, Generation, Record};

pub mod system;
pub use system::System;

pub mod registry;
pub use registry::Registry;

pub mod query;
pub use query::Query;

pub mod store;

#[cfg(test)]
mod test_util;
