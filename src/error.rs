//! Recoverable errors returned by satchel operations.
//!
//! Caller mistakes (looking up an absent key, touching a dead entity,
//! reading a component that was never attached) surface as [`Error`].
//! Internal desynchronization between an entity's mask and its slots is a bug
//! in satchel itself and panics with an `invariant violation:` message instead.

use thiserror::Error;

/// Errors produced by the containers and the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lookup in a [`flat::Map`](crate::flat::Map) did not find the key.
    #[error("no entry exists for the requested key")]
    MissingEntry,

    /// An index does not refer to a live slot,
    /// either because it was never allocated or because it has been freed.
    #[error("index {index} does not refer to a live slot")]
    OutOfRange {
        /// The offending index.
        index: usize,
    },

    /// The entity does not carry the requested component.
    #[error("entity {entity} is not registered to component `{component}`")]
    NotRegistered {
        /// The entity handle, as a raw integer.
        entity:    usize,
        /// The type name of the component.
        component: &'static str,
    },

    /// The entity already carries the requested component.
    #[error("entity {entity} is already registered to component `{component}`")]
    AlreadyRegistered {
        /// The entity handle, as a raw integer.
        entity:    usize,
        /// The type name of the component.
        component: &'static str,
    },
}

/// Result type for satchel operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
