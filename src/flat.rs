//! Associative containers backed by a sorted vector.
//!
//! Lookups are binary searches over contiguous memory,
//! which beats node-based maps for the small key counts seen in component signatures.
//! Insertion and removal shift the tail of the vector.

mod map;
pub use map::Map;

mod set;
pub use set::Set;

#[cfg(test)]
mod tests;
