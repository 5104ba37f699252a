use super::{QueryStrategy, Registry};
use crate::schema::Schema;
use crate::sparse::SparseArray;

/// Configures a [`Registry`] before it is created.
///
/// ```
/// use satchel::registry::{Builder, QueryStrategy};
///
/// satchel::schema! {
///     pub Game { Position, Velocity }
/// }
/// struct Position(f32, f32);
/// struct Velocity(f32, f32);
///
/// let registry = Builder::new()
///     .entity_capacity(1024)
///     .query_strategy(QueryStrategy::Scan)
///     .build::<Game>();
/// assert_eq!(registry.query_strategy(), QueryStrategy::Scan);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    entity_capacity: usize,
    query_strategy:  QueryStrategy,
}

impl Builder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self { Self::default() }

    /// Reserves space for `capacity` entities up front.
    pub fn entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Selects how multi-component queries find their entities.
    pub fn query_strategy(mut self, strategy: QueryStrategy) -> Self {
        self.query_strategy = strategy;
        self
    }

    /// Creates an empty registry for the schema `S`.
    pub fn build<S: Schema>(self) -> Registry<S> {
        log::debug!(
            "building registry for {} components {:?} with {:?}",
            S::COUNT,
            S::NAMES,
            self
        );

        Registry {
            entities:    SparseArray::with_capacity(self.entity_capacity),
            generations: Default::default(),
            systems:     S::Systems::default(),
            cache:       super::cache::Adjacency::default(),
            strategy:    self.query_strategy,
        }
    }
}
