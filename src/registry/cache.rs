use crate::bits::Mask;
use crate::entity::Entity;
use crate::flat;
use crate::schema::Schema;

/// Groups live entities by their exact component signature.
///
/// Every live entity is in exactly one bucket, keyed by its current mask.
/// Buckets are dropped as soon as they become empty,
/// so the number of buckets is bounded by the number of live entities.
pub(crate) struct Adjacency<S: Schema> {
    buckets: flat::Map<S::Mask, flat::Set<Entity<S>>>,
}

impl<S: Schema> Default for Adjacency<S> {
    fn default() -> Self { Self { buckets: flat::Map::new() } }
}

impl<S: Schema> Adjacency<S> {
    pub(crate) fn insert(&mut self, mask: S::Mask, entity: Entity<S>) {
        let inserted = self.buckets.at_or_default(mask).insert(entity);
        assert!(inserted, "invariant violation: {entity:?} is already cached under {mask:?}");
    }

    pub(crate) fn remove(&mut self, mask: &S::Mask, entity: Entity<S>) {
        let outcome =
            self.buckets.get_mut(mask).map(|bucket| (bucket.remove(&entity), bucket.is_empty()));
        match outcome {
            Some((true, true)) => {
                self.buckets.remove(mask);
            }
            Some((true, false)) => {}
            _ => panic!("invariant violation: {entity:?} is not cached under {mask:?}"),
        }
    }

    /// Moves `entity` from the bucket of `from` to the bucket of `to`.
    pub(crate) fn relocate(&mut self, from: &S::Mask, to: S::Mask, entity: Entity<S>) {
        if *from != to {
            self.remove(from, entity);
            self.insert(to, entity);
        }
    }

    /// The buckets whose signature carries every bit of `mask`.
    pub(crate) fn matching(
        &self,
        mask: S::Mask,
    ) -> impl Iterator<Item = &flat::Set<Entity<S>>> + '_ {
        self.buckets
            .iter()
            .filter(move |(signature, _)| signature.contains_all(&mask))
            .map(|(_, bucket)| bucket)
    }

    #[cfg(test)]
    pub(crate) fn bucket_count(&self) -> usize { self.buckets.len() }
}
