//! Lazy iteration over the entities carrying a set of components.

use std::{iter, slice};

use itertools::KMerge;

use crate::bits::Mask;
use crate::entity::{generation, Entity, Record};
use crate::schema::{Component, Schema};
use crate::sparse::{self, Index};
use crate::system::Owners;


/// A set of component types requested by a query.
///
/// Implemented for tuples of up to 8 component types.
/// Repeating a type is allowed and has no effect.
pub trait ComponentSet<S: Schema> {
    /// The first component type of the set.
    type Lead: Component<S>;

    /// The mask with the bit of every component type in the set.
    fn mask() -> S::Mask;
}

macro_rules! impl_component_set {
    ($lead:ident $(, $rest:ident)*) => {
        impl<S: Schema, $lead: Component<S> $(, $rest: Component<S>)*> ComponentSet<S> for ($lead, $($rest,)*) {
            type Lead = $lead;

            fn mask() -> S::Mask {
                let mut mask = S::Mask::default();
                mask.toggle(<$lead as Component<S>>::INDEX, true);
                $(
                    mask.toggle(<$rest as Component<S>>::INDEX, true);
                )*
                mask
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// Return value of [`Registry::query`](crate::Registry::query).
///
/// The query borrows the registry,
/// so entities cannot be created, destroyed or re-registered while it is alive.
/// Calling `query` again yields a fresh iterator.
pub struct Query<'r, S: Schema, Q: ComponentSet<S>> {
    inner: Inner<'r, S, Q::Lead>,
}

enum Inner<'r, S: Schema, C> {
    /// Every owner of a single system.
    Dense(Owners<'r, S, C>),
    /// The union of disjoint sorted signature buckets.
    Merge(KMerge<iter::Copied<slice::Iter<'r, Entity<S>>>>),
    /// A filter over every entity record.
    Scan {
        records:     sparse::Iter<'r, Record<S>, S::Index>,
        generations: &'r generation::Store,
        mask:        S::Mask,
    },
}

impl<'r, S: Schema, Q: ComponentSet<S>> Query<'r, S, Q> {
    pub(crate) fn dense(owners: Owners<'r, S, Q::Lead>) -> Self {
        Self { inner: Inner::Dense(owners) }
    }

    pub(crate) fn merge(buckets: impl Iterator<Item = &'r crate::flat::Set<Entity<S>>>) -> Self {
        Self { inner: Inner::Merge(itertools::kmerge(buckets.map(|bucket| bucket.iter().copied()))) }
    }

    pub(crate) fn scan(
        records: sparse::Iter<'r, Record<S>, S::Index>,
        generations: &'r generation::Store,
        mask: S::Mask,
    ) -> Self {
        Self { inner: Inner::Scan { records, generations, mask } }
    }
}

impl<'r, S: Schema, Q: ComponentSet<S>> Iterator for Query<'r, S, Q> {
    type Item = Entity<S>;

    fn next(&mut self) -> Option<Entity<S>> {
        match &mut self.inner {
            Inner::Dense(owners) => owners.next(),
            Inner::Merge(merge) => merge.next(),
            Inner::Scan { records, generations, mask } => records
                .find(|(_, record)| record.mask().contains_all(mask))
                .map(|(raw, _)| Entity::new(raw, generations.get(raw.to_usize()))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Dense(owners) => owners.size_hint(),
            Inner::Merge(merge) => merge.size_hint(),
            Inner::Scan { records, .. } => (0, records.size_hint().1),
        }
    }
}

impl<'r, S: Schema, Q: ComponentSet<S>> iter::FusedIterator for Query<'r, S, Q> {}
