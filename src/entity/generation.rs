//! Tracks how many times each entity index has been allocated,
//! so that handles of destroyed entities never match a later entity at the same index.

/// The number of times the same index has been used for allocating an entity.
/// A greater generation is a newer allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    /// The raw counter.
    pub fn get(self) -> u32 { self.0 }
}

/// Stores the current generation of every entity index ever allocated.
///
/// Entries are never removed, so a generation keeps increasing
/// even after the entity storage has been emptied and its indices restarted.
#[derive(Debug, Default)]
pub(crate) struct Store {
    vec: Vec<Generation>,
}

impl Store {
    /// Bumps the generation of `id` for a new allocation.
    pub(crate) fn next(&mut self, id: usize) -> Generation {
        if self.vec.len() <= id {
            self.vec.resize(id + 1, Generation::default());
        }

        let generation = self.vec.get_mut(id).expect("just resized");
        generation.0 = generation.0.wrapping_add(1);
        *generation
    }

    /// Gets the generation of the last allocation at `id`.
    pub(crate) fn get(&self, id: usize) -> Generation {
        self.vec.get(id).copied().unwrap_or_default()
    }
}
