//! A slot allocator handing out stable indices over compact storage.
//!
//! [`SparseArray`] keeps its values in a gapless dense vector,
//! so iteration touches contiguous memory only.
//! External code refers to values through *logical indices*,
//! which are translated to dense positions through a sparse lookup table.
//! Removing a value moves the last dense value into the hole,
//! and only the lookup entry of the moved value is rewritten,
//! so every other logical index stays valid.
//!
//! Freed logical indices are kept in a free list and reused (most recently freed first)
//! before new indices are allocated.

use std::{iter, ops, slice};

use crate::error::{Error, Result};

mod index;
pub use index::Index;


/// A dense + sparse + free-list slot allocator.
///
/// Indexing with `array[index]` panics if `index` is not live;
/// use [`get`](Self::get) or [`try_get`](Self::try_get) for a checked lookup.
pub struct SparseArray<T, I: Index = u32> {
    /// The values, without gaps.
    dense:     Vec<T>,
    /// `packed[p]` is the logical index of `dense[p]`.
    packed:    Vec<I>,
    /// `sparse[l]` is the dense position of logical index `l`, or the sentinel if `l` is free.
    sparse:    Vec<I>,
    /// Logical indices that may be handed out again.
    free_list: Vec<I>,
}

impl<T, I: Index> Default for SparseArray<T, I> {
    fn default() -> Self {
        Self { dense: Vec::new(), packed: Vec::new(), sparse: Vec::new(), free_list: Vec::new() }
    }
}

impl<T, I: Index> SparseArray<T, I> {
    /// Creates an empty array.
    pub fn new() -> Self { Self::default() }

    /// Creates an empty array with space for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense:     Vec::with_capacity(capacity),
            packed:    Vec::with_capacity(capacity),
            sparse:    Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Stores a value and returns its logical index together with a reference to it.
    ///
    /// # Panics
    /// Panics if the index type `I` has no more free values.
    pub fn emplace(&mut self, value: T) -> (I, &mut T) {
        let position = I::from_usize(self.dense.len());

        let index = match self.free_list.pop() {
            Some(index) => {
                let entry = self
                    .sparse
                    .get_mut(index.to_usize())
                    .expect("free list only contains allocated indices");
                *entry = position;
                index
            }
            None => {
                let index = I::from_usize(self.sparse.len());
                self.sparse.push(position);
                index
            }
        };

        self.dense.push(value);
        self.packed.push(index);

        let value = self.dense.last_mut().expect("just pushed");
        (index, value)
    }

    /// Removes the value at a logical index and returns it.
    ///
    /// The index is pushed to the free list.
    /// If the array becomes empty, all bookkeeping is reset
    /// and subsequent indices start from zero again.
    pub fn remove(&mut self, index: I) -> Result<T> {
        let position = self.position(index).ok_or_else(|| out_of_range(index))?;

        let value = self.dense.swap_remove(position);
        self.packed.swap_remove(position);

        // the former last value now lives at `position`
        if let Some(&moved) = self.packed.get(position) {
            let entry =
                self.sparse.get_mut(moved.to_usize()).expect("packed only contains live indices");
            *entry = I::from_usize(position);
        }

        if self.dense.is_empty() {
            self.sparse.clear();
            self.free_list.clear();
        } else {
            let entry = self.sparse.get_mut(index.to_usize()).expect("index was live");
            *entry = I::SENTINEL;
            self.free_list.push(index);
        }

        Ok(value)
    }

    /// Removes all values and forgets all allocated indices.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.packed.clear();
        self.sparse.clear();
        self.free_list.clear();
    }

    /// Returns whether `index` refers to a live value.
    pub fn contains(&self, index: I) -> bool { self.position(index).is_some() }

    /// Gets a shared reference to the value at `index` if it is live.
    pub fn get(&self, index: I) -> Option<&T> {
        let position = self.position(index)?;
        self.dense.get(position)
    }

    /// Gets a mutable reference to the value at `index` if it is live.
    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        let position = self.position(index)?;
        self.dense.get_mut(position)
    }

    /// Gets a shared reference to the value at `index`,
    /// failing with [`Error::OutOfRange`] if it is not live.
    pub fn try_get(&self, index: I) -> Result<&T> {
        self.get(index).ok_or_else(|| out_of_range(index))
    }

    /// Gets a mutable reference to the value at `index`,
    /// failing with [`Error::OutOfRange`] if it is not live.
    pub fn try_get_mut(&mut self, index: I) -> Result<&mut T> {
        self.get_mut(index).ok_or_else(|| out_of_range(index))
    }

    /// The number of live values.
    pub fn len(&self) -> usize { self.dense.len() }

    /// Returns `true` if there are no live values.
    pub fn is_empty(&self) -> bool { self.dense.is_empty() }

    /// The live values in dense order.
    ///
    /// Dense order is neither allocation order nor index order,
    /// and it changes whenever a value is removed.
    pub fn values(&self) -> &[T] { &self.dense }

    /// The live values in dense order, mutably.
    pub fn values_mut(&mut self) -> &mut [T] { &mut self.dense }

    /// Iterates over the live indices in dense order.
    pub fn indices(&self) -> iter::Copied<slice::Iter<'_, I>> { self.packed.iter().copied() }

    /// Iterates over `(index, value)` pairs in dense order.
    pub fn iter(&self) -> Iter<'_, T, I> { Iter { inner: iter::zip(&self.packed, &self.dense) } }

    /// Iterates over `(index, value)` pairs in dense order, mutably.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, I> {
        IterMut { inner: iter::zip(&self.packed, &mut self.dense) }
    }

    fn position(&self, index: I) -> Option<usize> {
        let position = *self.sparse.get(index.to_usize())?;
        if position == I::SENTINEL {
            None
        } else {
            Some(position.to_usize())
        }
    }
}

fn out_of_range<I: Index>(index: I) -> Error { Error::OutOfRange { index: index.to_usize() } }

impl<T, I: Index> ops::Index<I> for SparseArray<T, I> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index:?} does not refer to a live slot"),
        }
    }
}

impl<T, I: Index> ops::IndexMut<I> for SparseArray<T, I> {
    fn index_mut(&mut self, index: I) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index:?} does not refer to a live slot"),
        }
    }
}

impl<'t, T, I: Index> IntoIterator for &'t SparseArray<T, I> {
    type Item = (I, &'t T);
    type IntoIter = Iter<'t, T, I>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Return value of [`SparseArray::iter`].
pub struct Iter<'t, T, I> {
    inner: iter::Zip<slice::Iter<'t, I>, slice::Iter<'t, T>>,
}

impl<'t, T, I: Index> Iterator for Iter<'t, T, I> {
    type Item = (I, &'t T);

    fn next(&mut self) -> Option<Self::Item> {
        let (&index, value) = self.inner.next()?;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'t, T, I: Index> ExactSizeIterator for Iter<'t, T, I> {}
impl<'t, T, I: Index> iter::FusedIterator for Iter<'t, T, I> {}

/// Return value of [`SparseArray::iter_mut`].
pub struct IterMut<'t, T, I> {
    inner: iter::Zip<slice::Iter<'t, I>, slice::IterMut<'t, T>>,
}

impl<'t, T, I: Index> Iterator for IterMut<'t, T, I> {
    type Item = (I, &'t mut T);

    fn next(&mut self) -> Option<Self::Item> {
        let (&index, value) = self.inner.next()?;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'t, T, I: Index> ExactSizeIterator for IterMut<'t, T, I> {}
impl<'t, T, I: Index> iter::FusedIterator for IterMut<'t, T, I> {}
