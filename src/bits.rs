//! Fixed-width bit sets used as component-presence masks.
//!
//! The width of a mask is fixed by the schema that declares the component list,
//! so each schema gets its own [`BitSet`] instantiation with exactly enough bytes.

use std::fmt;
use std::hash::Hash;

use bitvec::prelude::{BitSlice, Lsb0};
use bitvec::slice::IterOnes;
use bitvec::view::BitView;


/// Returns the number of bytes required to store `bits` bits.
pub const fn byte_len(bits: usize) -> usize { (bits + 7) / 8 }

/// A packed bit vector of `BYTES * 8` bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitSet<const BYTES: usize> {
    bytes: [u8; BYTES],
}

impl<const BYTES: usize> BitSet<BYTES> {
    /// Creates a bit set with every bit unset.
    pub const fn new() -> Self { Self { bytes: [0; BYTES] } }

    /// Creates a bit set with the given positions set.
    ///
    /// # Panics
    /// Panics if any position is out of range.
    pub fn from_ones(ones: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new();
        for pos in ones {
            set.toggle(pos, true);
        }
        set
    }
}

impl<const BYTES: usize> Default for BitSet<BYTES> {
    fn default() -> Self { Self::new() }
}

impl<const BYTES: usize> fmt::Debug for BitSet<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BitSet")?;
        f.debug_set().entries(self.iter_ones()).finish()
    }
}

impl<const BYTES: usize> Mask for BitSet<BYTES> {
    fn as_raw(&self) -> &[u8] { &self.bytes }

    fn as_bits(&self) -> &BitSlice<u8, Lsb0> { self.bytes.view_bits::<Lsb0>() }

    fn as_bits_mut(&mut self) -> &mut BitSlice<u8, Lsb0> { self.bytes.view_bits_mut::<Lsb0>() }
}

/// Operations on a component-presence mask.
///
/// Implemented by every [`BitSet`] width.
/// The registry is generic over this trait so that each schema can pick the
/// narrowest mask that fits its component list.
pub trait Mask: Copy + Default + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// The packed bytes backing this mask.
    fn as_raw(&self) -> &[u8];

    /// A bit-level view of this mask.
    fn as_bits(&self) -> &BitSlice<u8, Lsb0>;

    /// A mutable bit-level view of this mask.
    fn as_bits_mut(&mut self) -> &mut BitSlice<u8, Lsb0>;

    /// The number of addressable bits.
    fn capacity(&self) -> usize { self.as_bits().len() }

    /// Returns whether the bit at `pos` is set.
    ///
    /// # Panics
    /// Panics if `pos >= self.capacity()`.
    fn test(&self, pos: usize) -> bool {
        let bits = self.as_bits();
        assert!(pos < bits.len(), "bit {pos} is out of range for a mask of {} bits", bits.len());
        bits[pos]
    }

    /// Sets the bit at `pos` to `value`.
    ///
    /// # Panics
    /// Panics if `pos >= self.capacity()`.
    fn toggle(&mut self, pos: usize, value: bool) {
        let bits = self.as_bits_mut();
        assert!(pos < bits.len(), "bit {pos} is out of range for a mask of {} bits", bits.len());
        bits.set(pos, value);
    }

    /// Returns whether every bit set in `other` is also set in `self`.
    ///
    /// This is the superset test used to match entities against queries.
    /// It is not symmetric: a mask with more bits contains a mask with fewer,
    /// but not the other way round.
    fn contains_all(&self, other: &Self) -> bool {
        self.as_raw().iter().zip(other.as_raw()).all(|(&mine, &theirs)| mine & theirs == theirs)
    }

    /// Returns whether `self` and `other` have at least one bit in common.
    fn intersects(&self, other: &Self) -> bool {
        self.as_raw().iter().zip(other.as_raw()).any(|(&mine, &theirs)| mine & theirs != 0)
    }

    /// The number of set bits.
    fn count(&self) -> usize { self.as_raw().iter().map(|byte| byte.count_ones() as usize).sum() }

    /// Returns whether no bit is set.
    fn is_empty(&self) -> bool { self.as_raw().iter().all(|&byte| byte == 0) }

    /// Iterates over the positions of set bits in ascending order.
    fn iter_ones(&self) -> IterOnes<'_, u8, Lsb0> { self.as_bits().iter_ones() }
}
