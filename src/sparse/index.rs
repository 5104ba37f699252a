use std::fmt;
use std::hash::Hash;

/// An unsigned integer type usable as a slot index.
///
/// The maximum value of each type is reserved as [`SENTINEL`](Self::SENTINEL),
/// the marker for "no slot".
pub trait Index: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// The reserved value that never refers to a live slot.
    const SENTINEL: Self;

    /// Converts a position into an index.
    ///
    /// # Panics
    /// Panics if `value` does not fit in this type or collides with the sentinel,
    /// i.e. the index space is exhausted.
    fn from_usize(value: usize) -> Self;

    /// Converts the index into a position.
    fn to_usize(self) -> usize;
}

macro_rules! impl_index {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Index for $ty {
                const SENTINEL: Self = <$ty>::MAX;

                fn from_usize(value: usize) -> Self {
                    match Self::try_from(value) {
                        Ok(index) if index != Self::SENTINEL => index,
                        _ => panic!("index {value} exhausts the index space of {}", stringify!($ty)),
                    }
                }

                fn to_usize(self) -> usize { self.try_into().expect("usize is narrower than the index type") }
            }
        )*
    };
}

impl_index!(u8, u16, u32, u64, usize);
