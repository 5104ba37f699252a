use std::slice;

/// An ordered set stored as a sorted, deduplicated vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Set<K> {
    items: Vec<K>,
}

impl<K> Default for Set<K> {
    fn default() -> Self { Self { items: Vec::new() } }
}

impl<K: Ord> Set<K> {
    /// Creates an empty set.
    pub fn new() -> Self { Self::default() }

    /// Returns the position at which `key` is or would be stored.
    pub fn find(&self, key: &K) -> usize { self.items.partition_point(|item| item < key) }

    /// Returns whether `key` is in the set.
    pub fn contains(&self, key: &K) -> bool { self.items.get(self.find(key)) == Some(key) }

    /// Inserts `key`, returning `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let pos = self.find(&key);
        if self.items.get(pos) == Some(&key) {
            return false;
        }
        self.items.insert(pos, key);
        true
    }

    /// Removes `key`, returning `false` if it was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let pos = self.find(key);
        if self.items.get(pos) != Some(key) {
            return false;
        }
        self.items.remove(pos);
        true
    }
}

impl<K> Set<K> {
    /// The number of items.
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Iterates over the items in ascending order.
    pub fn iter(&self) -> slice::Iter<'_, K> { self.items.iter() }

    /// The items as a sorted slice.
    pub fn as_slice(&self) -> &[K] { &self.items }
}

impl<K: Ord> FromIterator<K> for Set<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut items: Vec<K> = iter.into_iter().collect();
        items.sort();
        items.dedup();
        Self { items }
    }
}

impl<'t, K> IntoIterator for &'t Set<K> {
    type Item = &'t K;
    type IntoIter = slice::Iter<'t, K>;

    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}
