use std::{iter, slice};

use crate::error::{Error, Result};

/// An ordered map stored as a vector of key-value pairs sorted by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self { Self { entries: Vec::new() } }
}

impl<K: Ord, V> Map<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self { Self::default() }

    /// Returns the position at which `key` is or would be stored.
    ///
    /// The entry at the returned position, if any, is the first entry not less than `key`;
    /// callers compare it against `key` to tell a hit from an insertion point.
    pub fn find(&self, key: &K) -> usize { self.entries.partition_point(|(k, _)| k < key) }

    fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        let pos = self.find(key);
        match self.entries.get(pos) {
            Some((k, _)) if k == key => Ok(pos),
            _ => Err(pos),
        }
    }

    /// Returns whether an entry for `key` exists.
    pub fn contains(&self, key: &K) -> bool { self.search(key).is_ok() }

    /// Gets the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let pos = self.search(key).ok()?;
        Some(&self.entries[pos].1)
    }

    /// Gets the value for `key` mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let pos = self.search(key).ok()?;
        Some(&mut self.entries[pos].1)
    }

    /// Gets the value for `key`, failing with [`Error::MissingEntry`] if absent.
    pub fn at(&self, key: &K) -> Result<&V> { self.get(key).ok_or(Error::MissingEntry) }

    /// Gets the value for `key` mutably, failing with [`Error::MissingEntry`] if absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::MissingEntry)
    }

    /// Gets the value for `key`, inserting `V::default()` first if absent.
    pub fn at_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let pos = match self.search(&key) {
            Ok(pos) => pos,
            Err(pos) => {
                self.entries.insert(pos, (key, V::default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    /// Inserts a value, returning the previous value for the same key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            Err(pos) => {
                self.entries.insert(pos, (key, value));
                None
            }
        }
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let pos = self.search(key).ok()?;
        Some(self.entries.remove(pos).1)
    }
}

impl<K, V> Map<K, V> {
    /// The number of entries.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + DoubleEndedIterator + ExactSizeIterator {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the entries in ascending key order with mutable values.
    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&K, &mut V)> + DoubleEndedIterator + ExactSizeIterator {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + DoubleEndedIterator + ExactSizeIterator {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + DoubleEndedIterator + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Retains only the entries for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        self.entries.retain_mut(|(k, v)| f(&*k, v));
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Map<K, V> {
    /// Later duplicates overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(K, V)> = iter.into_iter().collect();
        // stable sort keeps insertion order among equal keys, so the last duplicate wins below
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut deduped: Vec<(K, V)> = Vec::with_capacity(entries.len());
        for entry in entries {
            match deduped.last_mut() {
                Some(last) if last.0 == entry.0 => *last = entry,
                _ => deduped.push(entry),
            }
        }
        Self { entries: deduped }
    }
}

impl<'t, K, V> IntoIterator for &'t Map<K, V> {
    type Item = (&'t K, &'t V);
    type IntoIter = iter::Map<slice::Iter<'t, (K, V)>, fn(&'t (K, V)) -> (&'t K, &'t V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(split_entry as fn(&'t (K, V)) -> (&'t K, &'t V))
    }
}

fn split_entry<K, V>((key, value): &(K, V)) -> (&K, &V) { (key, value) }
