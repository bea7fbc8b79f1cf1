use std::hash::Hash;

use indexmap::IndexMap;

/// Counts, per owner, how many of its children are currently selected.
///
/// Owners with a zero count are not stored. Iteration follows the order in
/// which owners first gained a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefCounter<K: Hash + Eq> {
    counts: IndexMap<K, usize>,
}

impl<K: Hash + Eq> Default for RefCounter<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Copy> RefCounter<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to the owner's count and returns the new count.
    pub fn increment(&mut self, owner: K) -> usize {
        let count = self.counts.entry(owner).or_insert(0);
        *count += 1;
        *count
    }

    /// Subtracts one from the owner's count and returns the new count.
    ///
    /// The entry is dropped when it reaches zero; decrementing an absent
    /// owner does nothing.
    pub fn decrement(&mut self, owner: K) -> usize {
        let Some(count) = self.counts.get_mut(&owner) else {
            return 0;
        };
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.shift_remove(&owner);
        }
        remaining
    }

    /// The owner's count, 0 if absent.
    #[must_use]
    pub fn count(&self, owner: K) -> usize {
        self.counts.get(&owner).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has(&self, owner: K) -> bool {
        self.counts.contains_key(&owner)
    }

    /// Drops the owner's entry regardless of its count, returning the old count.
    pub fn remove(&mut self, owner: K) -> usize {
        self.counts.shift_remove(&owner).unwrap_or(0)
    }

    /// Owners with a non-zero count.
    pub fn owners(&self) -> indexmap::map::Keys<'_, K, usize> {
        self.counts.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
