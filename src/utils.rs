//! Utility functions and traits shared by the table implementations

use std::iter;

use crate::{HashTable, TableError};

/// Extension trait for tables that provides additional utility methods
pub trait TableExtensions<K, V> {
    /// Returns the values of the table as a Vec, in traversal order
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the table as a Vec, in traversal order
    fn entries(&self) -> Vec<(K, V)>;

    /// Counts the entries for which `predicate` holds
    fn count_where<P: FnMut(&K, &V) -> bool>(&self, predicate: P) -> usize;
}

impl<K, V, T> TableExtensions<K, V> for T
where
    T: HashTable<K, V>,
    K: Clone,
    V: Clone,
{
    fn values(&self) -> Vec<V> {
        let mut values = Vec::with_capacity(self.size());
        self.traverse(|_, value| values.push(value.clone()));
        values
    }

    fn entries(&self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.size());
        self.traverse(|key, value| entries.push((key.clone(), value.clone())));
        entries
    }

    fn count_where<P: FnMut(&K, &V) -> bool>(&self, mut predicate: P) -> usize {
        let mut count: usize = 0;
        self.traverse(|key, value| {
            if predicate(key, value) {
                count = count.saturating_add(1);
            }
        });
        count
    }
}

/// Allocates a slot array of `capacity` slots, each produced by `fill`.
///
/// Allocation failure aborts the process.
pub(crate) fn alloc_slots<T>(capacity: usize, fill: impl FnMut() -> T) -> Box<[T]> {
    iter::repeat_with(fill).take(capacity).collect()
}

/// Allocates a slot array like [`alloc_slots`], reporting allocation failure instead of aborting
pub(crate) fn try_alloc_slots<T>(
    capacity: usize,
    fill: impl FnMut() -> T,
) -> Result<Box<[T]>, TableError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity).map_err(|source| TableError::Alloc { capacity, source })?;
    slots.extend(iter::repeat_with(fill).take(capacity));
    Ok(slots.into_boxed_slice())
}
