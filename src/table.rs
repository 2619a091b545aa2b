//! The operation set shared by both collision-resolution strategies.

/// Associative table with an injected hasher and comparator.
///
/// [`SepChainTable`](crate::SepChainTable) and [`LinProbTable`](crate::LinProbTable) implement
/// the same operations under the same names, so code written against this trait works with
/// either strategy. Logical misses are reported through `Option`/`bool`, never through panics.
///
/// `Option<T>` is a table too and stands for a handle that may be absent: queries on `None`
/// report an empty table with zero capacity, `clear` is a no-op, and operations that need a
/// live table panic.
///
/// On an `Option` handle, method-call syntax `handle.insert(key, value)` resolves to the
/// inherent [`Option::insert`], which replaces the whole handle. Call the table operation
/// through the trait instead:
///
/// ```
/// use hashtab::{HashTable, SepChainTable, compare, hash};
///
/// let mut handle = Some(SepChainTable::new(4, hash::int_div::<u32>, compare::natural::<u32>));
/// assert!(HashTable::insert(&mut handle, 1, "one"));
/// assert!(!HashTable::insert(&mut handle, 1, "uno"));
/// assert_eq!(handle.get(&1), Some(&"one"));
/// ```
pub trait HashTable<K, V> {
    /// Associates `value` with `key`, returning the value it replaces
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Adds the entry only if `key` is absent; an existing value is never overwritten.
    ///
    /// Returns whether the entry was added.
    fn insert(&mut self, key: K, value: V) -> bool;

    /// Returns the value associated with `key`
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value associated with `key`
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Returns true if `key` has an entry
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry of `key` and hands the stored key and value back.
    ///
    /// Dropping the returned pair releases the payload; the table keeps nothing of it.
    fn delete(&mut self, key: &K) -> Option<(K, V)>;

    /// Removes every entry, passing each stored key and value to `dispose`; capacity is kept
    fn clear_with<F: FnMut(K, V)>(&mut self, dispose: F);

    /// Removes and drops every entry; capacity is kept
    fn clear(&mut self) {
        self.clear_with(|_, _| {});
    }

    /// Consumes the table, passing every stored key and value to `dispose`
    fn destroy_with<F: FnMut(K, V)>(mut self, dispose: F)
    where
        Self: Sized,
    {
        self.clear_with(dispose);
    }

    /// Number of live entries
    fn size(&self) -> usize;

    /// Returns true if the table has no live entries
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of slots
    fn capacity(&self) -> usize;

    /// Ratio of live entries to slots, `0.0` for a table without slots
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    fn load_factor(&self) -> f64 {
        match self.capacity() {
            0 => 0.0,
            capacity => self.size() as f64 / capacity as f64,
        }
    }

    /// Keys of every live entry, in traversal order
    fn keys(&self) -> Vec<&K>;

    /// Calls `visit` once per live entry.
    ///
    /// Whatever context the visitor needs is captured by the closure.
    fn traverse<F: FnMut(&K, &V)>(&self, visit: F);
}

/// Unwraps a table handle that must be present
#[track_caller]
#[allow(clippy::panic)]
fn present<T>(table: Option<&T>) -> &T {
    let Some(table) = table else { panic!("operation requires a live hash table, found none") };
    table
}

/// Unwraps a mutable table handle that must be present
#[track_caller]
#[allow(clippy::panic)]
fn present_mut<T>(table: Option<&mut T>) -> &mut T {
    let Some(table) = table else { panic!("operation requires a live hash table, found none") };
    table
}

impl<K, V, T: HashTable<K, V>> HashTable<K, V> for Option<T> {
    /// # Panics
    ///
    /// Panics on `None`.
    fn put(&mut self, key: K, value: V) -> Option<V> {
        present_mut(self.as_mut()).put(key, value)
    }

    /// # Panics
    ///
    /// Panics on `None`.
    fn insert(&mut self, key: K, value: V) -> bool {
        present_mut(self.as_mut()).insert(key, value)
    }

    /// # Panics
    ///
    /// Panics on `None`.
    fn get(&self, key: &K) -> Option<&V> {
        present(self.as_ref()).get(key)
    }

    /// # Panics
    ///
    /// Panics on `None`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        present_mut(self.as_mut()).get_mut(key)
    }

    /// # Panics
    ///
    /// Panics on `None`.
    fn delete(&mut self, key: &K) -> Option<(K, V)> {
        present_mut(self.as_mut()).delete(key)
    }

    fn clear_with<F: FnMut(K, V)>(&mut self, dispose: F) {
        if let Some(table) = self {
            table.clear_with(dispose);
        }
    }

    fn size(&self) -> usize {
        self.as_ref().map_or(0, |table| table.size())
    }

    fn capacity(&self) -> usize {
        self.as_ref().map_or(0, |table| table.capacity())
    }

    fn keys(&self) -> Vec<&K> {
        self.as_ref().map_or_else(Vec::new, |table| table.keys())
    }

    fn traverse<F: FnMut(&K, &V)>(&self, visit: F) {
        if let Some(table) = self {
            table.traverse(visit);
        }
    }
}
