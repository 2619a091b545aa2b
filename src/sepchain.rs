//! Hash table resolving collisions by separate chaining.
//!
//! Every slot heads a singly linked list of the entries hashing to it. The capacity is fixed
//! at construction and never changes; deciding when a larger table is worth building is left
//! to the caller, guided by [`SepChainTable::load_factor`].

use std::{fmt, mem};

use tracing::trace;

use crate::{
    HashTable, TableError,
    compare::Comparator,
    hash::SlotHasher,
    utils::{alloc_slots, try_alloc_slots},
};

/// Capacity used by [`SepChainTable::with_default_capacity`]
pub const DEFAULT_CAPACITY: usize = 997;

/// Head of a collision list
type Link<K, V> = Option<Box<Node<K, V>>>;

/// An entry of a collision list
#[derive(Debug)]
struct Node<K, V> {
    /// The key of the entry
    key: K,
    /// The value associated with the key
    value: V,
    /// The next (older) entry of the same slot
    next: Link<K, V>,
}

/// A hash table with separate chaining.
///
/// Entries that hash to the same slot are kept in a list, newest first. Keys are compared
/// with the injected [`Comparator`] only; `K` needs neither `Eq` nor `Hash`.
///
/// ```rust
/// use hashtab::{compare, hash, SepChainTable};
///
/// let mut table = SepChainTable::new(4, hash::int_div::<i32>, compare::natural::<i32>);
/// assert_eq!(table.put(1, "one"), None);
/// assert_eq!(table.put(5, "five"), None); // same slot as 1
/// assert_eq!(table.put(1, "uno"), Some("one"));
/// assert!(!table.insert(5, "cinque"));
/// assert_eq!(table.get(&5), Some(&"five"));
/// assert_eq!(table.size(), 2);
/// ```
pub struct SepChainTable<K, V, H, C> {
    /// Collision lists, one per slot
    slots: Box<[Link<K, V>]>,
    /// Number of live entries
    size: usize,
    /// Maps keys to slots
    hasher: H,
    /// Decides key equality
    cmp: C,
}

impl<K, V, H, C> SepChainTable<K, V, H, C>
where
    H: SlotHasher<K>,
    C: Comparator<K>,
{
    /// Creates a table with `capacity` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize, hasher: H, cmp: C) -> Self {
        assert!(capacity > 0, "separate chaining table needs a positive capacity");
        Self { slots: alloc_slots(capacity, || None), size: 0, hasher, cmp }
    }

    /// Creates a table with `capacity` empty slots, reporting a zero capacity or a failed
    /// allocation as an error
    pub fn try_new(capacity: usize, hasher: H, cmp: C) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(Self { slots: try_alloc_slots(capacity, || None)?, size: 0, hasher, cmp })
    }

    /// Creates a table with [`DEFAULT_CAPACITY`] slots
    #[must_use]
    pub fn with_default_capacity(hasher: H, cmp: C) -> Self {
        Self::new(DEFAULT_CAPACITY, hasher, cmp)
    }

    /// Slot of `key`
    fn slot_of(&self, key: &K) -> usize {
        let capacity = self.slots.len();
        let index = self.hasher.slot(key, capacity);
        assert!(index < capacity, "hasher returned slot {index} for capacity {capacity}");
        index
    }

    /// Finds the entry of `key`
    #[allow(clippy::indexing_slicing)]
    fn find(&self, key: &K) -> Option<&Node<K, V>> {
        let mut node = self.slots[self.slot_of(key)].as_deref();
        while let Some(n) = node {
            if self.cmp.equals(key, &n.key) {
                return Some(n);
            }
            node = n.next.as_deref();
        }
        None
    }

    /// Associates `value` with `key`.
    ///
    /// Returns the replaced value if `key` was present; otherwise the entry is prepended to
    /// its slot's list and `None` is returned.
    #[allow(clippy::indexing_slicing)]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.slot_of(&key);
        let cmp = &self.cmp;
        let head = &mut self.slots[index];

        let mut node = head.as_deref_mut();
        while let Some(n) = node {
            if cmp.equals(&key, &n.key) {
                return Some(mem::replace(&mut n.value, value));
            }
            node = n.next.as_deref_mut();
        }

        let next = head.take();
        *head = Some(Box::new(Node { key, value, next }));
        self.size = self.size.saturating_add(1);
        None
    }

    /// Adds the entry only if `key` is absent, returning whether it was added
    #[allow(clippy::indexing_slicing)]
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.find(&key).is_some() {
            return false;
        }
        let index = self.slot_of(&key);
        let head = &mut self.slots[index];
        let next = head.take();
        *head = Some(Box::new(Node { key, value, next }));
        self.size = self.size.saturating_add(1);
        true
    }

    /// Returns the value associated with `key`
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value associated with `key`
    #[allow(clippy::indexing_slicing)]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.slot_of(key);
        let cmp = &self.cmp;
        let mut node = self.slots[index].as_deref_mut();
        while let Some(n) = node {
            if cmp.equals(key, &n.key) {
                return Some(&mut n.value);
            }
            node = n.next.as_deref_mut();
        }
        None
    }

    /// Returns true if `key` has an entry
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Unlinks the entry of `key` and hands back the stored key and value.
    ///
    /// Deleting an absent key changes nothing and returns `None`.
    #[allow(clippy::indexing_slicing)]
    pub fn delete(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.slot_of(key);
        let cmp = &self.cmp;

        let mut cursor = &mut self.slots[index];
        while cursor.as_ref().is_some_and(|n| !cmp.equals(key, &n.key)) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let node = cursor.take()?;
        let Node { key: stored_key, value, next } = *node;
        *cursor = next;
        self.size = self.size.saturating_sub(1);
        Some((stored_key, value))
    }

    /// Number of list entries a lookup of `key` inspects
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn probe_len(&self, key: &K) -> usize {
        let mut inspected: usize = 0;
        let mut node = self.slots[self.slot_of(key)].as_deref();
        while let Some(n) = node {
            inspected = inspected.saturating_add(1);
            if self.cmp.equals(key, &n.key) {
                break;
            }
            node = n.next.as_deref();
        }
        inspected
    }
}

impl<K, V, H, C> SepChainTable<K, V, H, C> {
    /// Removes every entry, passing each key and value to `dispose`.
    ///
    /// Lists are unlinked one node at a time, so arbitrarily long chains are safe.
    pub fn clear_with<F: FnMut(K, V)>(&mut self, mut dispose: F) {
        for head in &mut *self.slots {
            let mut link = head.take();
            while let Some(node) = link {
                let Node { key, value, next } = *node;
                dispose(key, value);
                link = next;
            }
        }
        trace!(capacity = self.slots.len(), released = self.size, "cleared chaining table");
        self.size = 0;
    }

    /// Removes and drops every entry; the capacity is kept
    pub fn clear(&mut self) {
        self.clear_with(|_, _| {});
    }

    /// Consumes the table, passing every key and value to `dispose`
    pub fn destroy_with<F: FnMut(K, V)>(mut self, dispose: F) {
        self.clear_with(dispose);
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the average list length `size / capacity`.
    ///
    /// Never triggers a resize: the capacity of a chaining table belongs to the caller.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns an iterator over the entries: slots in ascending order, newest entry first
    /// within a slot
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter(), node: None }
    }

    /// Returns the keys of every entry, in iteration order
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Calls `visit` once per entry, in iteration order
    pub fn traverse<F: FnMut(&K, &V)>(&self, mut visit: F) {
        for (key, value) in self {
            visit(key, value);
        }
    }
}

impl<K, V, H, C> Drop for SepChainTable<K, V, H, C> {
    fn drop(&mut self) {
        // Unlink iteratively; dropping a Box chain directly would recurse once per node
        for head in &mut *self.slots {
            let mut link = head.take();
            while let Some(mut node) = link {
                link = node.next.take();
            }
        }
    }
}

impl<K, V, H, C> fmt::Debug for SepChainTable<K, V, H, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H, C> Extend<(K, V)> for SepChainTable<K, V, H, C>
where
    H: SlotHasher<K>,
    C: Comparator<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, H, C> HashTable<K, V> for SepChainTable<K, V, H, C>
where
    H: SlotHasher<K>,
    C: Comparator<K>,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn insert(&mut self, key: K, value: V) -> bool {
        Self::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        Self::get_mut(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Self::contains(self, key)
    }

    fn delete(&mut self, key: &K) -> Option<(K, V)> {
        Self::delete(self, key)
    }

    fn clear_with<F: FnMut(K, V)>(&mut self, dispose: F) {
        Self::clear_with(self, dispose);
    }

    fn size(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn load_factor(&self) -> f64 {
        Self::load_factor(self)
    }

    fn keys(&self) -> Vec<&K> {
        Self::keys(self)
    }

    fn traverse<F: FnMut(&K, &V)>(&self, visit: F) {
        Self::traverse(self, visit);
    }
}

/// Iterator over the entries of a [`SepChainTable`]
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    /// Slots not visited yet
    slots: std::slice::Iter<'a, Link<K, V>>,
    /// Next entry of the list being walked
    node: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                return Some((&node.key, &node.value));
            }
            self.node = self.slots.next()?.as_deref();
        }
    }
}

impl<'a, K, V, H, C> IntoIterator for &'a SepChainTable<K, V, H, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
