//! Hash table resolving collisions by open addressing with linear probing.

use std::{fmt, mem};

use tracing::{debug, trace};

use crate::{
    HashTable, ResizePolicy, TableError,
    compare::Comparator,
    hash::SlotHasher,
    utils::{alloc_slots, try_alloc_slots},
};

/// Capacity used by [`LinProbTable::with_default_capacity`].
///
/// A power of two, so doubling from it keeps the load factor at or below one half after
/// every put.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A slot of the probing array.
///
/// A boolean "occupied" flag cannot tell "stop probing" from "keep probing"; the tombstone
/// state carries exactly that difference.
#[derive(Debug, Clone)]
enum Slot<K, V> {
    /// Never used since the array was built; terminates every probe
    Empty,
    /// Holds a live entry
    Occupied(K, V),
    /// Held an entry that was deleted; probes continue past it and insertions may reuse it
    Tombstone,
}

/// Outcome of probing for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives in this slot
    Hit(usize),
    /// The key is absent; this slot (first tombstone, else the empty slot) would receive it
    Vacant(usize),
    /// The key is absent and every slot is occupied
    Full,
}

/// A hash table with linear probing, tombstone deletion and geometric resizing.
///
/// A put first doubles the table if the load factor is at or above the policy's growth
/// threshold, and a delete halves it once the load factor drops to the shrink threshold.
/// The growth check runs before the new entry lands, so with the default [`ResizePolicy`] a
/// put leaves at most `capacity / 2 + 1` entries: the load factor can pass 0.5 by one entry
/// (a two-slot table may hold two). Deleted entries leave tombstones that keep probe
/// sequences intact; a resize is the only time they are discarded.
///
/// ```rust
/// use hashtab::{compare, hash, LinProbTable};
///
/// let mut table = LinProbTable::new(0, hash::int_div::<u64>, compare::natural::<u64>);
/// for key in 0..10 {
///     table.put(key, key * key);
/// }
/// assert_eq!(table.get(&7), Some(&49));
/// assert!((table.size() - 1) * 2 <= table.capacity());
///
/// assert_eq!(table.delete(&7), Some((7, 49)));
/// assert!(!table.contains(&7));
/// ```
pub struct LinProbTable<K, V, H, C> {
    /// The probing array
    slots: Box<[Slot<K, V>]>,
    /// Number of occupied slots
    size: usize,
    /// Maps keys to home slots
    hasher: H,
    /// Decides key equality
    cmp: C,
    /// Thresholds driving growth and shrinking
    policy: ResizePolicy,
}

/// Index following `index` in a probe sequence over `capacity` slots
#[inline]
fn next_index(index: usize, capacity: usize) -> usize {
    let next = index.saturating_add(1);
    if next >= capacity { 0 } else { next }
}

impl<K, V, H, C> LinProbTable<K, V, H, C>
where
    H: SlotHasher<K>,
    C: Comparator<K>,
{
    /// Creates a table with `capacity` empty slots.
    ///
    /// A capacity of zero is allowed; the slot array is then allocated by the first put.
    #[must_use]
    pub fn new(capacity: usize, hasher: H, cmp: C) -> Self {
        Self {
            slots: alloc_slots(capacity, || Slot::Empty),
            size: 0,
            hasher,
            cmp,
            policy: ResizePolicy::default(),
        }
    }

    /// Creates a table like [`new`](Self::new), reporting a failed allocation as an error
    pub fn try_new(capacity: usize, hasher: H, cmp: C) -> Result<Self, TableError> {
        Ok(Self {
            slots: try_alloc_slots(capacity, || Slot::Empty)?,
            size: 0,
            hasher,
            cmp,
            policy: ResizePolicy::default(),
        })
    }

    /// Creates a table with [`DEFAULT_CAPACITY`] slots
    #[must_use]
    pub fn with_default_capacity(hasher: H, cmp: C) -> Self {
        Self::new(DEFAULT_CAPACITY, hasher, cmp)
    }

    /// Replaces the resize policy
    #[must_use]
    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Home slot of `key`; the table must have at least one slot
    fn home(&self, key: &K) -> usize {
        let capacity = self.slots.len();
        let index = self.hasher.slot(key, capacity);
        assert!(index < capacity, "hasher returned slot {index} for capacity {capacity}");
        index
    }

    /// Walks the probe sequence of `key`.
    ///
    /// Returns the outcome and the number of slots inspected. Tombstones never stop the walk;
    /// the first one seen is reported as the vacant slot of an absent key.
    fn probe(&self, key: &K) -> (Probe, usize) {
        let capacity = self.slots.len();
        if capacity == 0 {
            return (Probe::Full, 0);
        }

        let mut index = self.home(key);
        let mut first_tombstone = None;
        for inspected in 1..=capacity {
            match self.slots.get(index) {
                None | Some(Slot::Empty) => {
                    return (Probe::Vacant(first_tombstone.unwrap_or(index)), inspected);
                }
                Some(Slot::Occupied(stored, _)) if self.cmp.equals(key, stored) => {
                    return (Probe::Hit(index), inspected);
                }
                Some(Slot::Tombstone) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Occupied(..)) => {}
            }
            index = next_index(index, capacity);
        }

        (first_tombstone.map_or(Probe::Full, Probe::Vacant), capacity)
    }

    /// Grows the table as the policy requires, then probes for `key`.
    ///
    /// Returns `Ok` with the slot holding `key`, or `Err` with the slot that would receive it.
    #[allow(clippy::unreachable)]
    fn probe_for_insert(&mut self, key: &K) -> Result<usize, usize> {
        if self.policy.should_grow(self.size, self.capacity()) {
            self.resize(self.capacity().saturating_mul(2).max(1));
        }
        // growth thresholds never exceed 1.0, so a slot is left that is empty or a tombstone
        debug_assert!(self.size < self.capacity(), "growth check left no free slot");
        match self.probe(key).0 {
            Probe::Hit(index) => Ok(index),
            Probe::Vacant(index) => Err(index),
            Probe::Full => unreachable!("a full sweep of a table with a free slot"),
        }
    }

    /// Stores a new entry in the vacant slot `index`
    fn install(&mut self, index: usize, key: K, value: V) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Occupied(key, value);
            self.size = self.size.saturating_add(1);
        }
    }

    /// Associates `value` with `key`.
    ///
    /// Grows first if the load factor has reached the growth threshold. Returns the replaced
    /// value on a hit; otherwise the entry takes the first tombstone of the probe sequence, or
    /// the empty slot that ended it, and `None` is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.probe_for_insert(&key) {
            Ok(index) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(_, stored)) => Some(mem::replace(stored, value)),
                _ => None,
            },
            Err(index) => {
                self.install(index, key, value);
                None
            }
        }
    }

    /// Adds the entry only if `key` is absent, returning whether it was added.
    ///
    /// Probes, grows and reuses tombstones exactly like [`put`](Self::put).
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.probe_for_insert(&key) {
            Ok(_) => false,
            Err(index) => {
                self.install(index, key, value);
                true
            }
        }
    }

    /// Returns the value associated with `key`
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let Probe::Hit(index) = self.probe(key).0 else { return None };
        match self.slots.get(index) {
            Some(Slot::Occupied(_, value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value associated with `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let Probe::Hit(index) = self.probe(key).0 else { return None };
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(_, value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true if `key` has an entry
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        matches!(self.probe(key).0, Probe::Hit(_))
    }

    /// Replaces the entry of `key` with a tombstone and hands back the stored key and value.
    ///
    /// Shrinks the table afterwards if the load factor dropped to the shrink threshold.
    /// Deleting an absent key changes nothing and returns `None`.
    pub fn delete(&mut self, key: &K) -> Option<(K, V)> {
        let Probe::Hit(index) = self.probe(key).0 else { return None };
        let slot = self.slots.get_mut(index)?;
        let Slot::Occupied(stored_key, value) = mem::replace(slot, Slot::Tombstone) else {
            return None;
        };
        self.size = self.size.saturating_sub(1);

        let capacity = self.capacity();
        if capacity > 1 && self.policy.should_shrink(self.size, capacity) {
            self.resize((capacity / 2).max(1));
        }
        Some((stored_key, value))
    }

    /// Rebuilds the table starting from `new_capacity` slots.
    ///
    /// The result is the table obtained by putting every entry into an empty table of
    /// `new_capacity` slots: that table doubles whenever the policy asks for it, so a target
    /// too small for the entries (or one the growth threshold rejects) ends up larger.
    /// Every entry is placed again by its hash for the final capacity; tombstones are
    /// discarded.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is zero.
    pub fn resize(&mut self, new_capacity: usize) {
        assert!(new_capacity > 0, "resize target must be positive");
        let capacity = self.settled_capacity(new_capacity);
        self.rebuild(alloc_slots(capacity, || Slot::Empty));
    }

    /// Rebuilds the table like [`resize`](Self::resize), reporting a zero target or a failed
    /// allocation as an error and leaving the table untouched in that case
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        if new_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        let capacity = self.settled_capacity(new_capacity);
        self.rebuild(try_alloc_slots(capacity, || Slot::Empty)?);
        Ok(())
    }

    /// Capacity an empty table of `requested` slots reaches after one put per entry.
    ///
    /// Never below the number of entries, since no growth threshold exceeds 1.0.
    fn settled_capacity(&self, requested: usize) -> usize {
        (0..self.size).fold(requested, |capacity, placed| {
            if self.policy.should_grow(placed, capacity) {
                capacity.saturating_mul(2)
            } else {
                capacity
            }
        })
    }

    /// Moves every entry into `slots`, which becomes the probing array
    fn rebuild(&mut self, slots: Box<[Slot<K, V>]>) {
        let old_capacity = self.capacity();
        let old = mem::replace(&mut self.slots, slots);
        self.size = 0;

        let mut tombstones: usize = 0;
        for slot in old {
            match slot {
                Slot::Occupied(key, value) => self.place(key, value),
                Slot::Tombstone => tombstones = tombstones.saturating_add(1),
                Slot::Empty => {}
            }
        }

        debug!(
            from = old_capacity,
            to = self.capacity(),
            entries = self.size,
            tombstones,
            "resized linear probing table"
        );
    }

    /// Places an entry known to be absent into a freshly built array.
    ///
    /// A fresh array has no tombstones and room for every entry, so the first empty slot of
    /// the probe sequence takes it.
    fn place(&mut self, key: K, value: V) {
        let capacity = self.capacity();
        let mut index = self.home(&key);
        while matches!(self.slots.get(index), Some(Slot::Occupied(..))) {
            index = next_index(index, capacity);
        }
        self.install(index, key, value);
    }

    /// Number of slots a lookup of `key` inspects, the slot that ends the probe included
    #[must_use]
    pub fn probe_len(&self, key: &K) -> usize {
        self.probe(key).1
    }
}

impl<K, V, H, C> LinProbTable<K, V, H, C> {
    /// Replaces the resize policy; takes effect from the next put or delete
    pub fn set_policy(&mut self, policy: ResizePolicy) {
        self.policy = policy;
    }

    /// Returns the resize policy
    #[must_use]
    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Removes every entry and tombstone, passing each key and value to `dispose`.
    ///
    /// The capacity is kept.
    pub fn clear_with<F: FnMut(K, V)>(&mut self, mut dispose: F) {
        for slot in &mut *self.slots {
            if let Slot::Occupied(key, value) = mem::replace(slot, Slot::Empty) {
                dispose(key, value);
            }
        }
        trace!(capacity = self.slots.len(), released = self.size, "cleared linear probing table");
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

    /// Returns `size / capacity`, or `0.0` before the first slot is allocated
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() { 0.0 } else { self.size as f64 / self.slots.len() as f64 }
    }

    /// Returns the number of tombstones currently lengthening probe sequences
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Tombstone)).count()
    }

    /// Returns an iterator over the entries in ascending slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Returns the keys of every entry, in ascending slot order
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Calls `visit` once per entry, in ascending slot order
    pub fn traverse<F: FnMut(&K, &V)>(&self, mut visit: F) {
        for (key, value) in self {
            visit(key, value);
        }
    }
}

impl<K, V, H, C> fmt::Debug for LinProbTable<K, V, H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinProbTable")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("tombstones", &self.tombstones())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<K, V, H, C> Extend<(K, V)> for LinProbTable<K, V, H, C>
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

impl<K, V, H, C> HashTable<K, V> for LinProbTable<K, V, H, C>
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

/// Iterator over the entries of a [`LinProbTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// The probing array
    slots: &'a [Slot<K, V>],
    /// Current position in the iteration
    index: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(key, value) = slot {
                return Some((key, value));
            }
        }
        None
    }
}

impl<'a, K, V, H, C> IntoIterator for &'a LinProbTable<K, V, H, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compare, hash};
    use std::cmp::Ordering;

    type IntHasher = fn(&i32, usize) -> usize;
    type IntComparator = fn(&i32, &i32) -> Ordering;

    /// Integer table with the division method
    fn int_table<V>(capacity: usize) -> LinProbTable<i32, V, IntHasher, IntComparator> {
        let hasher: IntHasher = hash::int_div::<i32>;
        let cmp: IntComparator = compare::natural::<i32>;
        LinProbTable::new(capacity, hasher, cmp)
    }

    #[test]
    fn test_capacity_one_doubling() {
        let mut table = int_table(1);
        for key in 0..10 {
            assert_eq!(table.put(key, key), None);
            assert!(table.size() <= table.capacity());
            assert!((table.size() - 1) * 2 <= table.capacity());
        }
        assert_eq!(table.size(), 10);
        assert_eq!(table.capacity(), 32);
        for key in 0..10 {
            assert_eq!(table.get(&key), Some(&key));
        }

        for key in 0..10 {
            assert_eq!(table.delete(&key), Some((key, key)));
            assert!(!table.contains(&key));
        }
        assert_eq!(table.size(), 0);
        assert_eq!(table.capacity(), 2);
    }

    #[test]
    fn test_lazy_allocation() {
        let mut table = int_table(0);
        assert_eq!(table.capacity(), 0);
        assert!(table.load_factor().abs() < f64::EPSILON);
        assert_eq!(table.get(&1), None);
        assert_eq!(table.delete(&1), None);
        assert_eq!(table.probe_len(&1), 0);

        table.put(1, "one");
        assert_eq!(table.capacity(), 1);
        assert_eq!(table.get(&1), Some(&"one"));
    }

    #[test]
    fn test_insert_is_first_write_wins() {
        let mut table = int_table(8);
        assert!(table.insert(5, 50));
        assert!(!table.insert(5, 51));
        assert_eq!(table.put(5, 52), Some(50));
        assert_eq!(table.get(&5), Some(&52));
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_tombstone_reuse() {
        let mut table = int_table(16);
        for key in [0, 16, 32, 3, 4] {
            table.put(key, key);
        }
        assert_eq!(table.delete(&16), Some((16, 16)));
        assert_eq!(table.tombstones(), 1);
        assert_eq!(table.capacity(), 16);

        // 32 sits behind the tombstone
        assert_eq!(table.get(&32), Some(&32));
        assert_eq!(table.probe_len(&32), 3);

        // a hit past the tombstone replaces in place
        assert_eq!(table.put(32, 99), Some(32));
        assert_eq!(table.tombstones(), 1);

        assert!(table.insert(48, 48));
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.keys(), vec![&0, &48, &32, &3, &4]);
    }

    #[test]
    fn test_miss_stops_at_empty_slot() {
        let mut table = int_table(16);
        table.put(1, ());
        table.put(17, ());
        assert_eq!(table.probe_len(&33), 3);
        assert_eq!(table.probe_len(&5), 1);
    }

    #[test]
    fn test_wraparound() {
        let mut table = int_table(8);
        table.put(7, 'a');
        table.put(15, 'b');
        table.put(23, 'c');
        assert_eq!(table.keys(), vec![&15, &23, &7]);
        assert_eq!(table.get(&23), Some(&'c'));
        assert_eq!(table.probe_len(&23), 3);
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut table = int_table(0);
        for key in 0..64 {
            table.put(key, key * 2);
            assert!((table.size() - 1) * 2 <= table.capacity());
        }
        assert!(table.capacity() >= 128);
        let grown = table.capacity();

        for key in 0..60 {
            table.delete(&key);
            assert!(table.capacity() == 1 || table.load_factor() > 0.125);
        }
        assert!(table.capacity() < grown);
        assert!(table.tombstones() + table.size() <= table.capacity());
        for key in 60..64 {
            assert_eq!(table.get(&key), Some(&(key * 2)));
        }
    }

    #[test]
    fn test_fixed_policy_fills_up() {
        let mut table = int_table(4).with_policy(ResizePolicy::fixed());
        for key in 0..4 {
            table.put(key, key);
        }
        assert_eq!(table.capacity(), 4);
        assert!((table.load_factor() - 1.0).abs() < f64::EPSILON);

        // a miss on a full table sweeps every slot
        assert_eq!(table.get(&7), None);
        assert_eq!(table.probe_len(&7), 4);

        table.put(4, 4);
        assert_eq!(table.capacity(), 8);

        for key in 0..5 {
            table.delete(&key);
        }
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.tombstones(), 5);
    }

    #[test]
    fn test_set_policy() {
        let mut table = int_table(4);
        table.set_policy(ResizePolicy::default().with_grow_threshold(0.75));
        assert!((table.policy().grow_threshold() - 0.75).abs() < f64::EPSILON);
        for key in 0..3 {
            table.put(key, ());
        }
        assert_eq!(table.capacity(), 4);
        table.put(3, ());
        assert_eq!(table.capacity(), 8);
    }

    #[test]
    fn test_resize_preserves_entries() {
        let mut table = int_table(16);
        for key in 0..5 {
            table.put(key, key + 100);
        }
        table.delete(&2);
        assert_eq!(table.tombstones(), 1);

        table.resize(64);
        assert_eq!(table.capacity(), 64);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.size(), 4);

        // re-putting four entries into four slots doubles once
        table.resize(4);
        assert_eq!(table.capacity(), 8);
        for key in [0, 1, 3, 4] {
            assert_eq!(table.get(&key), Some(&(key + 100)));
        }
        assert_eq!(table.get(&2), None);
    }

    #[test]
    fn test_try_resize() {
        let mut table = int_table(8);
        for key in 0..3 {
            table.put(key, key);
        }
        assert_eq!(table.try_resize(0), Err(TableError::ZeroCapacity));
        assert!(matches!(table.try_resize(usize::MAX), Err(TableError::Alloc { .. })));
        assert_eq!(table.capacity(), 8);

        assert_eq!(table.try_resize(3), Ok(()));
        assert_eq!(table.capacity(), 6);
        assert_eq!(table.keys(), vec![&0, &1, &2]);
    }

    #[test]
    fn test_resize_below_size_grows() {
        let mut table = int_table(8);
        for key in 0..3 {
            table.put(key, key);
        }
        table.resize(2);
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.keys(), vec![&0, &1, &2]);

        table.set_policy(ResizePolicy::fixed());
        table.resize(2);
        assert_eq!(table.capacity(), 4);
        for key in 0..3 {
            assert_eq!(table.get(&key), Some(&key));
        }
    }

    #[test]
    fn test_load_factor_after_put() {
        // odd capacities pass one half by at most one entry
        let mut odd = int_table(3);
        odd.put(0, ());
        odd.put(1, ());
        assert_eq!(odd.capacity(), 3);
        assert!(odd.load_factor() > 0.5);
        for key in 2..200 {
            odd.put(key, ());
            assert!((odd.size() - 1) * 2 <= odd.capacity());
        }

        let mut table = LinProbTable::with_default_capacity(
            hash::int_div::<u32>,
            compare::natural::<u32>,
        );
        for key in 0..600 {
            table.put(key, ());
            assert!(table.load_factor() <= 0.5);
        }
        assert_eq!(table.capacity(), 2 * DEFAULT_CAPACITY);
    }

    #[test]
    fn test_clamped_policy_grows_before_filling() {
        let policy = ResizePolicy::fixed().with_grow_threshold(5.0);
        let mut table = int_table(2).with_policy(policy);
        table.put(0, ());
        table.put(1, ());
        assert_eq!(table.capacity(), 2);

        // the clamped threshold of 1.0 grows a full table instead of sweeping it
        table.put(2, ());
        assert_eq!(table.capacity(), 4);
        for key in 0..3 {
            assert!(table.contains(&key));
        }
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_resize_to_zero_fails_fast() {
        let mut table = int_table::<()>(8);
        table.resize(0);
    }

    #[test]
    fn test_clear_drops_tombstones() {
        let mut table = int_table(16);
        for key in 0..6 {
            table.put(key, key);
        }
        table.delete(&0);

        let mut released = Vec::new();
        table.clear_with(|key, value| released.push((key, value)));
        released.sort_unstable();
        assert_eq!(released, (1..6).map(|k| (k, k)).collect::<Vec<_>>());
        assert_eq!(table.size(), 0);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.capacity(), 16);
    }

    #[test]
    fn test_get_mut_and_traverse() {
        let mut table = int_table(8);
        for key in 0..4 {
            table.put(key, key);
        }
        if let Some(value) = table.get_mut(&2) {
            *value = 20;
        }
        let mut seen = Vec::new();
        table.traverse(|key, value| seen.push((*key, *value)));
        assert_eq!(seen, vec![(0, 0), (1, 1), (2, 20), (3, 3)]);
    }

    #[test]
    fn test_hash_functions() {
        let names =
            ["alice", "bob", "charlie", "dany", "eric", "george", "john", "katy", "luke", "mark"];
        let mut strings = LinProbTable::with_default_capacity(
            hash::str_kr2e::<String>,
            compare::natural::<String>,
        );
        for (value, name) in names.iter().enumerate() {
            strings.put((*name).to_string(), value);
        }
        for (value, name) in names.iter().enumerate() {
            assert_eq!(strings.get(&(*name).to_string()), Some(&value));
        }
        assert_eq!(strings.capacity(), DEFAULT_CAPACITY);

        let mut ints = LinProbTable::with_default_capacity(
            hash::int_mult_knuth::<i64>,
            compare::natural::<i64>,
        );
        for key in -50..50_i64 {
            ints.put(key, key * key);
        }
        for key in -50..50_i64 {
            assert_eq!(ints.get(&key), Some(&(key * key)));
        }
        assert_eq!(ints.size(), 100);
    }

    #[test]
    fn test_debug_reports_shape() {
        let mut table = int_table(4);
        table.put(1, 1);
        let debug = format!("{table:?}");
        assert!(debug.starts_with("LinProbTable { size: 1, capacity: 4, tombstones: 0"));
    }

    #[test]
    fn test_extend() {
        let mut table = int_table(0);
        table.extend((0..10).map(|k| (k, k * 3)));
        assert_eq!(table.size(), 10);
        assert_eq!(table.get(&9), Some(&27));
    }
}
