//! Three-way key comparison used for key equality by both table strategies.

use std::cmp::Ordering;

/// Orders two keys; keys are equal for the table exactly when this returns
/// [`Ordering::Equal`].
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator, so closures such as
/// `|a: &String, b: &String| a.len().cmp(&b.len())` can be injected directly.
pub trait Comparator<K: ?Sized> {
    /// Compares `a` with `b`
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if the comparator considers both keys the same key
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        self.compare(a, b).is_eq()
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Compares keys by their [`Ord`] implementation.
#[inline]
#[must_use]
pub fn natural<K: Ord + ?Sized>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}
