//! Hash functions mapping a key and a table capacity to a slot index.
//!
//! Every function here is pure and stateless: `(key, capacity) -> index` with the index in
//! `[0, capacity)`. Tables never pick a hash function themselves, the caller injects one as a
//! [`SlotHasher`]. Plain functions and closures with the signature `Fn(&K, usize) -> usize` are
//! hashers already, so the table can be built with any of the functions below:
//!
//! ```rust
//! use hashtab::{compare, hash, SepChainTable};
//!
//! let mut table = SepChainTable::new(16, hash::str_kr2e::<&str>, compare::natural::<&str>);
//! table.put("alice", 1);
//! assert_eq!(table.get(&"alice"), Some(&1));
//! ```

/// Maps a key to a slot of a table with the given capacity.
///
/// Implementations must be deterministic and return a value in `[0, capacity)` for every
/// `capacity > 0`. Tables assert the range on every call.
pub trait SlotHasher<K: ?Sized> {
    /// Returns the home slot of `key` in a table of `capacity` slots
    fn slot(&self, key: &K, capacity: usize) -> usize;
}

impl<K: ?Sized, F> SlotHasher<K> for F
where
    F: Fn(&K, usize) -> usize,
{
    #[inline]
    fn slot(&self, key: &K, capacity: usize) -> usize {
        self(key, capacity)
    }
}

/// Integer keys accepted by the division and multiplicative methods.
pub trait IntKey: Copy {
    /// Widens the key without loss
    fn widen(self) -> i128;
}

/// Implements [`IntKey`] for integer types with a lossless `From` conversion into `i128`
macro_rules! int_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntKey for $t {
                #[inline]
                fn widen(self) -> i128 {
                    i128::from(self)
                }
            }
        )*
    };
}

int_key!(i8, i16, i32, i64, u8, u16, u32, u64);

impl IntKey for isize {
    #[inline]
    fn widen(self) -> i128 {
        // isize is at most 64 bits wide on every supported target
        self as i128
    }
}

impl IntKey for usize {
    #[inline]
    #[allow(clippy::cast_lossless)]
    fn widen(self) -> i128 {
        self as i128
    }
}

/// Seed of the djb2 family
const DJB2_SEED: usize = 5381;

/// Widens a capacity for integer arithmetic, asserting it is a valid table size
#[inline]
fn checked_capacity(capacity: usize) -> i128 {
    assert!(capacity > 0, "hash capacity must be positive");
    capacity.widen()
}

/// Division method: `key mod capacity`.
///
/// Negative keys use the Euclidean remainder, so `-1` lands in the last slot.
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn int_div<K: IntKey>(key: &K, capacity: usize) -> usize {
    let m = checked_capacity(capacity);
    // in [0, capacity), so it fits back into usize
    key.widen().rem_euclid(m) as usize
}

/// Multiplicative method: `floor(capacity * frac(a * key))` for `0 < a < 1`.
///
/// # Panics
///
/// Panics if `capacity` is zero or `a` lies outside `(0, 1)`.
#[must_use]
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn int_mult<K: IntKey>(key: &K, a: f64, capacity: usize) -> usize {
    assert!(capacity > 0, "hash capacity must be positive");
    assert!(a > 0.0 && a < 1.0, "multiplicative constant must lie in (0, 1), got {a}");

    let frac = (a * key.widen() as f64).rem_euclid(1.0);
    let index = (capacity as f64 * frac).floor() as usize;
    index.min(capacity - 1)
}

/// Multiplicative method with Knuth's constant `a = (sqrt(5) - 1) / 2`.
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn int_mult_knuth<K: IntKey>(key: &K, capacity: usize) -> usize {
    let a = 0.5 * (5.0_f64.sqrt() - 1.0);
    int_mult(key, a, capacity)
}

/// Rolling string hash: starting from `h0`, every byte `c` updates `h = (a * h + c) mod capacity`.
///
/// The products wrap on `usize` overflow.
///
/// # Panics
///
/// Panics if `capacity` is zero or `h0 >= capacity`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn str_rolling<S>(key: &S, h0: usize, a: usize, capacity: usize) -> usize
where
    S: AsRef<str> + ?Sized,
{
    assert!(capacity > 0, "hash capacity must be positive");
    assert!(h0 < capacity, "hash seed {h0} must be smaller than the capacity {capacity}");

    key.as_ref()
        .bytes()
        .fold(h0, |h, c| a.wrapping_mul(h).wrapping_add(usize::from(c)) % capacity)
}

/// djb2 by Dan Bernstein (seed 5381, multiplier 33).
///
/// # Panics
///
/// Panics if `capacity <= 5381`, since the seed must be a valid slot.
#[must_use]
pub fn str_djb2<S: AsRef<str> + ?Sized>(key: &S, capacity: usize) -> usize {
    str_rolling(key, DJB2_SEED, 33, capacity)
}

/// djb2a: djb2 combining each byte with xor instead of addition.
///
/// The seed is not required to be smaller than the capacity.
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn str_djb2a<S: AsRef<str> + ?Sized>(key: &S, capacity: usize) -> usize {
    assert!(capacity > 0, "hash capacity must be positive");

    key.as_ref()
        .bytes()
        .fold(DJB2_SEED, |h, c| (33_usize.wrapping_mul(h) ^ usize::from(c)) % capacity)
}

/// Java's `String.hashCode` recurrence (seed 0, multiplier 31).
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn str_java<S: AsRef<str> + ?Sized>(key: &S, capacity: usize) -> usize {
    str_rolling(key, 0, 31, capacity)
}

/// The hash of Kernighan and Ritchie, 2nd edition (seed 0, multiplier 31).
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn str_kr2e<S: AsRef<str> + ?Sized>(key: &S, capacity: usize) -> usize {
    str_rolling(key, 0, 31, capacity)
}

/// SGI STL string hash (seed 0, multiplier 5).
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn str_sgistl<S: AsRef<str> + ?Sized>(key: &S, capacity: usize) -> usize {
    str_rolling(key, 0, 5, capacity)
}

/// STLport string hash (seed 0, multiplier 33).
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn str_stlport<S: AsRef<str> + ?Sized>(key: &S, capacity: usize) -> usize {
    str_rolling(key, 0, 33, capacity)
}
