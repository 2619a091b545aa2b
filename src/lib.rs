//! # hashtab
//!
//! Generic hash tables with injected hash and comparison functions.
//!
//! This crate provides two collision-resolution strategies behind one operation set:
//!
//! - `SepChainTable`: separate chaining with a fixed number of buckets
//! - `LinProbTable`: open addressing with linear probing, tombstone deletion and geometric
//!   resizing
//!
//! Both tables take the key-to-slot function and the key comparator as values, so the same
//! table type works with integer keys, string keys or any key type you can hash and compare.
//! The [`hash`] module ships the classic integer and string hash families.
//!
//! ## Basic Usage
//!
//! ```rust
//! use hashtab::{compare, hash, SepChainTable};
//!
//! let mut table = SepChainTable::new(31, hash::str_djb2a::<String>, compare::natural::<String>);
//!
//! table.put("apple".to_string(), 1);
//! table.put("banana".to_string(), 2);
//! assert_eq!(table.get(&"apple".to_string()), Some(&1));
//!
//! // `put` replaces, `insert` never overwrites
//! assert_eq!(table.put("apple".to_string(), 10), Some(1));
//! assert!(!table.insert("apple".to_string(), 20));
//! assert_eq!(table.get(&"apple".to_string()), Some(&10));
//!
//! // Deleting hands the stored pair back
//! assert_eq!(table.delete(&"apple".to_string()), Some(("apple".to_string(), 10)));
//! assert_eq!(table.get(&"apple".to_string()), None);
//! ```
//!
//! ## Writing Against Either Strategy
//!
//! ```rust
//! use hashtab::{compare, hash, HashTable, LinProbTable, SepChainTable};
//!
//! fn squares<T: HashTable<u32, u32>>(table: &mut T) -> u32 {
//!     for key in 0..10 {
//!         table.put(key, key * key);
//!     }
//!     let mut total = 0;
//!     table.traverse(|_, value| total += value);
//!     total
//! }
//!
//! let mut chained = SepChainTable::new(7, hash::int_div::<u32>, compare::natural::<u32>);
//! let mut probed = LinProbTable::new(1, hash::int_mult_knuth::<u32>, compare::natural::<u32>);
//! assert_eq!(squares(&mut chained), 285);
//! assert_eq!(squares(&mut probed), 285);
//! assert!(probed.load_factor() <= 0.5);
//! ```

/// Key comparators
pub mod compare;
/// Errors of the fallible construction and resize paths
mod error;
/// Hash functions mapping keys to slots
pub mod hash;
/// Open addressing with linear probing
pub mod linprob;
/// Load-factor thresholds driving resizes
mod policy;
/// Separate chaining
pub mod sepchain;
/// The operation set shared by both strategies
mod table;
/// Utility functions and traits for the tables
mod utils;

pub use compare::Comparator;
pub use error::TableError;
pub use hash::SlotHasher;
pub use linprob::LinProbTable;
pub use policy::ResizePolicy;
pub use sepchain::SepChainTable;
pub use table::HashTable;
pub use utils::TableExtensions;
