//! Errors reported by the fallible allocation paths of the tables.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure to build or resize a slot array.
///
/// Only `try_*` constructors and [`LinProbTable::try_resize`](crate::LinProbTable::try_resize)
/// report these; the infallible variants assert the capacity and abort on allocation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A slot array must hold at least one slot
    #[error("table capacity must be positive")]
    ZeroCapacity,
    /// The allocator refused the slot array
    #[error("unable to allocate {capacity} slots: {source}")]
    Alloc {
        /// Number of slots requested
        capacity: usize,
        /// Allocator error
        #[source]
        source: TryReserveError,
    },
}
