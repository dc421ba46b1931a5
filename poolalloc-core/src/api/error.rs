//! Errors reported by the allocators.

use thiserror::Error;

use super::MAX_ALIGNMENT;

/// AllocError
///
/// The reasons an allocation, or the creation of a pool, may fail.
///
/// Misuse of the raw API, such as deallocating a foreign pointer, is not reported: it is Undefined Behavior, as
/// documented on each `unsafe` function.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum AllocError {
    /// The platform could not provide the requested memory.
    #[error("platform could not allocate {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested from the platform, padding included.
        size: usize,
    },
    /// The size, once padded for alignment, does not fit in `usize`.
    #[error("size {size} padded to alignment {alignment} overflows")]
    SizeOverflow {
        /// Requested size.
        size: usize,
        /// Requested alignment.
        alignment: usize,
    },
    /// The alignment cannot be recorded in the single byte of padding bookkeeping.
    #[error("alignment {alignment} exceeds the maximum alignment of {max}", max = MAX_ALIGNMENT.value())]
    AlignmentTooLarge {
        /// Requested alignment.
        alignment: usize,
    },
    /// A pool was configured without any initial element.
    #[error("a pool requires at least one initial element")]
    EmptyPool,
}
