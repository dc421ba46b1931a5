//! The configuration of a pool.
//!
//! A pool is entirely described by three parameters, fixed at construction:
//!
//! -   The size of its elements, widened if need be so a free element can hold a free-list node.
//! -   The number of elements allocated upfront.
//! -   The alignment of its elements.

use core::{cmp, mem};

use crate::internals::free_list::FreeNode;

use super::{AllocError, PowerOf2};

/// The maximum alignment supported by the allocators.
///
/// The padding applied to align an allocation is recorded in a single byte, and may be as large as the alignment
/// itself; 128 is the largest power of 2 fitting in a byte.
//  Safety:
//  -   128 is a power of 2.
pub const MAX_ALIGNMENT: PowerOf2 = unsafe { PowerOf2::new_unchecked(128) };

/// PoolConfiguration
///
/// The construction parameters of a `PoolAllocator`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PoolConfiguration {
    element_size: usize,
    initial_count: usize,
    alignment: PowerOf2,
}

impl PoolConfiguration {
    /// The number of elements allocated upfront, unless specified otherwise.
    pub const DEFAULT_INITIAL_COUNT: usize = 32;

    /// Creates a configuration for elements of `element_size` bytes.
    ///
    /// The initial count defaults to `DEFAULT_INITIAL_COUNT`, and the alignment to 1.
    pub const fn new(element_size: usize) -> Self {
        Self { element_size, initial_count: Self::DEFAULT_INITIAL_COUNT, alignment: PowerOf2::ONE }
    }

    /// Creates a configuration suitable to hold instances of `T`.
    pub const fn of<T>() -> Self { Self::new(mem::size_of::<T>()).with_alignment(PowerOf2::align_of::<T>()) }

    /// Sets the number of elements allocated upfront.
    pub const fn with_initial_count(mut self, initial_count: usize) -> Self {
        self.initial_count = initial_count;
        self
    }

    /// Sets the alignment of the elements.
    pub const fn with_alignment(mut self, alignment: PowerOf2) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns the element size, as requested.
    pub const fn element_size(&self) -> usize { self.element_size }

    /// Returns the number of elements allocated upfront.
    pub const fn initial_count(&self) -> usize { self.initial_count }

    /// Returns the alignment of the elements.
    pub const fn alignment(&self) -> PowerOf2 { self.alignment }

    /// Returns the effective size of each block, large enough to hold a free-list node.
    pub fn block_size(&self) -> usize { cmp::max(self.element_size, FreeNode::SIZE) }

    /// Checks that a pool can be created from this configuration.
    pub fn validate(&self) -> Result<(), AllocError> {
        if self.initial_count == 0 {
            return Err(AllocError::EmptyPool);
        }

        if self.alignment > MAX_ALIGNMENT {
            return Err(AllocError::AlignmentTooLarge { alignment: self.alignment.value() });
        }

        self.block_size()
            .checked_add(self.alignment.value())
            .map(|_| ())
            .ok_or(AllocError::SizeOverflow { size: self.block_size(), alignment: self.alignment.value() })
    }
}
