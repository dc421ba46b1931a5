//! Aligned Raw Allocator
//!
//! A thin layer over a `Platform`, adding alignment to each allocation.
//!
//! Each allocation over-allocates by its alignment, and records the padding applied in the byte preceding the returned
//! pointer; deallocation reads back this byte to recover the pointer originally returned by the platform. No side
//! table is involved, both allocation and deallocation are O(1), at the cost of `alignment` bytes per allocation.

use core::{
    alloc::{GlobalAlloc, Layout},
    ptr::{self, NonNull},
};

use crate::internals::{padding, placement};

use super::{AllocError, MAX_ALIGNMENT, Platform, PowerOf2};

/// AlignedRawAllocator
///
/// Allocates raw, uninitialized, aligned memory from a `Platform`; every allocation is a platform call.
///
/// Heavy use should be avoided in hot paths; prefer a `PoolAllocator` for recurring allocations of a single size.
#[derive(Default)]
pub struct AlignedRawAllocator<P> {
    platform: P,
}

impl<P> AlignedRawAllocator<P> {
    /// Creates an instance.
    pub const fn new(platform: P) -> Self { Self { platform } }

    /// Returns a reference to the underlying platform.
    pub fn platform(&self) -> &P { &self.platform }
}

impl<P> AlignedRawAllocator<P>
    where
        P: Platform,
{
    /// Allocates `size` bytes of uninitialized memory, aligned on `alignment`.
    ///
    /// Fails if `alignment` exceeds `MAX_ALIGNMENT`, if `size` padded to `alignment` overflows, or if the platform
    /// cannot provide the memory; the request is never retried.
    pub fn allocate(&self, size: usize, alignment: PowerOf2) -> Result<NonNull<u8>, AllocError> {
        padding::allocate_aligned(&self.platform, size, alignment)
    }

    /// Allocates `size` bytes of uninitialized memory, with no alignment requirement.
    pub fn allocate_unaligned(&self, size: usize) -> Result<NonNull<u8>, AllocError> {
        self.allocate(size, PowerOf2::ONE)
    }

    /// Deallocates the memory located at `pointer`.
    ///
    /// #   Safety
    ///
    /// -   Assumes `pointer` has been returned by a prior call to `allocate` on this instance.
    /// -   Assumes `pointer` has not been deallocated since its allocation.
    /// -   Assumes the memory pointed by `pointer` is no longer in use.
    pub unsafe fn deallocate(&self, pointer: NonNull<u8>) { padding::deallocate_aligned(&self.platform, pointer) }

    /// Constructs `value` in place in the memory located at `at`.
    ///
    /// #   Safety
    ///
    /// -   Assumes `at` has been returned by a prior call to `allocate`, with sufficient size and alignment for `T`.
    /// -   Assumes the memory pointed by `at` is exclusively accessed, and holds no live value.
    pub unsafe fn construct<T>(&self, at: NonNull<u8>, value: T) -> NonNull<T> { placement::construct(at, value) }

    /// Constructs a default `T` in place in the memory located at `at`.
    ///
    /// #   Safety
    ///
    /// -   As per `construct`.
    pub unsafe fn construct_default<T: Default>(&self, at: NonNull<u8>) -> NonNull<T> {
        placement::construct(at, T::default())
    }

    /// Destructs the value located at `at`, leaving the memory allocated yet uninitialized.
    ///
    /// #   Safety
    ///
    /// -   Assumes `at` points to a live `T`, previously constructed, exclusively accessed.
    /// -   Assumes the value is no longer used afterwards.
    pub unsafe fn destruct<T>(&self, at: NonNull<T>) -> NonNull<u8> { placement::destruct(at) }
}

unsafe impl<P> GlobalAlloc for AlignedRawAllocator<P>
    where
        P: Platform,
{
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.align() > MAX_ALIGNMENT.value() {
            return ptr::null_mut();
        }

        //  Safety:
        //  -   `layout.align()` is a power of 2.
        let alignment = PowerOf2::new_unchecked(layout.align());

        self.allocate(layout.size(), alignment).map(|ptr| ptr.as_ptr()).unwrap_or(ptr::null_mut())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _: Layout) {
        if let Some(ptr) = NonNull::new(ptr) {
            self.deallocate(ptr);
        }
    }
}
