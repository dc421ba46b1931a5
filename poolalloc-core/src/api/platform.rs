//! Platform
//!
//! The Platform trait is used to request memory directly from the system. By abstracting the underlying platform,
//! it becomes possible to swap the system allocator for another source of memory, or for a test double.

use core::ptr::NonNull;

/// Abstraction of platform specific memory allocation and deallocation.
///
/// Unlike `GlobalAlloc`, the platform provides no alignment guarantee and does not require the size to release
/// memory: the allocators of this crate only ever keep the raw pointer around.
pub trait Platform {
    /// Allocates a fresh block of memory of at least `size` bytes.
    ///
    /// Returns None if the allocation request cannot be satisfied.
    ///
    /// #   Safety
    ///
    /// The caller may assume that if the returned pointer is not null then:
    /// -   The number of usable bytes is _greater than or equal_ to `size`.
    ///
    /// The caller may NOT assume any alignment beyond 1.
    unsafe fn allocate(&self, size: usize) -> Option<NonNull<u8>>;

    /// Deallocates the supplied block of memory.
    ///
    /// #   Safety
    ///
    /// The caller should no longer reference the memory after calling this function.
    ///
    /// `deallocate` assumes that:
    /// -   `pointer` was allocated by this instance of `Platform`.
    /// -   `pointer` is the value returned by `Platform`, and not an interior pointer.
    unsafe fn deallocate(&self, pointer: NonNull<u8>);
}

impl<P: Platform + ?Sized> Platform for &P {
    unsafe fn allocate(&self, size: usize) -> Option<NonNull<u8>> { (**self).allocate(size) }

    unsafe fn deallocate(&self, pointer: NonNull<u8>) { (**self).deallocate(pointer) }
}
