//! Implementation of the Platform trait over the C allocator.

use core::ptr::NonNull;

use poolalloc_core::Platform;

/// Implementation of the Platform trait, over `malloc` and `free`.
///
/// `free` only requires the pointer returned by `malloc`, which is exactly what the padding bookkeeping recovers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemPlatform;

impl SystemPlatform {
    /// Creates an instance.
    pub const fn new() -> Self { Self }
}

impl Platform for SystemPlatform {
    unsafe fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        //  `malloc(0)` may return either null or a unique pointer; the allocators always request at least 1 byte.
        debug_assert!(size > 0);

        NonNull::new(libc::malloc(size) as *mut u8)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>) {
        libc::free(pointer.as_ptr() as *mut libc::c_void);
    }
}
