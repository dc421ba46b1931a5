//! In-place construction and destruction of values over raw storage.
//!
//! Allocation and initialization are distinct steps: the allocators hand out uninitialized bytes, which the user then
//! constructs a value into, and later destructs the value from, before handing the bytes back.

use core::ptr::{self, NonNull};

use crate::{PowerOf2, utils};

/// Moves `value` into the storage at `at`, returning a typed pointer to it.
///
/// #   Safety
///
/// -   Assumes that access to the memory location is exclusive.
/// -   Assumes that there is sufficient memory available for a `T`.
/// -   Assumes that the pointer is correctly aligned for a `T`.
pub(crate) unsafe fn construct<T>(at: NonNull<u8>, value: T) -> NonNull<T> {
    debug_assert!(utils::is_sufficiently_aligned_for(at, PowerOf2::align_of::<T>()),
        "{:x} not {}-aligned!", at.as_ptr() as usize, PowerOf2::align_of::<T>());

    let typed = at.cast::<T>();

    //  Safety:
    //  -   Access to the memory location is exclusive.
    //  -   `at` is assumed to be sufficiently sized and aligned.
    ptr::write(typed.as_ptr(), value);

    typed
}

/// Drops the value at `at` in place, returning the now uninitialized storage.
///
/// #   Safety
///
/// -   Assumes that access to the value is exclusive.
/// -   Assumes that `at` points to an initialized `T`, which is no longer used afterwards.
pub(crate) unsafe fn destruct<T>(at: NonNull<T>) -> NonNull<u8> {
    //  Safety:
    //  -   `at` is assumed to point to a valid `T`, exclusively accessed.
    ptr::drop_in_place(at.as_ptr());

    at.cast()
}
