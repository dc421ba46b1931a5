//! Padding bookkeeping.
//!
//! An aligned allocation over-allocates by `alignment` bytes, then skips forward to the first aligned address strictly
//! past the raw pointer returned by the platform. The number of bytes skipped, the adjustment, is recorded in the byte
//! immediately preceding the aligned address, so that the raw pointer can be recovered from the aligned one alone.
//!
//! ```text
//!   raw                     aligned
//!    |<----- adjustment ----->|
//!    [ padding ... | adj byte ][ storage: size bytes ... ]
//! ```
//!
//! The adjustment is in `(0, alignment]`: even an already aligned raw pointer is padded by a full `alignment`, so that
//! the adjustment byte always lies within the allocation.

use core::ptr::NonNull;

use crate::{AllocError, MAX_ALIGNMENT, Platform, PowerOf2, utils};

/// Returns the number of bytes to request from the platform to serve `size` bytes aligned on `alignment`.
pub(crate) fn padded_size(size: usize, alignment: PowerOf2) -> Result<usize, AllocError> {
    if alignment > MAX_ALIGNMENT {
        return Err(AllocError::AlignmentTooLarge { alignment: alignment.value() });
    }

    size.checked_add(alignment.value())
        .ok_or(AllocError::SizeOverflow { size, alignment: alignment.value() })
}

/// Allocates `size` bytes aligned on `alignment` from `platform`.
///
/// The returned pointer must be released with `deallocate_aligned`, on the same `platform`.
pub(crate) fn allocate_aligned<P>(platform: &P, size: usize, alignment: PowerOf2) -> Result<NonNull<u8>, AllocError>
    where
        P: Platform + ?Sized,
{
    let padded = padded_size(size, alignment)?;

    //  Safety:
    //  -   No precondition.
    let raw = unsafe { platform.allocate(padded) }.ok_or(AllocError::OutOfMemory { size: padded })?;

    //  Safety:
    //  -   `raw` points to `padded` bytes, exclusively owned.
    //  -   `alignment` is at most `MAX_ALIGNMENT`, as checked by `padded_size`.
    Ok(unsafe { pad(raw, alignment) })
}

/// Releases a pointer obtained from `allocate_aligned`.
///
/// #   Safety
///
/// -   Assumes that `aligned` was returned by `allocate_aligned` with the same `platform`.
/// -   Assumes that `aligned` has not been released since.
/// -   Assumes that the byte preceding `aligned` was not overwritten.
pub(crate) unsafe fn deallocate_aligned<P>(platform: &P, aligned: NonNull<u8>)
    where
        P: Platform + ?Sized,
{
    platform.deallocate(unpad(aligned));
}

/// Pads `raw` forward to the next multiple of `alignment`, and records the adjustment.
///
/// #   Safety
///
/// -   Assumes that `raw` points to at least `alignment` bytes, exclusively accessed.
/// -   Assumes that `alignment` is at most `MAX_ALIGNMENT`.
pub(crate) unsafe fn pad(raw: NonNull<u8>, alignment: PowerOf2) -> NonNull<u8> {
    debug_assert!(alignment <= MAX_ALIGNMENT, "{} > {}", alignment, MAX_ALIGNMENT);

    let adjustment = alignment.forward_adjustment(raw.as_ptr() as usize);

    debug_assert!(adjustment > 0 && adjustment <= alignment.value(),
        "Incorrect adjustment {} for alignment {}", adjustment, alignment);

    //  Safety:
    //  -   `adjustment <= alignment`, hence within the allocated block, or pointing to its end.
    let aligned = raw.as_ptr().add(adjustment);

    //  Safety:
    //  -   `adjustment >= 1`, hence `aligned - 1` is within `[raw, aligned)`.
    //  -   `adjustment <= MAX_ALIGNMENT`, which fits in a `u8`.
    aligned.sub(1).write(adjustment as u8);

    //  Safety:
    //  -   `aligned` is derived from a non-null pointer by a forward offset within the same allocation.
    let aligned = NonNull::new_unchecked(aligned);

    debug_assert!(utils::is_sufficiently_aligned_for(aligned, alignment),
        "{:x} not {}-aligned!", aligned.as_ptr() as usize, alignment);

    aligned
}

/// Recovers the raw pointer from which `aligned` was padded.
///
/// #   Safety
///
/// -   Assumes that `aligned` was obtained from `pad`.
/// -   Assumes that the byte preceding `aligned` was not overwritten.
pub(crate) unsafe fn unpad(aligned: NonNull<u8>) -> NonNull<u8> {
    let adjustment = adjustment_of(aligned);

    debug_assert!(adjustment >= 1 && adjustment <= MAX_ALIGNMENT.value(),
        "Corrupted adjustment {} before {:x}", adjustment, aligned.as_ptr() as usize);

    //  Safety:
    //  -   `aligned - adjustment` is the raw pointer, as recorded by `pad`.
    NonNull::new_unchecked(aligned.as_ptr().sub(adjustment))
}

/// Returns the adjustment recorded in the byte preceding `aligned`.
///
/// #   Safety
///
/// -   Assumes that `aligned` was obtained from `pad`.
pub(crate) unsafe fn adjustment_of(aligned: NonNull<u8>) -> usize { aligned.as_ptr().sub(1).read() as usize }
