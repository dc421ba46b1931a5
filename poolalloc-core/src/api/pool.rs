//! Dynamic Pool Allocator
//!
//! A pool of fixed-size, aligned, blocks, recycled through an intrusive free-list.
//!
//! The pool allocates its blocks from the `Platform` one at a time, each with the padding bookkeeping of the
//! `AlignedRawAllocator`, as the blocks need not be contiguous. Deallocated blocks are not returned to the platform,
//! but pushed onto the free-list, from which subsequent allocations are served without any platform call.
//!
//! All blocks on the free-list are returned to the platform when the pool is dropped. Blocks still lent out at that
//! point are leaked: the pool does not keep track of them.

use core::{
    cell::Cell,
    mem,
    ptr::NonNull,
};

use tracing::{debug, trace};

use crate::{
    internals::{free_list::FreeList, padding, placement},
    utils,
};

use super::{AllocError, Platform, PoolConfiguration, PowerOf2};

/// PoolAllocator
///
/// Hands out blocks of `element_size` bytes, aligned on `alignment`, growing on demand.
///
/// #   Thread Safety
///
/// A pool is meant to be used by a single thread at a time: it may be sent across threads, but not shared. For
/// multi-threaded use, give each thread its own pool.
pub struct PoolAllocator<P>
    where
        P: Platform,
{
    platform: P,
    block_size: usize,
    alignment: PowerOf2,
    free: FreeList,
    owned: Cell<usize>,
}

impl<P> PoolAllocator<P>
    where
        P: Platform + Default,
{
    /// Creates a pool as per `configuration`, on a default platform.
    ///
    /// See `with_platform`.
    pub fn new(configuration: PoolConfiguration) -> Result<Self, AllocError> {
        Self::with_platform(configuration, P::default())
    }
}

impl<P> PoolAllocator<P>
    where
        P: Platform,
{
    /// Creates a pool as per `configuration`, on `platform`.
    ///
    /// The initial blocks are allocated eagerly. If the platform fails to provide all of them, those already allocated
    /// are returned to the platform, and the error reported.
    pub fn with_platform(configuration: PoolConfiguration, platform: P) -> Result<Self, AllocError> {
        configuration.validate()?;

        let pool = Self {
            platform,
            block_size: configuration.block_size(),
            alignment: configuration.alignment(),
            free: FreeList::default(),
            owned: Cell::new(0),
        };

        pool.reserve(configuration.initial_count())?;

        debug!(block_size = pool.block_size, alignment = pool.alignment.value(), blocks = pool.owned_count(),
            "pool created");

        Ok(pool)
    }

    /// Returns a reference to the underlying platform.
    pub fn platform(&self) -> &P { &self.platform }

    /// Returns the size of each block, at least as large as the configured element size.
    pub fn element_size(&self) -> usize { self.block_size }

    /// Returns the alignment of each block.
    pub fn alignment(&self) -> PowerOf2 { self.alignment }

    /// Returns the number of blocks obtained from the platform, whether free or lent out.
    pub fn owned_count(&self) -> usize { self.owned.get() }

    /// Returns the number of blocks ready for allocation.
    pub fn free_count(&self) -> usize { self.free.len() }

    /// Allocates `additional` blocks from the platform, ready for allocation.
    ///
    /// On failure, the blocks allocated before the failure are kept in the pool.
    #[cold]
    pub fn reserve(&self, additional: usize) -> Result<(), AllocError> {
        for _ in 0..additional {
            let block = self.grow()?;

            //  Safety:
            //  -   `block` is freshly allocated, hence exclusively accessed.
            //  -   `block` is `block_size` bytes, which is at least `FreeNode::SIZE`.
            unsafe { self.free.push(block) };
        }

        Ok(())
    }

    /// Allocates a block of `element_size` bytes, aligned on `alignment`.
    ///
    /// The block is taken from the free-list, if any is available, and otherwise freshly allocated from the platform,
    /// in which case the allocation may fail. The content of the block is unspecified.
    pub fn allocate(&self) -> Result<NonNull<u8>, AllocError> {
        if let Some(block) = self.free.pop() {
            return Ok(block);
        }

        trace!(blocks = self.owned_count(), "pool exhausted, growing");

        self.grow()
    }

    /// Deallocates the block located at `pointer`, making it available for a future allocation.
    ///
    /// The block is kept by the pool, and only returned to the platform when the pool is dropped.
    ///
    /// #   Safety
    ///
    /// -   Assumes `pointer` has been returned by a prior call to `allocate` on this instance.
    /// -   Assumes `pointer` has not been deallocated since its allocation.
    /// -   Assumes the memory pointed by `pointer` is no longer in use.
    pub unsafe fn deallocate(&self, pointer: NonNull<u8>) {
        debug_assert!(utils::is_sufficiently_aligned_for(pointer, self.alignment),
            "{:x} not {}-aligned!", pointer.as_ptr() as usize, self.alignment);
        debug_assert!(padding::adjustment_of(pointer) <= self.alignment.value(),
            "Foreign block {:x}", pointer.as_ptr() as usize);

        self.free.push(pointer);
    }

    /// Constructs `value` in place in the block located at `at`.
    ///
    /// #   Safety
    ///
    /// -   Assumes `at` has been returned by a prior call to `allocate`, and not deallocated since.
    /// -   Assumes the block is sufficiently sized and aligned for `T`.
    /// -   Assumes the block holds no live value.
    pub unsafe fn construct<T>(&self, at: NonNull<u8>, value: T) -> NonNull<T> {
        debug_assert!(mem::size_of::<T>() <= self.block_size,
            "{} bytes do not fit in {} bytes blocks", mem::size_of::<T>(), self.block_size);

        placement::construct(at, value)
    }

    /// Constructs a default `T` in place in the block located at `at`.
    ///
    /// #   Safety
    ///
    /// -   As per `construct`.
    pub unsafe fn construct_default<T: Default>(&self, at: NonNull<u8>) -> NonNull<T> {
        self.construct(at, T::default())
    }

    /// Destructs the value located at `at`, leaving the block allocated yet uninitialized.
    ///
    /// #   Safety
    ///
    /// -   Assumes `at` points to a live `T`, previously constructed, exclusively accessed.
    /// -   Assumes the value is no longer used afterwards.
    pub unsafe fn destruct<T>(&self, at: NonNull<T>) -> NonNull<u8> { placement::destruct(at) }

    //  Allocates a fresh block from the platform.
    fn grow(&self) -> Result<NonNull<u8>, AllocError> {
        let block = padding::allocate_aligned(&self.platform, self.block_size, self.alignment)?;

        self.owned.set(self.owned.get() + 1);

        Ok(block)
    }
}

impl<P> Drop for PoolAllocator<P>
    where
        P: Platform,
{
    fn drop(&mut self) {
        let mut released = 0usize;

        while let Some(block) = self.free.pop() {
            //  Safety:
            //  -   `block` was allocated by `grow`, on this platform, and is not in use, being free.
            unsafe { padding::deallocate_aligned(&self.platform, block) };

            released += 1;
        }

        debug!(released, "pool released");
    }
}

//  Safety:
//  -   The pool exclusively owns all its free blocks, which move along with it.
unsafe impl<P> Send for PoolAllocator<P>
    where
        P: Platform + Send,
{}
