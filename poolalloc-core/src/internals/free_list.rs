//! Free List
//!
//! A FreeNode represents a free block of a pool.
//!
//! Whilst allocated, the content of the block is purely in the hands of the user. Whilst deallocated, however, the
//! block storage is reused to store the pointer to the next free block, forming an intrusive singly-linked list.
//!
//! Note: FreeNodes are never _constructed_ as such, instead raw memory is reinterpreted as nodes. As pools may be
//! aligned on less than a pointer, nodes are always read and written unaligned.

use core::{
    cell::Cell,
    mem,
    ptr::{self, NonNull},
};

/// FreeNode.
///
/// The in-memory layout of a free block: a pointer to the next free block, if any.
#[repr(C)]
pub(crate) struct FreeNode {
    next: Option<NonNull<FreeNode>>,
}

impl FreeNode {
    /// The minimum size of a block, for it to be linked in a FreeList.
    pub(crate) const SIZE: usize = mem::size_of::<FreeNode>();

    /// In-place constructs a `FreeNode` pointing to `next`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that access to the memory location is exclusive.
    /// -   Assumes that there is sufficient memory available.
    pub(crate) unsafe fn initialize(at: NonNull<u8>, next: Option<NonNull<FreeNode>>) -> NonNull<FreeNode> {
        let node: NonNull<FreeNode> = at.cast();

        //  Safety:
        //  -   Access to the memory location is exclusive.
        //  -   `at` is assumed to be sufficiently sized.
        ptr::write_unaligned(node.as_ptr(), FreeNode { next });

        node
    }

    /// Returns the next node, if any.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `node` was initialized by `initialize`, and not overwritten since.
    pub(crate) unsafe fn next(node: NonNull<FreeNode>) -> Option<NonNull<FreeNode>> {
        ptr::read_unaligned(node.as_ptr()).next
    }
}

/// FreeList.
///
/// A LIFO stack of free blocks, threaded through the blocks themselves.
#[derive(Default)]
pub(crate) struct FreeList {
    head: Cell<Option<NonNull<FreeNode>>>,
    length: Cell<usize>,
}

impl FreeList {
    /// Returns whether the list is empty, or not.
    pub(crate) fn is_empty(&self) -> bool { self.head.get().is_none() }

    /// Returns the number of blocks in the list.
    pub(crate) fn len(&self) -> usize { self.length.get() }

    /// Pops the head of the list, if any.
    ///
    /// The returned block is no longer considered a node: its content is left to the caller.
    pub(crate) fn pop(&self) -> Option<NonNull<u8>> {
        let result = self.head.get()?;

        //  Safety:
        //  -   Non-null, and valid instance, as all nodes were pushed via `push`.
        let next = unsafe { FreeNode::next(result) };

        self.head.set(next);
        self.length.set(self.length.get() - 1);

        debug_assert_eq!(self.length.get() == 0, self.is_empty(), "Length out of sync with list");

        Some(result.cast())
    }

    /// Prepends the block to the head of the list.
    ///
    /// #   Safety
    ///
    /// -   Assumes that access to the block is exclusive, and remains so until popped.
    /// -   Assumes that the block is at least `FreeNode::SIZE` bytes.
    /// -   Assumes that the block is not already in the list.
    pub(crate) unsafe fn push(&self, block: NonNull<u8>) {
        debug_assert!(self.head.get() != Some(block.cast()), "Double push of {:x}", block.as_ptr() as usize);

        let node = FreeNode::initialize(block, self.head.get());

        self.head.set(Some(node));
        self.length.set(self.length.get() + 1);
    }

    /// Returns the head of the list, possibly null.
    #[cfg(test)]
    pub(crate) fn peek(&self) -> Option<NonNull<u8>> { self.head.get().map(NonNull::cast) }
}

// mod tests
