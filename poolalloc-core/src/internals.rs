//! The internals of poolalloc-core.
//!
//! The internals provide the memory layout tricks: padding bookkeeping, intrusive free-list, and in-place
//! construction.

pub(crate) mod free_list;
pub(crate) mod padding;
pub(crate) mod placement;
